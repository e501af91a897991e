//! Tier rollup
//!
//! Re-sums monthly category amounts into the user's tiers. A category outside
//! every tier becomes its own pseudo-tier. A category listed in several tiers
//! goes to the first one in configuration order.

use std::collections::BTreeMap;

use super::monthly::MonthlyTotals;
use crate::config::{Settings, Tier};

/// Where a category rolls up to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupGroup<'a> {
    Tier(&'a Tier),
    /// Unassigned category standing in for a tier
    Category(&'a str),
}

impl<'a> RollupGroup<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Self::Tier(tier) => &tier.name,
            Self::Category(category) => category,
        }
    }

    pub fn tier(&self) -> Option<&'a Tier> {
        match *self {
            Self::Tier(tier) => Some(tier),
            Self::Category(_) => None,
        }
    }
}

pub fn tier_of<'a>(settings: &'a Settings, category: &str) -> Option<&'a Tier> {
    settings.tier_for_category(category)
}

pub fn group_of<'a>(settings: &'a Settings, category: &'a str) -> RollupGroup<'a> {
    match tier_of(settings, category) {
        Some(tier) => RollupGroup::Tier(tier),
        None => RollupGroup::Category(category),
    }
}

/// Re-aggregate `month -> category -> amount` into `month -> group -> amount`
pub fn rollup(totals: &MonthlyTotals, settings: &Settings) -> MonthlyTotals {
    let mut rolled = MonthlyTotals::new();
    for (month, categories) in totals {
        let groups = rolled.entry(month.clone()).or_default();
        for (category, amount) in categories {
            let name = group_of(settings, category).name().to_string();
            *groups.entry(name).or_insert(0.0) += amount;
        }
    }
    rolled
}

/// Categories seen in the data, listed under the group they roll up to
pub fn members(totals: &MonthlyTotals, settings: &Settings) -> BTreeMap<String, Vec<String>> {
    let mut members: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for category in totals.values().flat_map(|categories| categories.keys()) {
        let list = members
            .entry(group_of(settings, category).name().to_string())
            .or_default();
        if !list.contains(category) {
            list.push(category.clone());
        }
    }
    for list in members.values_mut() {
        list.sort();
    }
    members
}
