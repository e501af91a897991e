//! Category trends and year-over-year comparison

use std::collections::BTreeMap;

use serde::Serialize;

use super::ReportContext;
use crate::aggregate::monthly::by_category;
use crate::aggregate::tiers::members;
use crate::aggregate::rollup;
use crate::models::period::{month_number, year_of};
use crate::models::round_money;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthAmount {
    pub month: String,
    pub amount: f64,
}

/// Monthly spending of one tier, or of a category outside every tier
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTrend {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub is_tier: bool,
    /// Categories rolled into this series
    pub categories: Vec<String>,
    pub data: Vec<MonthAmount>,
}

/// Spending for one calendar month across years
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOverYear {
    /// Two-digit month, `01`..`12`
    pub month: String,
    /// `YYYY -> amount`
    pub years: BTreeMap<String, f64>,
}

/// Tier-rolled spending series, sorted by tier name
pub fn category_trends(ctx: &ReportContext) -> Vec<CategoryTrend> {
    let rolled = rollup(ctx.expenses(), &ctx.settings);
    let mut members = members(ctx.expenses(), &ctx.settings);

    by_category(&rolled)
        .into_iter()
        .map(|(name, months)| {
            let tier = ctx.settings.find_tier(&name);
            CategoryTrend {
                color: tier.map(|t| t.color.clone()),
                is_tier: tier.is_some(),
                categories: members.remove(&name).unwrap_or_default(),
                data: months
                    .into_iter()
                    .map(|(month, amount)| MonthAmount {
                        month,
                        amount: round_money(amount),
                    })
                    .collect(),
                category: name,
            }
        })
        .collect()
}

/// Total spending pivoted by calendar month and year
pub fn year_over_year(ctx: &ReportContext) -> Vec<YearOverYear> {
    let mut pivot: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for (month, categories) in ctx.expenses() {
        let total: f64 = categories.values().sum();
        *pivot
            .entry(month_number(month).to_string())
            .or_default()
            .entry(year_of(month).to_string())
            .or_insert(0.0) += total;
    }

    pivot
        .into_iter()
        .map(|(month, years)| YearOverYear {
            month,
            years: years
                .into_iter()
                .map(|(year, amount)| (year, round_money(amount)))
                .collect(),
        })
        .collect()
}
