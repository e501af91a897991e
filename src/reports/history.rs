//! Budget, income and tier history
//!
//! Month-by-month series per category (or income source, or tier) next to its
//! threshold-trimmed average. Every month in the data appears in each series,
//! current month included; only completed months feed the averages.

use serde::Serialize;

use super::budget::MIN_HISTORY_MONTHS;
use super::ReportContext;
use crate::aggregate::monthly::by_category;
use crate::aggregate::{rollup, MonthlyTotals, ThresholdTrim};
use crate::models::period::year_of;
use crate::models::{percent_of, round_money};

/// One month of a history series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBudget {
    pub month: String,
    pub year: String,
    pub amount: f64,
    pub percent_of_average: f64,
    pub over_budget: bool,
}

/// History of one category, income source or tier
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetHistoryItem {
    pub category: String,
    pub average: f64,
    pub average_excluding_extremes: f64,
    pub months: Vec<MonthBudget>,
}

/// Whether months above the average are flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverBudget {
    Flag,
    Never,
}

fn build(totals: &MonthlyTotals, current_month: &str, over_budget: OverBudget) -> Vec<BudgetHistoryItem> {
    let axis: Vec<&String> = totals.keys().collect();
    let mut items = Vec::new();

    for (name, months) in by_category(totals) {
        let history: Vec<f64> = months
            .iter()
            .filter(|(month, _)| month.as_str() != current_month)
            .map(|(_, amount)| *amount)
            .collect();
        if history.len() < MIN_HISTORY_MONTHS {
            continue;
        }

        let stats = ThresholdTrim::apply(&history);

        let series = axis
            .iter()
            .map(|month| {
                let amount = months.get(*month).copied().unwrap_or(0.0);
                MonthBudget {
                    month: month.to_string(),
                    year: year_of(month).to_string(),
                    amount: round_money(amount),
                    percent_of_average: round_money(percent_of(amount, stats.average)),
                    over_budget: over_budget == OverBudget::Flag && amount > stats.average,
                }
            })
            .collect();

        items.push(BudgetHistoryItem {
            category: name,
            average: round_money(stats.average),
            average_excluding_extremes: round_money(stats.average_excluding_extremes),
            months: series,
        });
    }

    items
}

/// Spending history per expense category
pub fn budget_history(ctx: &ReportContext) -> Vec<BudgetHistoryItem> {
    build(ctx.expenses(), &ctx.current_month, OverBudget::Flag)
}

/// Income history per income source. Income is never flagged over budget.
pub fn income_history(ctx: &ReportContext) -> Vec<BudgetHistoryItem> {
    build(ctx.income(), &ctx.current_month, OverBudget::Never)
}

/// Spending history per tier, with unassigned categories as their own tier
pub fn tier_history(ctx: &ReportContext) -> Vec<BudgetHistoryItem> {
    let rolled = rollup(ctx.expenses(), &ctx.settings);
    build(&rolled, &ctx.current_month, OverBudget::Flag)
}
