//! Budget vs. actual
//!
//! Compares the current month's spending per category with that category's
//! IQR-trimmed historical average.

use serde::Serialize;

use super::ReportContext;
use crate::aggregate::monthly::by_category;
use crate::aggregate::IqrTrim;
use crate::models::{percent_of, round_money};

/// Categories need this many completed months before they are budgeted
pub const MIN_HISTORY_MONTHS: usize = 2;

/// One category row of the budget report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub category: String,
    /// Spending so far in the current month
    pub current_month: f64,
    /// Historical monthly average after the IQR trim
    pub average: f64,
    /// `current_month - average`
    pub difference: f64,
    pub percent_of_average: f64,
    pub over_budget: bool,
    /// Completed months the average was computed from
    pub history_months: usize,
}

/// Build the budget report, sorted by category name
pub fn budget_vs_actual(ctx: &ReportContext) -> Vec<BudgetItem> {
    let mut items = Vec::new();

    for (category, months) in by_category(ctx.expenses()) {
        let history: Vec<f64> = months
            .iter()
            .filter(|(month, _)| **month != ctx.current_month)
            .map(|(_, amount)| *amount)
            .collect();
        if history.len() < MIN_HISTORY_MONTHS {
            continue;
        }

        let current = months.get(&ctx.current_month).copied().unwrap_or(0.0);
        let average = IqrTrim::average(&history);

        items.push(BudgetItem {
            category,
            current_month: round_money(current),
            average: round_money(average),
            difference: round_money(current - average),
            percent_of_average: round_money(percent_of(current, average)),
            over_budget: current > average,
            history_months: history.len(),
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_category_without_history_is_left_out() {
        let ctx = context(vec![
            spend(2024, 4, "expenses:Hobbies", 30.0),
            spend(2024, 6, "expenses:Hobbies", 500.0),
            spend(2024, 4, "expenses:Groceries", 100.0),
            spend(2024, 5, "expenses:Groceries", 120.0),
        ]);

        let items = budget_vs_actual(&ctx);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "Groceries");
        assert_eq!(items[0].current_month, 0.0);
        assert_eq!(items[0].average, 110.0);
        assert_eq!(items[0].difference, -110.0);
        assert!(!items[0].over_budget);
    }

    #[test]
    fn test_average_ignores_current_month_and_spikes() {
        let mut txns: Vec<_> = (1..=4)
            .map(|m| spend(2024, m, "expenses:Dining", 100.0))
            .collect();
        txns.push(spend(2024, 5, "expenses:Dining", 1000.0));
        txns.push(spend(2024, 6, "expenses:Dining", 150.0));

        let items = budget_vs_actual(&context(txns));
        let dining = &items[0];
        assert_eq!(dining.history_months, 5);
        assert_eq!(dining.average, 100.0);
        assert_eq!(dining.current_month, 150.0);
        assert_eq!(dining.difference, 50.0);
        assert_eq!(dining.percent_of_average, 150.0);
        assert!(dining.over_budget);
    }

    #[test]
    fn test_sorted_by_category() {
        let txns = vec![
            spend(2024, 1, "expenses:Zoo", 1.0),
            spend(2024, 2, "expenses:Zoo", 1.0),
            spend(2024, 1, "expenses:Art", 1.0),
            spend(2024, 2, "expenses:Art", 1.0),
        ];
        let names: Vec<_> = budget_vs_actual(&context(txns))
            .into_iter()
            .map(|item| item.category)
            .collect();
        assert_eq!(names, vec!["Art", "Zoo"]);
    }
}
