//! Spending by category and income breakdown

use serde::Serialize;

use super::ReportContext;
use crate::aggregate::monthly::totals_by_category;
use crate::models::{round_money, AccountKind};

/// Month label used by the income breakdown, which is not split by month
pub const WHOLE_PERIOD: &str = "period";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub month: String,
    pub category: String,
    pub amount: f64,
}

/// Spending per (month, category), sorted by month then category
pub fn category_spending(ctx: &ReportContext) -> Vec<CategorySpending> {
    ctx.expenses()
        .iter()
        .flat_map(|(month, categories)| {
            categories.iter().map(move |(category, amount)| CategorySpending {
                month: month.clone(),
                category: category.clone(),
                amount: round_money(*amount),
            })
        })
        .collect()
}

/// Income per source over the whole context, sorted by source
pub fn income_breakdown(ctx: &ReportContext) -> Vec<CategorySpending> {
    totals_by_category(&ctx.transactions, &AccountKind::Income)
        .into_iter()
        .map(|(category, amount)| CategorySpending {
            month: WHOLE_PERIOD.to_string(),
            category,
            amount: round_money(amount),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_category_spending_order() {
        let ctx = context(vec![
            spend(2024, 2, "expenses:Dining", 12.346),
            spend(2024, 1, "expenses:Rent", 900.0),
            spend(2024, 1, "expenses:Groceries:Market", 40.0),
            spend(2024, 1, "expenses:Groceries", 2.5),
        ]);

        let rows = category_spending(&ctx);
        let keys: Vec<_> = rows
            .iter()
            .map(|r| (r.month.as_str(), r.category.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2024-01", "Groceries"),
                ("2024-01", "Rent"),
                ("2024-02", "Dining"),
            ]
        );
        assert_eq!(rows[0].amount, 42.5);
        assert_eq!(rows[2].amount, 12.35);
    }

    #[test]
    fn test_income_breakdown_single_period() {
        let ctx = context(vec![
            earn(2024, 1, "income:Salary", 1000.0),
            earn(2024, 2, "income:Salary", 1000.0),
            earn(2024, 2, "income:Interest", 4.2),
        ]);

        let rows = income_breakdown(&ctx);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Interest");
        assert_eq!(rows[1].amount, 2000.0);
        assert!(rows.iter().all(|r| r.month == WHOLE_PERIOD));
    }
}
