//! Per-entity detail views
//!
//! Each detail narrows the context to the transactions touching one
//! category, tier, account or income source and breaks the amounts down by
//! name. A name that matches nothing is a `NotFound` error, so an entity with
//! no activity in the range is still distinguishable from one that does not
//! exist.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::history::{budget_history, income_history, BudgetHistoryItem};
use super::ReportContext;
use crate::aggregate::monthly::running_balance;
use crate::aggregate::tier_of;
use crate::error::{MintedError, MintedResult};
use crate::models::{round_money, AccountKind, Posting, Transaction};

/// One named share of a detail total
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    pub category: String,
    pub transactions: Vec<Transaction>,
    pub budget_history: Vec<BudgetHistoryItem>,
    /// Spending per subcategory at the configured depth
    pub breakdown: Vec<Breakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDetail {
    pub tier: String,
    pub color: String,
    pub categories: Vec<String>,
    pub transactions: Vec<Transaction>,
    pub budget_history: Vec<BudgetHistoryItem>,
    /// Spending per member category
    pub breakdown: Vec<Breakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    pub account: String,
    pub transactions: Vec<Transaction>,
    pub balance_history: Vec<BalancePoint>,
    /// Raw amounts of the other legs, per counterpart account
    pub breakdown: Vec<Breakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDetail {
    pub income: String,
    pub transactions: Vec<Transaction>,
    pub income_history: Vec<BudgetHistoryItem>,
    /// Income per sub-source at the configured depth
    pub breakdown: Vec<Breakdown>,
}

/// Sorted descending by amount; equal amounts keep name order
fn into_breakdown(totals: BTreeMap<String, f64>) -> Vec<Breakdown> {
    let mut rows: Vec<Breakdown> = totals
        .into_iter()
        .map(|(name, amount)| Breakdown { name, amount })
        .collect();
    rows.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    for row in &mut rows {
        row.amount = round_money(row.amount);
    }
    rows
}

/// Transactions with at least one matching posting, and the presentation
/// amounts of those postings summed under `key`
fn collect<M, K>(ctx: &ReportContext, matches: M, key: K) -> (Vec<Transaction>, BTreeMap<String, f64>)
where
    M: Fn(&Posting) -> bool,
    K: Fn(&Posting) -> String,
{
    let mut transactions = Vec::new();
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();

    for txn in &ctx.transactions {
        let mut hit = false;
        for posting in txn.postings.iter().filter(|p| matches(p)) {
            *totals.entry(key(posting)).or_insert(0.0) += posting.presentation_amount();
            hit = true;
        }
        if hit {
            transactions.push(txn.clone());
        }
    }

    (transactions, totals)
}

/// Whether any known account or posting is `kind:name`
fn has_category(ctx: &ReportContext, kind: &AccountKind, name: &str) -> bool {
    ctx.accounts
        .iter()
        .any(|a| a.path.is(kind) && a.path.category == name)
        || ctx
            .transactions
            .iter()
            .flat_map(|txn| &txn.postings)
            .any(|p| p.kind() == kind && p.category() == name)
}

impl CategoryDetail {
    pub fn generate(ctx: &ReportContext, category: &str) -> MintedResult<Self> {
        if !has_category(ctx, &AccountKind::Expenses, category) {
            return Err(MintedError::category_not_found(category));
        }

        let depth = ctx.settings.subcategory_depth;
        let (transactions, totals) = collect(
            ctx,
            |p| p.kind() == &AccountKind::Expenses && p.category() == category,
            |p| p.subcategory(depth),
        );

        let budget_history = budget_history(ctx)
            .into_iter()
            .filter(|item| item.category == category)
            .collect();

        Ok(Self {
            category: category.to_string(),
            transactions,
            budget_history,
            breakdown: into_breakdown(totals),
        })
    }
}

impl TierDetail {
    pub fn generate(ctx: &ReportContext, tier: &str) -> MintedResult<Self> {
        let settings = &ctx.settings;
        let config = settings
            .find_tier(tier)
            .ok_or_else(|| MintedError::tier_not_found(tier))?;

        // Categories listed under an earlier tier belong to that tier instead
        let in_tier = |category: &str| tier_of(settings, category).map_or(false, |t| t.name == tier);

        let (transactions, totals) = collect(
            ctx,
            |p| p.kind() == &AccountKind::Expenses && in_tier(p.category()),
            |p| p.category().to_string(),
        );

        let budget_history = budget_history(ctx)
            .into_iter()
            .filter(|item| in_tier(item.category.as_str()))
            .collect();

        Ok(Self {
            tier: config.name.clone(),
            color: config.color.clone(),
            categories: config
                .categories
                .iter()
                .filter(|category| in_tier(category.as_str()))
                .cloned()
                .collect(),
            transactions,
            budget_history,
            breakdown: into_breakdown(totals),
        })
    }
}

impl AccountDetail {
    pub fn generate(ctx: &ReportContext, account: &str) -> MintedResult<Self> {
        let known = ctx.accounts.iter().any(|a| a.name == account)
            || ctx
                .transactions
                .iter()
                .flat_map(|txn| &txn.postings)
                .any(|p| p.account == account);
        if !known {
            return Err(MintedError::account_not_found(account));
        }

        let mut transactions = Vec::new();
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for txn in &ctx.transactions {
            if !txn.postings.iter().any(|p| p.account == account) {
                continue;
            }
            for other in txn.postings.iter().filter(|p| p.account != account) {
                *totals.entry(other.account.clone()).or_insert(0.0) += other.amount;
            }
            transactions.push(txn.clone());
        }

        let balance_history = running_balance(&ctx.transactions, account)
            .into_iter()
            .map(|(date, balance)| BalancePoint {
                date,
                balance: round_money(balance),
            })
            .collect();

        Ok(Self {
            account: account.to_string(),
            transactions,
            balance_history,
            breakdown: into_breakdown(totals),
        })
    }
}

impl IncomeDetail {
    pub fn generate(ctx: &ReportContext, income: &str) -> MintedResult<Self> {
        if !has_category(ctx, &AccountKind::Income, income) {
            return Err(MintedError::income_not_found(income));
        }

        let depth = ctx.settings.subcategory_depth;
        let (transactions, totals) = collect(
            ctx,
            |p| p.kind() == &AccountKind::Income && p.category() == income,
            |p| p.subcategory(depth),
        );

        let income_history = income_history(ctx)
            .into_iter()
            .filter(|item| item.category == income)
            .collect();

        Ok(Self {
            income: income.to_string(),
            transactions,
            income_history,
            breakdown: into_breakdown(totals),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::config::{Settings, Tier};
    use crate::models::AccountBalance;
    use std::sync::Arc;

    fn sample() -> Vec<Transaction> {
        vec![
            spend(2024, 1, "expenses:Groceries:Market", 60.0),
            spend(2024, 1, "expenses:Groceries:Bakery", 15.0),
            spend(2024, 2, "expenses:Groceries:Market", 40.0),
            spend(2024, 2, "expenses:Dining", 25.0),
            spend(2024, 3, "expenses:Pets", 10.0),
            earn(2024, 1, "income:Salary:Base", 2000.0),
            earn(2024, 2, "income:Salary:Bonus", 500.0),
        ]
    }

    #[test]
    fn test_category_detail_breakdown() {
        let ctx = context(sample());
        let detail = CategoryDetail::generate(&ctx, "Groceries").unwrap();

        assert_eq!(detail.transactions.len(), 3);
        assert_eq!(
            detail.breakdown,
            vec![
                Breakdown { name: "Groceries:Market".into(), amount: 100.0 },
                Breakdown { name: "Groceries:Bakery".into(), amount: 15.0 },
            ]
        );
        assert_eq!(detail.budget_history.len(), 1);
        assert_eq!(detail.budget_history[0].category, "Groceries");
    }

    #[test]
    fn test_unknown_names_are_not_found() {
        let ctx = context(sample());
        assert!(CategoryDetail::generate(&ctx, "Nope").unwrap_err().is_not_found());
        assert!(TierDetail::generate(&ctx, "Nope").unwrap_err().is_not_found());
        assert!(AccountDetail::generate(&ctx, "assets:Nope").unwrap_err().is_not_found());
        assert!(IncomeDetail::generate(&ctx, "Groceries").unwrap_err().is_not_found());
    }

    #[test]
    fn test_known_account_without_activity_is_empty_not_missing() {
        let ctx = ReportContext::new(
            Vec::new(),
            vec![AccountBalance::new("expenses:Travel", 0.0, "$")],
            Arc::new(Settings::default()),
            date(2024, 6, 1),
            None,
        );
        let detail = CategoryDetail::generate(&ctx, "Travel").unwrap();
        assert!(detail.transactions.is_empty());
        assert!(detail.breakdown.is_empty());
    }

    #[test]
    fn test_tier_detail() {
        let ctx = context(sample());
        let detail = TierDetail::generate(&ctx, "Discretionary").unwrap();

        assert_eq!(detail.color, "#e74c3c");
        assert_eq!(detail.transactions.len(), 1);
        assert_eq!(detail.breakdown, vec![Breakdown { name: "Dining".into(), amount: 25.0 }]);
        assert!(detail.budget_history.is_empty());
    }

    #[test]
    fn test_tier_detail_drops_categories_claimed_earlier() {
        let mut settings = Settings::default();
        settings.tiers = vec![
            Tier::new("Food", "#f39c12").with_categories(["Groceries"]),
            Tier::new("Essential", "#27ae60").with_categories(["Groceries", "Pets"]),
        ];
        let ctx = ReportContext::new(sample(), Vec::new(), Arc::new(settings), date(2024, 6, 15), None);

        let detail = TierDetail::generate(&ctx, "Essential").unwrap();
        assert_eq!(detail.categories, vec!["Pets"]);
        assert_eq!(detail.breakdown, vec![Breakdown { name: "Pets".into(), amount: 10.0 }]);
        assert_eq!(detail.transactions.len(), 1);
    }

    #[test]
    fn test_account_detail_balance_history() {
        let ctx = context(sample());
        let detail = AccountDetail::generate(&ctx, "assets:Checking").unwrap();

        assert_eq!(detail.transactions.len(), 7);
        let first = &detail.balance_history[0];
        assert_eq!(first.date, date(2024, 1, 1));
        assert_eq!(first.balance, 2000.0);
        assert_eq!(detail.balance_history.last().unwrap().balance, 2350.0);
        assert_eq!(detail.breakdown[0].name, "expenses:Groceries:Market");
        assert_eq!(detail.breakdown[0].amount, 100.0);
    }

    #[test]
    fn test_income_detail() {
        let ctx = context(sample());
        let detail = IncomeDetail::generate(&ctx, "Salary").unwrap();

        assert_eq!(
            detail.breakdown,
            vec![
                Breakdown { name: "income:Salary:Base".into(), amount: 2000.0 },
                Breakdown { name: "income:Salary:Bonus".into(), amount: 500.0 },
            ]
        );
        assert_eq!(detail.income_history.len(), 1);
        assert!(detail.income_history[0].months.iter().all(|m| !m.over_budget));
    }
}
