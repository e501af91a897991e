//! Reports module for Minted
//!
//! Every view is a pure function of a [`ReportContext`]. The cached path
//! builds a context over all history and keeps the resulting
//! [`ReportBundle`]; the filtered path builds a context over a date range and
//! hands the single requested report straight back.

pub mod budget;
pub mod detail;
pub mod history;
pub mod metrics;
pub mod net_worth;
pub mod spending;
pub mod trends;

pub use budget::{budget_vs_actual, BudgetItem};
pub use detail::{AccountDetail, BalancePoint, Breakdown, CategoryDetail, IncomeDetail, TierDetail};
pub use history::{budget_history, income_history, tier_history, BudgetHistoryItem, MonthBudget};
pub use metrics::{monthly_metrics, summary, MonthlyMetrics, Summary};
pub use net_worth::{net_worth_over_time, NetWorthPoint};
pub use spending::{category_spending, income_breakdown, CategorySpending};
pub use trends::{category_trends, year_over_year, CategoryTrend, MonthAmount, YearOverYear};

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{monthly_by_category, MonthlyTotals};
use crate::config::Settings;
use crate::models::{month_of, AccountBalance, AccountKind, DateRange, Transaction};

/// Inputs shared by every report builder
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub transactions: Vec<Transaction>,
    pub accounts: Vec<AccountBalance>,
    pub settings: Arc<Settings>,
    /// In-progress month, left out of every average
    pub current_month: String,
    expenses: MonthlyTotals,
    income: MonthlyTotals,
}

impl ReportContext {
    /// Build a context. Transactions outside `range` are dropped here as
    /// well, whatever the ledger source already did.
    pub fn new(
        transactions: Vec<Transaction>,
        accounts: Vec<AccountBalance>,
        settings: Arc<Settings>,
        today: NaiveDate,
        range: Option<DateRange>,
    ) -> Self {
        let transactions: Vec<Transaction> = match range {
            Some(range) => transactions
                .into_iter()
                .filter(|txn| range.contains(txn.date))
                .collect(),
            None => transactions,
        };

        let expenses = monthly_by_category(&transactions, &AccountKind::Expenses);
        let income = monthly_by_category(&transactions, &AccountKind::Income);

        Self {
            transactions,
            accounts,
            settings,
            current_month: month_of(today),
            expenses,
            income,
        }
    }

    /// `month -> category -> spending`
    pub fn expenses(&self) -> &MonthlyTotals {
        &self.expenses
    }

    /// `month -> source -> income`, as positive amounts
    pub fn income(&self) -> &MonthlyTotals {
        &self.income
    }
}

/// Every report output for one transaction set
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBundle {
    pub accounts: Vec<AccountBalance>,
    pub transactions: Vec<Transaction>,
    pub budget: Vec<BudgetItem>,
    pub budget_history: Vec<BudgetHistoryItem>,
    pub income_history: Vec<BudgetHistoryItem>,
    pub tier_history: Vec<BudgetHistoryItem>,
    pub monthly_metrics: Vec<MonthlyMetrics>,
    pub category_spending: Vec<CategorySpending>,
    pub income_breakdown: Vec<CategorySpending>,
    pub net_worth_over_time: Vec<NetWorthPoint>,
    pub category_trends: Vec<CategoryTrend>,
    pub year_over_year: Vec<YearOverYear>,
    pub summary: Summary,
}

impl ReportBundle {
    /// Run every builder over one context
    pub fn build(ctx: &ReportContext) -> Self {
        Self {
            accounts: ctx.accounts.clone(),
            transactions: ctx.transactions.clone(),
            budget: budget_vs_actual(ctx),
            budget_history: budget_history(ctx),
            income_history: income_history(ctx),
            tier_history: tier_history(ctx),
            monthly_metrics: monthly_metrics(ctx),
            category_spending: category_spending(ctx),
            income_breakdown: income_breakdown(ctx),
            net_worth_over_time: net_worth_over_time(ctx),
            category_trends: category_trends(ctx),
            year_over_year: year_over_year(ctx),
            summary: summary(ctx),
        }
    }
}
