//! Monthly income/expense metrics and the balance sheet summary

use std::collections::BTreeMap;

use serde::Serialize;

use super::ReportContext;
use crate::models::{round_money, AccountKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMetrics {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    /// Percentage of income saved, 0 for months without income
    pub savings_rate: f64,
}

/// Balance sheet totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_assets: f64,
    /// Positive magnitude
    pub total_liabilities: f64,
    pub net_worth: f64,
}

/// Income and spending per month, sorted by month
pub fn monthly_metrics(ctx: &ReportContext) -> Vec<MonthlyMetrics> {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for txn in &ctx.transactions {
        for posting in &txn.postings {
            match posting.kind() {
                AccountKind::Income => {
                    months.entry(txn.month()).or_default().0 += posting.presentation_amount();
                }
                AccountKind::Expenses => {
                    months.entry(txn.month()).or_default().1 += posting.presentation_amount();
                }
                _ => {}
            }
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expenses))| {
            let savings = income - expenses;
            let savings_rate = if income > 0.0 {
                savings / income * 100.0
            } else {
                0.0
            };
            MonthlyMetrics {
                month,
                income: round_money(income),
                expenses: round_money(expenses),
                savings: round_money(savings),
                savings_rate: round_money(savings_rate),
            }
        })
        .collect()
}

/// Totals over the context's account balances
pub fn summary(ctx: &ReportContext) -> Summary {
    let mut assets = 0.0;
    let mut liabilities = 0.0;

    for account in &ctx.accounts {
        match account.kind() {
            AccountKind::Assets => assets += account.balance,
            AccountKind::Liabilities => {
                liabilities += account.kind().presentation_amount(account.balance)
            }
            _ => {}
        }
    }

    Summary {
        total_assets: round_money(assets),
        total_liabilities: round_money(liabilities),
        net_worth: round_money(assets - liabilities),
    }
}
