//! Monthly aggregation
//!
//! Buckets postings into the intermediate maps every report is built from:
//! `month -> category -> amount` for one account kind, and running balances
//! for the net worth series.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{AccountKind, Transaction};

/// `month -> category -> amount`, both levels ordered by key
pub type MonthlyTotals = BTreeMap<String, BTreeMap<String, f64>>;

/// Sum presentation amounts per (month, category) for postings of one kind
pub fn monthly_by_category(transactions: &[Transaction], kind: &AccountKind) -> MonthlyTotals {
    let mut totals = MonthlyTotals::new();

    for txn in transactions {
        let mut postings = txn.postings_of(kind).peekable();
        if postings.peek().is_none() {
            continue;
        }

        let month = totals.entry(txn.month()).or_default();
        for posting in postings {
            *month.entry(posting.category().to_string()).or_insert(0.0) +=
                posting.presentation_amount();
        }
    }

    totals
}

/// Pivot to `category -> month -> amount`
pub fn by_category(totals: &MonthlyTotals) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut pivot: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for (month, categories) in totals {
        for (category, amount) in categories {
            pivot
                .entry(category.clone())
                .or_default()
                .insert(month.clone(), *amount);
        }
    }
    pivot
}

/// Sum presentation amounts per category across every month
pub fn totals_by_category(transactions: &[Transaction], kind: &AccountKind) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for posting in transactions.iter().flat_map(|txn| txn.postings_of(kind)) {
        *totals.entry(posting.category().to_string()).or_insert(0.0) +=
            posting.presentation_amount();
    }
    totals
}

/// Balance-sheet totals after all transactions of one date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetWorthStep {
    pub date: NaiveDate,
    pub assets: f64,
    /// Liabilities as a positive magnitude
    pub liabilities: f64,
}

impl NetWorthStep {
    pub fn net_worth(&self) -> f64 {
        self.assets - self.liabilities
    }
}

/// Transactions in date order; same-date transactions keep their input order
fn in_date_order(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|txn| txn.date);
    ordered
}

/// Running per-account balances, recorded at every date that has a transaction.
///
/// Dates without activity are not interpolated.
pub fn running_net_worth(transactions: &[Transaction]) -> Vec<NetWorthStep> {
    let mut balances: BTreeMap<&str, (AccountKind, f64)> = BTreeMap::new();
    let mut steps: Vec<NetWorthStep> = Vec::new();

    for txn in in_date_order(transactions) {
        for posting in txn.postings.iter().filter(|p| p.kind().is_balance_sheet()) {
            balances
                .entry(posting.account.as_str())
                .or_insert_with(|| (posting.kind().clone(), 0.0))
                .1 += posting.amount;
        }

        let (assets, liabilities) =
            balances
                .values()
                .fold((0.0, 0.0), |(assets, liabilities), (kind, balance)| match kind {
                    AccountKind::Assets => (assets + balance, liabilities),
                    _ => (assets, liabilities + kind.presentation_amount(*balance)),
                });

        let step = NetWorthStep {
            date: txn.date,
            assets,
            liabilities,
        };
        match steps.last_mut() {
            Some(last) if last.date == txn.date => *last = step,
            _ => steps.push(step),
        }
    }

    steps
}

/// Running raw balance of a single account, one point per active date
pub fn running_balance(transactions: &[Transaction], account: &str) -> Vec<(NaiveDate, f64)> {
    let mut balance = 0.0;
    let mut points: Vec<(NaiveDate, f64)> = Vec::new();

    for txn in in_date_order(transactions) {
        let mut touched = false;
        for posting in txn.postings.iter().filter(|p| p.account == account) {
            balance += posting.amount;
            touched = true;
        }
        if !touched {
            continue;
        }
        match points.last_mut() {
            Some(last) if last.0 == txn.date => last.1 = balance,
            _ => points.push((txn.date, balance)),
        }
    }

    points
}
