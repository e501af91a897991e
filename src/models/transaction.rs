//! Transaction model
//!
//! Transactions are read-only values fetched from the ledger for one report
//! computation or one cache rebuild.

use chrono::NaiveDate;
use serde::Serialize;

use super::account::{classify, extract_subcategory, AccountKind, AccountPath};
use super::period::month_of;

/// One leg of a transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Posting {
    pub account: String,
    /// Raw ledger amount (first commodity only)
    pub amount: f64,
    pub comment: String,
    #[serde(skip)]
    pub path: AccountPath,
}

impl Posting {
    pub fn new(account: impl Into<String>, amount: f64) -> Self {
        let account = account.into();
        let path = classify(&account);
        Self {
            account,
            amount,
            comment: String::new(),
            path,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn kind(&self) -> &AccountKind {
        &self.path.kind
    }

    pub fn category(&self) -> &str {
        &self.path.category
    }

    /// Account name cut `depth` levels below the category
    pub fn subcategory(&self, depth: usize) -> String {
        extract_subcategory(&self.path, &self.account, depth)
    }

    /// Amount with the sign convention for display applied
    pub fn presentation_amount(&self) -> f64 {
        self.path.kind.presentation_amount(self.amount)
    }
}

/// A dated ledger transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub postings: Vec<Posting>,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            description: description.into(),
            postings: Vec::new(),
        }
    }

    /// Builder-style helper for appending a posting
    pub fn with_posting(mut self, account: impl Into<String>, amount: f64) -> Self {
        self.postings.push(Posting::new(account, amount));
        self
    }

    /// `YYYY-MM` month of the transaction date
    pub fn month(&self) -> String {
        month_of(self.date)
    }

    /// Postings of one account kind
    pub fn postings_of<'a>(&'a self, kind: &'a AccountKind) -> impl Iterator<Item = &'a Posting> + 'a {
        self.postings.iter().filter(move |p| p.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_is_classified_once() {
        let posting = Posting::new("expenses:Dining:Lunch", 12.5);
        assert_eq!(posting.kind(), &AccountKind::Expenses);
        assert_eq!(posting.category(), "Dining");
        assert_eq!(posting.subcategory(1), "Dining:Lunch");
    }

    #[test]
    fn test_transaction_month_and_filter() {
        let txn = Transaction::new(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(), "Paycheck")
            .with_posting("assets:Checking", 2000.0)
            .with_posting("income:Salary", -2000.0);

        assert_eq!(txn.month(), "2024-03");
        assert_eq!(txn.postings_of(&AccountKind::Income).count(), 1);
        assert_eq!(
            txn.postings_of(&AccountKind::Income).next().unwrap().presentation_amount(),
            2000.0
        );
    }

    #[test]
    fn test_serializes_iso_date() {
        let txn = Transaction::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), "Coffee")
            .with_posting("expenses:Dining", 4.0);
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["date"], "2024-01-02");
        assert_eq!(json["postings"][0]["account"], "expenses:Dining");
    }
}
