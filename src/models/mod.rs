//! Core data models for Minted
//!
//! Postings, transactions and account balances as handed over by the ledger
//! query service, plus the numeric and date conventions every report shares.

pub mod account;
pub mod amount;
pub mod period;
pub mod transaction;

pub use account::{classify, extract_subcategory, AccountBalance, AccountKind, AccountPath};
pub use amount::{normalize, percent_of, round_money, Quantity};
pub use period::{month_of, DateRange};
pub use transaction::{Posting, Transaction};
