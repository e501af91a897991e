//! Ledger query service boundary
//!
//! Reports never talk to hledger directly; they receive whatever a
//! [`LedgerSource`] returns for an optional `[start, end)` bound.

pub mod hledger;
pub mod memory;

pub use hledger::HledgerCli;
pub use memory::InMemoryLedger;

use crate::error::MintedResult;
use crate::models::{AccountBalance, DateRange, Transaction};

/// Source of account balances and transactions
///
/// Implementations are fallible (process failure, malformed payload) and are
/// not retried by callers.
pub trait LedgerSource: Send + Sync {
    /// Balance of every account, restricted to the range when one is given
    fn accounts(&self, range: Option<&DateRange>) -> MintedResult<Vec<AccountBalance>>;

    /// Every transaction, restricted to the range when one is given
    fn transactions(&self, range: Option<&DateRange>) -> MintedResult<Vec<Transaction>>;
}
