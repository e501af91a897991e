//! In-memory ledger source
//!
//! Serves a fixed set of transactions. Balances are derived from postings the
//! way `hledger balance` sums them. The source can be switched into a failing
//! mode and can hold callers at a gate, which makes concurrency scenarios
//! reproducible.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError, RwLock};

use super::LedgerSource;
use crate::error::{MintedError, MintedResult};
use crate::models::{AccountBalance, DateRange, Transaction};

#[derive(Debug, Default)]
struct GateState {
    closed: bool,
    waiting: usize,
}

#[derive(Debug, Default)]
struct Gate {
    state: Mutex<GateState>,
    changed: Condvar,
}

impl Gate {
    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pass(&self) {
        let mut state = self.lock();
        if !state.closed {
            return;
        }
        state.waiting += 1;
        self.changed.notify_all();
        while state.closed {
            state = self
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state.waiting -= 1;
    }
}

/// Ledger source over an in-memory transaction list
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    transactions: RwLock<Vec<Transaction>>,
    accounts: RwLock<Option<Vec<AccountBalance>>>,
    failing: AtomicBool,
    calls: AtomicUsize,
    gate: Gate,
}

impl InMemoryLedger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
            ..Self::default()
        }
    }

    /// Serve these balances for unbounded account queries instead of derived ones
    pub fn with_accounts(self, accounts: Vec<AccountBalance>) -> Self {
        *self.accounts.write().unwrap_or_else(PoisonError::into_inner) = Some(accounts);
        self
    }

    /// Replace the transaction list (simulates journal edits between refreshes)
    pub fn set_transactions(&self, transactions: Vec<Transaction>) {
        *self
            .transactions
            .write()
            .unwrap_or_else(PoisonError::into_inner) = transactions;
    }

    /// Make every following query fail with an upstream error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of queries served so far (accounts and transactions)
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Hold every following query until [`open_gate`](Self::open_gate)
    pub fn close_gate(&self) {
        self.gate.lock().closed = true;
    }

    pub fn open_gate(&self) {
        self.gate.lock().closed = false;
        self.gate.changed.notify_all();
    }

    /// Block until at least `count` callers are held at the gate
    pub fn wait_for_waiters(&self, count: usize) {
        let mut state = self.gate.lock();
        while state.waiting < count {
            state = self
                .gate
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn enter(&self) -> MintedResult<()> {
        self.gate.pass();
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(MintedError::Upstream("ledger unavailable".into()));
        }
        Ok(())
    }

    fn filtered(&self, range: Option<&DateRange>) -> Vec<Transaction> {
        let transactions = self
            .transactions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        transactions
            .iter()
            .filter(|txn| range.map_or(true, |r| r.contains(txn.date)))
            .cloned()
            .collect()
    }
}

impl LedgerSource for InMemoryLedger {
    fn accounts(&self, range: Option<&DateRange>) -> MintedResult<Vec<AccountBalance>> {
        self.enter()?;

        if range.is_none() {
            let fixed = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(accounts) = fixed.as_ref() {
                return Ok(accounts.clone());
            }
        }

        let mut balances: BTreeMap<String, f64> = BTreeMap::new();
        for txn in self.filtered(range) {
            for posting in &txn.postings {
                *balances.entry(posting.account.clone()).or_insert(0.0) += posting.amount;
            }
        }

        Ok(balances
            .into_iter()
            .map(|(name, balance)| AccountBalance::new(name, balance, "$"))
            .collect())
    }

    fn transactions(&self, range: Option<&DateRange>) -> MintedResult<Vec<Transaction>> {
        self.enter()?;
        Ok(self.filtered(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::thread;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "Open")
                .with_posting("assets:Checking", 100.0)
                .with_posting("equity:Opening", -100.0),
            Transaction::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), "Lunch")
                .with_posting("expenses:Dining", 20.0)
                .with_posting("assets:Checking", -20.0),
        ]
    }

    #[test]
    fn test_range_filtering_and_derived_balances() {
        let ledger = InMemoryLedger::new(sample());
        let range = DateRange::parse("2024-02-01", "2024-03-01").unwrap();

        assert_eq!(ledger.transactions(None).unwrap().len(), 2);
        assert_eq!(ledger.transactions(Some(&range)).unwrap().len(), 1);

        let balances = ledger.accounts(None).unwrap();
        let checking = balances.iter().find(|a| a.name == "assets:Checking").unwrap();
        assert_eq!(checking.balance, 80.0);
        assert_eq!(ledger.call_count(), 3);
    }

    #[test]
    fn test_failing_mode() {
        let ledger = InMemoryLedger::new(sample());
        ledger.set_failing(true);
        assert!(matches!(
            ledger.transactions(None),
            Err(MintedError::Upstream(_))
        ));
    }

    #[test]
    fn test_gate_holds_callers() {
        let ledger = Arc::new(InMemoryLedger::new(sample()));
        ledger.close_gate();

        let worker = {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || ledger.transactions(None).map(|t| t.len()))
        };

        ledger.wait_for_waiters(1);
        assert_eq!(ledger.call_count(), 0);
        ledger.open_gate();

        assert_eq!(worker.join().unwrap().unwrap(), 2);
    }
}
