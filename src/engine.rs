//! Balance aggregation engine.
//!
//! Aggregation runs in two passes over a [`LedgerStore`]:
//!
//! 1. **Grouping** files each transaction under its customer, creating the
//!    ledger the first time a customer is seen.
//! 2. **Folding** sorts every ledger chronologically and computes its monthly
//!    min, max and ending balances.
//!
//! The store is an owned value created per run. It is mutated in place through
//! `&mut self`, so there is no shared state and no copy-and-write-back.

use crate::config::AggregatorConfig;
use crate::error::Result;
use crate::ledger::{CustomerLedger, MonthlyBalance};
use crate::transaction::{read_transactions, Transaction};
use log::debug;
use std::collections::HashMap;
use std::io::Read;

/// All customer ledgers for one run, keyed by customer ID.
///
/// Iteration order is unspecified; reports compute their own ordering.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    ledgers: HashMap<String, CustomerLedger>,
}

impl LedgerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        LedgerStore {
            ledgers: HashMap::new(),
        }
    }

    /// Runs both passes over `transactions` into a fresh store.
    pub fn aggregate<I>(transactions: I, config: &AggregatorConfig) -> Self
    where
        I: IntoIterator<Item = Transaction>,
    {
        let mut store = LedgerStore::new();
        store.group(transactions);
        store.fold(config);
        store
    }

    /// Reads, parses and aggregates a whole CSV input.
    pub fn from_csv<R: Read>(reader: R, config: &AggregatorConfig) -> Result<Self> {
        let transactions = read_transactions(reader)?;
        Ok(Self::aggregate(transactions, config))
    }

    /// Grouping pass: files every transaction in arrival order.
    pub fn group<I>(&mut self, transactions: I)
    where
        I: IntoIterator<Item = Transaction>,
    {
        for tx in transactions {
            self.record(tx);
        }
    }

    /// Files a single transaction under its customer.
    pub fn record(&mut self, tx: Transaction) {
        self.ledgers
            .entry(tx.customer_id.clone())
            .or_insert_with_key(|customer_id| {
                debug!("Creating ledger for customer {}", customer_id);
                CustomerLedger::new(customer_id.as_str())
            })
            .push(tx);
    }

    /// Folding pass: recomputes the monthly balances of every ledger.
    pub fn fold(&mut self, config: &AggregatorConfig) {
        debug!(
            "Folding {} ledgers with balance mode {}",
            self.ledgers.len(),
            config.mode
        );
        for ledger in self.ledgers.values_mut() {
            ledger.fold(config.mode);
        }
    }

    /// Looks up one customer-month.
    pub fn balance(&self, customer_id: &str, year: u16, month: u8) -> Option<&MonthlyBalance> {
        self.ledgers.get(customer_id)?.balance(year, month)
    }

    pub fn ledger(&self, customer_id: &str) -> Option<&CustomerLedger> {
        self.ledgers.get(customer_id)
    }

    /// All ledgers, in no particular order.
    pub fn ledgers(&self) -> impl Iterator<Item = &CustomerLedger> {
        self.ledgers.values()
    }

    /// Number of distinct customers.
    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }
}
