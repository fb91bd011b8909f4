//! Per-customer ledger and monthly balance model.
//!
//! A ledger keeps the customer's raw transactions in arrival order until it is
//! folded. Folding sorts them chronologically and accumulates one
//! [`MonthlyBalance`] per `(year, month)` bucket.

use crate::config::BalanceMode;
use crate::transaction::Transaction;
use log::debug;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// `(year, month)` key of a monthly bucket.
pub type YearMonth = (u16, u8);

/// Running balance statistics for one customer-month.
///
/// # Invariants
///
/// - Before any fold, `min_balance` holds `i64::MAX` and `max_balance` holds
///   `i64::MIN`, so the first fold sets both.
/// - After at least one fold, `min_balance <= max_balance`, and both are the
///   extremes of the running balances seen after each fold.
/// - `ending_balance` is the last running balance, not an extreme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyBalance {
    pub min_balance: i64,
    pub max_balance: i64,
    pub ending_balance: i64,
}

impl MonthlyBalance {
    /// An empty bucket accumulating from zero.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// An empty bucket accumulating from `opening`.
    pub fn starting_at(opening: i64) -> Self {
        MonthlyBalance {
            min_balance: i64::MAX,
            max_balance: i64::MIN,
            ending_balance: opening,
        }
    }

    /// Adds `amount` to the running balance and widens min/max to cover it.
    ///
    /// The sum saturates at the `i64` bounds instead of overflowing.
    pub fn fold(&mut self, amount: i64) {
        self.ending_balance = self.ending_balance.saturating_add(amount);
        if self.ending_balance > self.max_balance {
            self.max_balance = self.ending_balance;
        }
        if self.ending_balance < self.min_balance {
            self.min_balance = self.ending_balance;
        }
    }
}

impl Default for MonthlyBalance {
    fn default() -> Self {
        Self::new()
    }
}

/// One customer's transaction history and derived monthly balances.
#[derive(Debug, Clone)]
pub struct CustomerLedger {
    customer_id: String,
    transactions: Vec<Transaction>,
    months: BTreeMap<YearMonth, MonthlyBalance>,
}

impl CustomerLedger {
    pub fn new(customer_id: impl Into<String>) -> Self {
        CustomerLedger {
            customer_id: customer_id.into(),
            transactions: Vec::new(),
            months: BTreeMap::new(),
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Appends a transaction in arrival order.
    pub fn push(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Transactions held by this ledger; chronological once folded.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Sorts the transactions and recomputes every monthly bucket.
    ///
    /// Order is by date, and on the same date the larger amount comes first
    /// so credits land before debits. Existing buckets are discarded, which
    /// makes repeated folds give the same result.
    pub fn fold(&mut self, mode: BalanceMode) {
        self.transactions.sort_by_key(|tx| (tx.date, Reverse(tx.amount)));
        self.months.clear();

        let mut carried = 0i64;
        for tx in &self.transactions {
            let opening = match mode {
                BalanceMode::Reset => 0,
                BalanceMode::CarryForward => carried,
            };
            let bucket = self
                .months
                .entry(tx.date.year_month())
                .or_insert_with(|| MonthlyBalance::starting_at(opening));
            bucket.fold(tx.amount);
            carried = bucket.ending_balance;
        }

        for ((year, month), balance) in &self.months {
            debug!(
                "Folded {}/{} for customer {}: min {} max {} ending {}",
                month,
                year,
                self.customer_id,
                balance.min_balance,
                balance.max_balance,
                balance.ending_balance
            );
        }
    }

    /// Balance for a single month, if the customer had activity in it.
    pub fn balance(&self, year: u16, month: u8) -> Option<&MonthlyBalance> {
        self.months.get(&(year, month))
    }

    /// Monthly buckets in chronological order.
    pub fn months(&self) -> impl Iterator<Item = (YearMonth, &MonthlyBalance)> {
        self.months.iter().map(|(key, balance)| (*key, balance))
    }
}
