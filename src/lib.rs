//! # Monthly Balances
//!
//! A batch processor that reads customer transactions and reports, for every
//! customer and calendar month, the minimum, maximum and ending running
//! balance.
//!
//! ## Design Principles
//!
//! - **Integer minor units**: amounts are `i64`, no floating point
//! - **Skip, don't abort**: malformed rows are logged and dropped
//! - **Chronological folding**: same-day credits fold before debits
//! - **Deterministic output**: rows sorted by customer, year, month
//!
//! ## Example
//!
//! ```
//! use monthly_balances::{build_rows, format_lines, AggregatorConfig, LedgerStore};
//! use std::io::Cursor;
//!
//! let csv = "C231,11/01/2022,40000\nC231,11/15/2022,-39384\n";
//! let store = LedgerStore::from_csv(Cursor::new(csv), &AggregatorConfig::default()).unwrap();
//! let lines = format_lines(&build_rows(&store));
//! assert_eq!(lines, vec!["C231,11/2022,616,40000,616"]);
//! ```

pub mod config;
pub mod date;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod report;
pub mod transaction;

pub use config::{AggregatorConfig, BalanceMode};
pub use date::CalendarDate;
pub use engine::LedgerStore;
pub use error::{ConfigError, EngineError, RecordError, Result};
pub use ledger::{CustomerLedger, MonthlyBalance, YearMonth};
pub use report::{build_rows, format_lines, write_report, OutputRow};
pub use transaction::{parse_transactions, read_records, read_transactions, Transaction};
