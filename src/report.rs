//! Report rows and their text serialization.
//!
//! Output is one line per customer-month, ordered by customer ID (byte order),
//! then year, then month:
//!
//! ```text
//! customerID,month/year,minBalance,maxBalance,endingBalance
//! ```
//!
//! The month is not zero-padded.

use crate::engine::LedgerStore;
use crate::error::Result;
use std::fmt;
use std::io::Write;

/// One customer-month of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub customer_id: String,
    pub month: u8,
    pub year: u16,
    pub min_balance: i64,
    pub max_balance: i64,
    pub ending_balance: i64,
}

impl OutputRow {
    /// Sort key: customer ID, year, month.
    fn sort_key(&self) -> (&[u8], u16, u8) {
        (self.customer_id.as_bytes(), self.year, self.month)
    }

    /// The `month/year` column.
    pub fn period(&self) -> String {
        format!("{}/{:04}", self.month, self.year)
    }
}

impl fmt::Display for OutputRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.customer_id,
            self.period(),
            self.min_balance,
            self.max_balance,
            self.ending_balance
        )
    }
}

/// Flattens every customer-month in the store into sorted rows.
pub fn build_rows(store: &LedgerStore) -> Vec<OutputRow> {
    let mut rows: Vec<OutputRow> = store
        .ledgers()
        .flat_map(|ledger| {
            ledger.months().map(move |((year, month), balance)| OutputRow {
                customer_id: ledger.customer_id().to_string(),
                month,
                year,
                min_balance: balance.min_balance,
                max_balance: balance.max_balance,
                ending_balance: balance.ending_balance,
            })
        })
        .collect();

    rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    rows
}

/// Formats rows as text lines, without line terminators.
pub fn format_lines(rows: &[OutputRow]) -> Vec<String> {
    rows.iter().map(OutputRow::to_string).collect()
}

/// Writes each row's line verbatim, newline-terminated, in the given order.
///
/// Customer IDs are not quoted or escaped: the bytes written are exactly the
/// lines returned by [`format_lines`].
pub fn write_report<W: Write>(rows: &[OutputRow], mut writer: W) -> Result<()> {
    for row in rows {
        writeln!(writer, "{}", row)?;
    }

    writer.flush()?;
    Ok(())
}
