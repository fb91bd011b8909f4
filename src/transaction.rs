//! Transaction records and the parser that turns raw input rows into them.

use crate::date::CalendarDate;
use crate::error::{RecordError, Result};
use csv::{ReaderBuilder, StringRecord};
use log::warn;
use std::io::Read;

/// A validated ledger entry.
///
/// Amounts are integer minor units: negative for debits, positive for credits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub customer_id: String,
    pub date: CalendarDate,
    pub amount: i64,
}

impl Transaction {
    /// Number of fields in an input record.
    pub const FIELD_COUNT: usize = 3;

    pub fn new(customer_id: impl Into<String>, date: CalendarDate, amount: i64) -> Self {
        Transaction {
            customer_id: customer_id.into(),
            date,
            amount,
        }
    }

    /// Validates one raw record: `customerID, MM/DD/YYYY, amount`.
    ///
    /// All fields are trimmed before validation. Empty fields, a bad date or a
    /// non-integer amount reject the record.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> std::result::Result<Self, RecordError> {
        if fields.len() != Self::FIELD_COUNT {
            return Err(RecordError::FieldCount(fields.len()));
        }

        let mut trimmed = [""; Self::FIELD_COUNT];
        for (idx, field) in fields.iter().enumerate() {
            let value = field.as_ref().trim();
            if value.is_empty() {
                return Err(RecordError::EmptyField(idx + 1));
            }
            trimmed[idx] = value;
        }
        let [customer_id, date, amount] = trimmed;

        let date = date.parse::<CalendarDate>()?;
        let amount = amount
            .parse::<i64>()
            .map_err(|_| RecordError::InvalidAmount(amount.to_string()))?;

        Ok(Transaction::new(customer_id, date, amount))
    }
}

/// Parses raw records in order, dropping the ones that fail validation.
///
/// Each rejected record is logged at warn level with its 1-based position in
/// `records`. Blank input lines are not records, so this can differ from the
/// file line number.
pub fn parse_transactions<I, S>(records: I) -> Vec<Transaction>
where
    I: IntoIterator<Item = Vec<S>>,
    S: AsRef<str>,
{
    records
        .into_iter()
        .enumerate()
        .filter_map(|(idx, record)| match Transaction::from_fields(record.as_slice()) {
            Ok(tx) => Some(tx),
            Err(e) => {
                warn!("Record {}: skipping: {}", idx + 1, e);
                None
            }
        })
        .collect()
}

/// Reads raw comma-separated records from `reader`.
///
/// The input has no header row. Rows may have any number of fields; the field
/// count is checked by the parser, not here. A row the CSV decoder itself
/// cannot read (e.g. invalid UTF-8) becomes an empty record so it is still
/// rejected and counted by the parser.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match csv_reader.read_record(&mut record) {
            Ok(true) => records.push(record.iter().map(str::to_string).collect()),
            Ok(false) => break,
            Err(e) if is_row_error(&e) => {
                match e.position() {
                    Some(pos) => warn!("Line {}: CSV decode error: {}", pos.line(), e),
                    None => warn!("Record {}: CSV decode error: {}", records.len() + 1, e),
                }
                records.push(Vec::new());
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(records)
}

/// Reads and parses every transaction from `reader`.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    Ok(parse_transactions(read_records(reader)?))
}

/// Errors confined to a single row; anything else aborts the read.
fn is_row_error(e: &csv::Error) -> bool {
    matches!(e.kind(), csv::ErrorKind::Utf8 { .. })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::str::FromStr;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_valid_record() {
        let tx = Transaction::from_fields(&["C231", "11/01/2022", "40000"]).unwrap();
        assert_eq!(tx.customer_id, "C231");
        assert_eq!(tx.date, date("11/01/2022"));
        assert_eq!(tx.amount, 40000);
    }

    #[test]
    fn test_parse_handles_whitespace() {
        let tx = Transaction::from_fields(&[" C231 ", " 11/15/2022", "  -39384  "]).unwrap();
        assert_eq!(tx.customer_id, "C231");
        assert_eq!(tx.amount, -39384);
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        assert_eq!(
            Transaction::from_fields(&["C1", "01/01/2022"]),
            Err(RecordError::FieldCount(2))
        );
        assert_eq!(
            Transaction::from_fields(&["C1", "01/01/2022", "10", "x"]),
            Err(RecordError::FieldCount(4))
        );
    }

    #[test]
    fn test_rejects_empty_field() {
        assert_eq!(
            Transaction::from_fields(&["  ", "01/01/2022", "10"]),
            Err(RecordError::EmptyField(1))
        );
        assert_eq!(
            Transaction::from_fields(&["C1", "01/01/2022", ""]),
            Err(RecordError::EmptyField(3))
        );
    }

    #[test]
    fn test_rejects_invalid_amount() {
        for amount in ["12.50", "abc", "1e3", "99999999999999999999"] {
            assert_eq!(
                Transaction::from_fields(&["C1", "01/01/2022", amount]),
                Err(RecordError::InvalidAmount(amount.to_string()))
            );
        }
    }

    #[test]
    fn test_no_magnitude_cap_on_amounts() {
        let tx = Transaction::from_fields(&["C1", "01/01/2022", "5000000"]).unwrap();
        assert_eq!(tx.amount, 5_000_000);
    }

    #[test]
    fn test_parse_transactions_skips_bad_rows_and_keeps_order() {
        let records = vec![
            vec!["B", "01/02/2022", "5"],
            vec!["A", "13/02/2022", "5"],
            vec!["A", "01/01/2022", "-3"],
            vec!["A", "01/01/2022"],
        ];

        let txs = parse_transactions(records);
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].customer_id, "B");
        assert_eq!(txs[1].customer_id, "A");
        assert_eq!(txs[1].amount, -3);
    }

    #[test]
    fn test_read_transactions_from_csv() {
        let input = "C1,01/05/2022,100\nC1,01/06/2022, -20\nC2,bad,1\nC3,02/01/2022\n\nC2,02/01/2022,7\n";
        let txs = read_transactions(Cursor::new(input)).unwrap();

        assert_eq!(txs.len(), 3);
        assert_eq!(txs[1].amount, -20);
        assert_eq!(txs[2].customer_id, "C2");
    }

    #[test]
    fn test_read_records_keeps_raw_fields() {
        let records = read_records(Cursor::new("a, b ,c\nd\n")).unwrap();
        assert_eq!(records, vec![vec!["a", " b ", "c"], vec!["d"]]);
    }

    #[test]
    fn test_blank_lines_are_not_records() {
        let records = read_records(Cursor::new("C1,01/05/2022,5\n\nC1,01/06/2022,x\n")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], vec!["C1", "01/06/2022", "x"]);
    }

    #[test]
    fn test_undecodable_row_is_skipped() {
        let input: &[u8] = b"C1,01/05/2022,5\nC\xff,01/06/2022,9\nC1,01/07/2022,-2\n";
        let txs = read_transactions(Cursor::new(input)).unwrap();

        let amounts: Vec<i64> = txs.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![5, -2]);
    }

    #[test]
    fn test_undecodable_row_keeps_a_record_slot() {
        let input: &[u8] = b"C1,01/05/2022,5\nC\xff,01/06/2022,9\n";
        let records = read_records(Cursor::new(input)).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[1].is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(read_transactions(Cursor::new("")).unwrap().is_empty());
    }
}
