//! Calendar date as it appears in the ledger input.
//!
//! Validation is structural: month must be 1-12, day 1-31 and year
//! 1900-2050. Days are not checked against the actual length of the month,
//! so `02/31/2022` is accepted.

use crate::error::RecordError;
use std::fmt;
use std::str::FromStr;

/// A date in the ledger, ordered chronologically.
///
/// Field order matters: the derived `Ord` compares year, then month, then day.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use monthly_balances::CalendarDate;
///
/// let date = CalendarDate::from_str("11/01/2022").unwrap();
/// assert_eq!(date.month(), 11);
/// assert_eq!(date.to_string(), "11/01/2022");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: u16,
    month: u8,
    day: u8,
}

impl CalendarDate {
    pub const MIN_YEAR: u16 = 1900;
    pub const MAX_YEAR: u16 = 2050;

    /// Builds a date, returning `None` if any component is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Option<Self> {
        let valid = (Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year)
            && (1..=12).contains(&month)
            && (1..=31).contains(&day);
        valid.then_some(CalendarDate { year, month, day })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// The `(year, month)` bucket this date falls in.
    pub fn year_month(&self) -> (u16, u8) {
        (self.year, self.month)
    }
}

/// Parses a fixed-width run of ASCII digits.
fn parse_digits(part: &str, width: usize) -> Option<u16> {
    if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for CalendarDate {
    type Err = RecordError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || RecordError::InvalidDate(trimmed.to_string());

        let mut parts = trimmed.split('/');
        let (month, day, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(m), Some(d), Some(y), None) => (m, d, y),
            _ => return Err(invalid()),
        };

        let month = parse_digits(month, 2).ok_or_else(invalid)?;
        let day = parse_digits(day, 2).ok_or_else(invalid)?;
        let year = parse_digits(year, 4).ok_or_else(invalid)?;

        CalendarDate::new(year, month as u8, day as u8).ok_or_else(invalid)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.month, self.day, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_valid_date() {
        let d = date("11/15/2022");
        assert_eq!(d.year(), 2022);
        assert_eq!(d.month(), 11);
        assert_eq!(d.day(), 15);
        assert_eq!(d.year_month(), (2022, 11));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(date("  01/02/2021 "), date("01/02/2021"));
    }

    #[test]
    fn test_year_bounds_are_inclusive() {
        assert!(CalendarDate::from_str("01/01/1900").is_ok());
        assert!(CalendarDate::from_str("12/31/2050").is_ok());
        assert!(CalendarDate::from_str("12/31/1899").is_err());
        assert!(CalendarDate::from_str("01/01/2051").is_err());
    }

    #[test]
    fn test_day_checked_structurally() {
        assert!(CalendarDate::from_str("02/31/2022").is_ok());
        assert!(CalendarDate::from_str("02/32/2022").is_err());
        assert!(CalendarDate::from_str("02/00/2022").is_err());
    }

    #[test]
    fn test_rejects_malformed_dates() {
        for s in [
            "",
            "13/01/2022",
            "00/10/2022",
            "1/01/2022",
            "01/1/2022",
            "01/01/22",
            "2022-01-01",
            "01/01/2022/01",
            "ab/cd/efgh",
            "+1/01/2022",
        ] {
            assert_eq!(
                CalendarDate::from_str(s),
                Err(RecordError::InvalidDate(s.to_string())),
                "{s:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(date("12/31/2021") < date("01/01/2022"));
        assert!(date("01/02/2022") < date("02/01/2022"));
        assert!(date("02/01/2022") < date("02/02/2022"));
    }

    #[test]
    fn test_display_round_trips_input_form() {
        assert_eq!(date("03/07/2021").to_string(), "03/07/2021");
    }
}
