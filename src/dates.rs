//! Rental period validation
//!
//! Both dates are entered as `DD-MM-YYYY`. Parsing is strict: two-digit day,
//! two-digit month, four-digit year, `-` separators, and nothing else. Each
//! field is checked on its own so a bad end date is never reported against
//! the start field, and vice versa.

use std::fmt;

use chrono::NaiveDate;
use strum::Display;
use thiserror::Error;

/// Human-readable form of the accepted date format
pub const DATE_FORMAT: &str = "DD-MM-YYYY";

const CHRONO_FORMAT: &str = "%d-%m-%Y";

/// Reason a date range was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum ValidationErrorKind {
    #[strum(serialize = "start date is not a valid DD-MM-YYYY date")]
    BadStartFormat,
    #[strum(serialize = "end date is not a valid DD-MM-YYYY date")]
    BadEndFormat,
    #[strum(serialize = "start date is after end date")]
    StartAfterEnd,
}

/// A rejected date range
///
/// Holds every reason that applies, so both fields can be flagged at once.
/// `StartAfterEnd` only appears when both fields parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    kinds: Vec<ValidationErrorKind>,
}

impl ValidationError {
    fn new(mut kinds: Vec<ValidationErrorKind>) -> Self {
        kinds.sort();
        kinds.dedup();
        Self { kinds }
    }

    /// All reasons, start field first
    pub fn kinds(&self) -> &[ValidationErrorKind] {
        &self.kinds
    }

    pub fn has(&self, kind: ValidationErrorKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Whether the start field should be highlighted
    pub fn start_invalid(&self) -> bool {
        self.has(ValidationErrorKind::BadStartFormat) || self.ordering_invalid()
    }

    /// Whether the end field should be highlighted
    pub fn end_invalid(&self) -> bool {
        self.has(ValidationErrorKind::BadEndFormat) || self.ordering_invalid()
    }

    /// Whether the dates parsed but are in the wrong order
    pub fn ordering_invalid(&self) -> bool {
        self.has(ValidationErrorKind::StartAfterEnd)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.kinds.iter().map(|k| k.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// A validated, inclusive rental period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl RentalPeriod {
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive day count; a single-day rental is 1 day. Always >= 1.
    pub fn rental_days(&self) -> u32 {
        let days = (self.end - self.start).num_days() + 1;
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for RentalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} ({} days)",
            self.start.format(CHRONO_FORMAT),
            self.end.format(CHRONO_FORMAT),
            self.rental_days()
        )
    }
}

/// Parse a single `DD-MM-YYYY` date
///
/// Returns `None` for anything that is not exactly that shape or is not a
/// real calendar date (e.g. `31-02-2024`).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(text, CHRONO_FORMAT).ok()
}

/// Validate a start/end pair
///
/// # Errors
///
/// - `BadStartFormat` and/or `BadEndFormat` when a field does not parse
/// - `StartAfterEnd` when both parse and start is strictly after end
pub fn validate(start_text: &str, end_text: &str) -> Result<RentalPeriod, ValidationError> {
    let start = parse_date(start_text);
    let end = parse_date(end_text);

    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(ValidationError::new(vec![
            ValidationErrorKind::StartAfterEnd,
        ])),
        (Some(start), Some(end)) => Ok(RentalPeriod { start, end }),
        (start, end) => {
            let mut kinds = Vec::with_capacity(2);
            if start.is_none() {
                kinds.push(ValidationErrorKind::BadStartFormat);
            }
            if end.is_none() {
                kinds.push(ValidationErrorKind::BadEndFormat);
            }
            Err(ValidationError::new(kinds))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_day_is_one_day() {
        let period = validate("01-01-2024", "01-01-2024").unwrap();
        assert_eq!(period.rental_days(), 1);
    }

    #[test]
    fn test_inclusive_day_count() {
        assert_eq!(validate("01-01-2024", "03-01-2024").unwrap().rental_days(), 3);
        // Across a leap day
        assert_eq!(validate("28-02-2024", "01-03-2024").unwrap().rental_days(), 3);
        // Across a year boundary
        assert_eq!(validate("31-12-2023", "01-01-2024").unwrap().rental_days(), 2);
    }

    #[test]
    fn test_start_after_end() {
        let err = validate("05-01-2024", "01-01-2024").unwrap_err();
        assert_eq!(err.kinds(), &[ValidationErrorKind::StartAfterEnd]);
        assert!(err.start_invalid());
        assert!(err.end_invalid());
        assert!(err.ordering_invalid());
    }

    #[test]
    fn test_invalid_calendar_date() {
        let err = validate("31-02-2024", "01-03-2024").unwrap_err();
        assert_eq!(err.kinds(), &[ValidationErrorKind::BadStartFormat]);
    }

    #[test]
    fn test_garbage_start_does_not_flag_end() {
        let err = validate("not-a-date", "01-03-2024").unwrap_err();
        assert_eq!(err.kinds(), &[ValidationErrorKind::BadStartFormat]);
        assert!(err.start_invalid());
        assert!(!err.end_invalid());
    }

    #[test]
    fn test_both_fields_invalid() {
        let err = validate("", "32-13-2024").unwrap_err();
        assert_eq!(
            err.kinds(),
            &[
                ValidationErrorKind::BadStartFormat,
                ValidationErrorKind::BadEndFormat
            ]
        );
        assert!(!err.ordering_invalid());
    }

    #[test]
    fn test_parse_is_strict() {
        assert!(parse_date("1-1-2024").is_none());
        assert!(parse_date("01/01/2024").is_none());
        assert!(parse_date("2024-01-01").is_none());
        assert!(parse_date(" 01-01-2024").is_none());
        assert!(parse_date("01-01-2024 ").is_none());
        assert!(parse_date("01-01-24").is_none());
        assert!(parse_date("29-02-2023").is_none());
        assert_eq!(
            parse_date("29-02-2024"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn test_error_display_lists_all_reasons() {
        let err = validate("x", "y").unwrap_err();
        assert_eq!(
            err.to_string(),
            "start date is not a valid DD-MM-YYYY date; end date is not a valid DD-MM-YYYY date"
        );
    }

    #[test]
    fn test_period_display() {
        let period = validate("01-01-2024", "03-01-2024").unwrap();
        assert_eq!(period.to_string(), "01-01-2024 to 03-01-2024 (3 days)");
    }
}
