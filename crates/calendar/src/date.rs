//! Gregorian date helpers in the `dd/mm/yyyy` convention used by LUMPREM.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::error::CalendarError;

/// Textual date format shared by LUMPREM, LUMPREP and the project file.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `dd/mm/yyyy` date.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`CalendarError::MalformedDate`] if the string does not match the
/// format or names a non-existent day (e.g. `29/02/2001`).
pub fn parse_date(input: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|e| {
        CalendarError::MalformedDate {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Formats a date as `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Adds `days` calendar days to `date`.
///
/// # Errors
///
/// Returns [`CalendarError::DateOutOfRange`] on overflow.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, CalendarError> {
    date.checked_add_signed(TimeDelta::days(days))
        .ok_or_else(|| CalendarError::DateOutOfRange {
            reason: format!("adding {days} days to {}", format_date(date)),
        })
}

/// Returns the same calendar date `years` years later.
///
/// When the month/day does not exist in the destination year (February 29
/// into a non-leap year) the date is shifted by the length of the skipped
/// span of whole years instead, which lands on March 1.
///
/// # Errors
///
/// Returns [`CalendarError::DateOutOfRange`] if the destination year is
/// outside chrono's range.
pub fn add_years(date: NaiveDate, years: i32) -> Result<NaiveDate, CalendarError> {
    let out_of_range = || CalendarError::DateOutOfRange {
        reason: format!("adding {years} years to {}", format_date(date)),
    };
    let target_year = date.year().checked_add(years).ok_or_else(out_of_range)?;
    if let Some(shifted) = date.with_year(target_year) {
        return Ok(shifted);
    }
    let jan1_from = NaiveDate::from_ymd_opt(date.year(), 1, 1).ok_or_else(out_of_range)?;
    let jan1_to = NaiveDate::from_ymd_opt(target_year, 1, 1).ok_or_else(out_of_range)?;
    date.checked_add_signed(jan1_to - jan1_from)
        .ok_or_else(out_of_range)
}

/// Whole days from `start` to `date` (negative if `date` is earlier).
pub fn day_offset(start: NaiveDate, date: NaiveDate) -> i64 {
    (date - start).num_days()
}

/// A point in time given either as a day offset from a reference date or as
/// an absolute date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOrDate {
    /// Whole days after the reference date.
    Offset(i64),
    /// Absolute calendar date.
    Date(NaiveDate),
}

impl DayOrDate {
    /// Resolves to an absolute date relative to `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] on overflow.
    pub fn resolve(self, reference: NaiveDate) -> Result<NaiveDate, CalendarError> {
        match self {
            Self::Offset(days) => add_days(reference, days),
            Self::Date(date) => Ok(date),
        }
    }

    /// Parses either an integer day offset or a `dd/mm/yyyy` date.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::MalformedDate`] if the input is neither.
    pub fn parse(input: &str) -> Result<Self, CalendarError> {
        match input.trim().parse::<i64>() {
            Ok(days) => Ok(Self::Offset(days)),
            Err(_) => parse_date(input).map(Self::Date),
        }
    }
}

impl From<NaiveDate> for DayOrDate {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<i64> for DayOrDate {
    fn from(days: i64) -> Self {
        Self::Offset(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_valid() {
        assert_eq!(parse_date("01/01/2000").unwrap(), ymd(2000, 1, 1));
        assert_eq!(parse_date(" 31/12/2010 ").unwrap(), ymd(2010, 12, 31));
    }

    #[test]
    fn parse_leap_day() {
        assert_eq!(parse_date("29/02/2000").unwrap(), ymd(2000, 2, 29));
        assert!(matches!(
            parse_date("29/02/2001"),
            Err(CalendarError::MalformedDate { .. })
        ));
    }

    #[test]
    fn parse_rejects_iso() {
        let err = parse_date("2000-01-01").unwrap_err();
        assert!(matches!(err, CalendarError::MalformedDate { ref input, .. } if input == "2000-01-01"));
    }

    #[test]
    fn format_roundtrip() {
        let d = ymd(1999, 7, 4);
        assert_eq!(format_date(d), "04/07/1999");
        assert_eq!(parse_date(&format_date(d)).unwrap(), d);
    }

    #[test]
    fn add_years_plain() {
        assert_eq!(add_years(ymd(2000, 6, 15), 1).unwrap(), ymd(2001, 6, 15));
        assert_eq!(add_years(ymd(2000, 6, 15), -3).unwrap(), ymd(1997, 6, 15));
    }

    #[test]
    fn add_years_leap_day_to_non_leap() {
        assert_eq!(add_years(ymd(2000, 2, 29), 1).unwrap(), ymd(2001, 3, 1));
    }

    #[test]
    fn add_years_leap_day_to_leap() {
        assert_eq!(add_years(ymd(2000, 2, 29), 4).unwrap(), ymd(2004, 2, 29));
    }

    #[test]
    fn add_days_crosses_leap_day() {
        assert_eq!(add_days(ymd(2000, 2, 28), 1).unwrap(), ymd(2000, 2, 29));
        assert_eq!(add_days(ymd(2001, 2, 28), 1).unwrap(), ymd(2001, 3, 1));
    }

    #[test]
    fn day_offset_signed() {
        assert_eq!(day_offset(ymd(2000, 1, 1), ymd(2001, 1, 1)), 366);
        assert_eq!(day_offset(ymd(2000, 1, 2), ymd(2000, 1, 1)), -1);
    }

    #[test]
    fn day_or_date_parse() {
        assert_eq!(DayOrDate::parse("120").unwrap(), DayOrDate::Offset(120));
        assert_eq!(
            DayOrDate::parse("01/05/2000").unwrap(),
            DayOrDate::Date(ymd(2000, 5, 1))
        );
        assert!(DayOrDate::parse("May 1").is_err());
    }

    #[test]
    fn day_or_date_resolve() {
        let reference = ymd(1900, 1, 1);
        assert_eq!(
            DayOrDate::Offset(31).resolve(reference).unwrap(),
            ymd(1900, 2, 1)
        );
        assert_eq!(
            DayOrDate::Date(ymd(1901, 1, 1)).resolve(reference).unwrap(),
            ymd(1901, 1, 1)
        );
    }
}
