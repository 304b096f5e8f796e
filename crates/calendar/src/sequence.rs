//! Date sequence generation on the Gregorian calendar.

use chrono::NaiveDate;

/// Generates a contiguous sequence of dates.
///
/// Starting from `start`, produces at most `n_days` consecutive dates by
/// repeatedly advancing one day. Month ends, leap days and year boundaries
/// follow the proleptic Gregorian calendar. The sequence stops early only if
/// chrono's representable range is exhausted.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use lumpr_calendar::date_sequence;
///
/// let start = NaiveDate::from_ymd_opt(2000, 2, 28).unwrap();
/// let dates = date_sequence(start, 3);
/// // Feb 28, Feb 29, Mar 1
/// assert_eq!(dates[2], NaiveDate::from_ymd_opt(2000, 3, 1).unwrap());
/// ```
pub fn date_sequence(start: NaiveDate, n_days: usize) -> Vec<NaiveDate> {
    start.iter_days().take(n_days).collect()
}

/// Day offsets (relative to `start`) of every date in `(start, end]` that
/// satisfies `keep`.
pub(crate) fn offsets_after(
    start: NaiveDate,
    end: NaiveDate,
    keep: impl Fn(NaiveDate) -> bool,
) -> Vec<u32> {
    start
        .iter_days()
        .skip(1)
        .take_while(|d| *d <= end)
        .enumerate()
        .filter(|(_, d)| keep(*d))
        .map(|(i, _)| i as u32 + 1)
        .collect()
}
