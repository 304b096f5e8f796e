//! Output-day scheduling.
//!
//! Decides on which simulation days LUMPREM records its state. Day indices
//! are 1-based: day 1 is the first simulated day after the start date.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::date::{add_days, day_offset, format_date, parse_date};
use crate::error::CalendarError;
use crate::sequence::offsets_after;

/// Requested output cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleSpec {
    /// Explicit day indices, emitted verbatim.
    Days(Vec<u32>),
    /// `n` evenly spaced days over `[1, num_days]`, both ends included.
    Count(usize),
    /// Every first day of a month after the start date.
    Monthly,
    /// Every January 1 after the start date.
    Annual,
}

impl ScheduleSpec {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Days(_) => "days",
            Self::Count(_) => "count",
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }
}

/// A resolved output schedule: the simulation length and the ordered
/// output day indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchedule {
    num_days: u32,
    days: Vec<u32>,
}

impl OutputSchedule {
    /// Creates a schedule from already-resolved parts.
    pub fn new(num_days: u32, days: Vec<u32>) -> Self {
        Self { num_days, days }
    }

    /// Total number of simulated days.
    pub fn num_days(&self) -> u32 {
        self.num_days
    }

    /// Output day indices in ascending order.
    pub fn days(&self) -> &[u32] {
        &self.days
    }

    /// Number of output days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns `true` when no output day is scheduled.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Consumes the schedule and returns the day list.
    pub fn into_days(self) -> Vec<u32> {
        self.days
    }
}

/// Computes output days from `dd/mm/yyyy` date strings.
///
/// See [`compute_output_days_from_dates`] for the rules.
///
/// # Errors
///
/// Returns [`CalendarError::MalformedDate`] if either date string fails to
/// parse, plus every error of [`compute_output_days_from_dates`].
pub fn compute_output_days(
    start_date: Option<&str>,
    num_days: Option<u32>,
    end_date: Option<&str>,
    cadence: &ScheduleSpec,
) -> Result<OutputSchedule, CalendarError> {
    let start = start_date.map(parse_date).transpose()?;
    let end = end_date.map(parse_date).transpose()?;
    compute_output_days_from_dates(start, num_days, end, cadence)
}

/// Computes the simulation length and output day indices.
///
/// Without a start date, only `num_days` matters and calendar cadences are
/// rejected. With a start date, the end date defaults to
/// `start + num_days`; when an end date *is* given the day count is
/// recomputed from it and any supplied `num_days` is overridden (a warning is
/// logged if the two disagree).
///
/// # Errors
///
/// - [`CalendarError::MissingDayCount`] if the length cannot be determined.
/// - [`CalendarError::EndBeforeStart`] if `end < start`.
/// - [`CalendarError::CadenceNeedsStartDate`] for monthly/annual output
///   without a start date.
/// - [`CalendarError::InvalidDayList`] for an unsorted or out-of-range
///   explicit list.
pub fn compute_output_days_from_dates(
    start: Option<NaiveDate>,
    num_days: Option<u32>,
    end: Option<NaiveDate>,
    cadence: &ScheduleSpec,
) -> Result<OutputSchedule, CalendarError> {
    let Some(start) = start else {
        let num_days = num_days.ok_or(CalendarError::MissingDayCount)?;
        let days = match cadence {
            ScheduleSpec::Monthly | ScheduleSpec::Annual => {
                return Err(CalendarError::CadenceNeedsStartDate {
                    cadence: cadence.name(),
                });
            }
            ScheduleSpec::Count(n) => linspace_days(num_days, *n),
            ScheduleSpec::Days(list) => checked_day_list(list, num_days)?,
        };
        return Ok(OutputSchedule::new(num_days, days));
    };

    let (end, num_days) = match (end, num_days) {
        (Some(end), supplied) => {
            if end < start {
                return Err(CalendarError::EndBeforeStart {
                    start: format_date(start),
                    end: format_date(end),
                });
            }
            let span = u32::try_from(day_offset(start, end)).map_err(|_| {
                CalendarError::DateOutOfRange {
                    reason: format!("{} to {} spans too many days", format_date(start), format_date(end)),
                }
            })?;
            if let Some(n) = supplied
                && n != span
            {
                warn!(
                    supplied = n,
                    derived = span,
                    "day count overridden by end date"
                );
            }
            (end, span)
        }
        (None, Some(n)) => (add_days(start, i64::from(n))?, n),
        (None, None) => return Err(CalendarError::MissingDayCount),
    };

    let days = match cadence {
        ScheduleSpec::Monthly => offsets_after(start, end, |d| d.day() == 1),
        ScheduleSpec::Annual => offsets_after(start, end, |d| d.day() == 1 && d.month() == 1),
        ScheduleSpec::Count(n) => linspace_days(num_days, *n),
        ScheduleSpec::Days(list) => checked_day_list(list, num_days)?,
    };
    debug!(
        cadence = cadence.name(),
        num_days,
        n_out = days.len(),
        "output schedule resolved"
    );
    Ok(OutputSchedule::new(num_days, days))
}

/// `n` evenly spaced integers from 1 to `num_days` inclusive.
///
/// Sample `i` is `1 + i * (num_days - 1) / (n - 1)` truncated toward zero;
/// the last sample is pinned to `num_days`.
pub fn linspace_days(num_days: u32, n: usize) -> Vec<u32> {
    match n {
        0 => Vec::new(),
        1 => vec![1],
        _ => {
            let step = (f64::from(num_days) - 1.0) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        num_days
                    } else {
                        (1.0 + i as f64 * step) as u32
                    }
                })
                .collect()
        }
    }
}

fn checked_day_list(list: &[u32], num_days: u32) -> Result<Vec<u32>, CalendarError> {
    if let Some(w) = list.windows(2).find(|w| w[1] < w[0]) {
        return Err(CalendarError::InvalidDayList {
            reason: format!("day {} follows day {}", w[1], w[0]),
        });
    }
    if let Some(&d) = list.iter().find(|&&d| d == 0 || d > num_days) {
        return Err(CalendarError::InvalidDayList {
            reason: format!("day {d} outside 1..={num_days}"),
        });
    }
    Ok(list.to_vec())
}
