//! Recurring annual activation windows (irrigation seasons).
//!
//! A window switches a rate on at its start and off at its end, and repeats
//! every calendar year until a horizon. The expansion is a flat event list in
//! simulation-day units, written verbatim to LUMPREM's irrigation file.

use chrono::NaiveDate;
use tracing::debug;

use crate::date::{DayOrDate, add_days, add_years, day_offset, parse_date};
use crate::error::CalendarError;

/// Activation rate used when none is configured.
pub const DEFAULT_RATE: f64 = 0.5;

/// First simulated day; every event is clamped to it.
const FIRST_DAY: i64 = 1;

/// How the end of the first window is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEnd {
    /// Explicit end, as an offset or a date.
    At(DayOrDate),
    /// `floor(365 * fraction)` days after the window start.
    FractionOfYear(f64),
}

/// One on/off event of an expanded recurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecurrenceEvent {
    day: i64,
    active: bool,
    rate: f64,
}

impl RecurrenceEvent {
    fn on(day: i64, rate: f64) -> Self {
        Self {
            day: day.max(FIRST_DAY),
            active: true,
            rate,
        }
    }

    fn off(day: i64) -> Self {
        Self {
            day: day.max(FIRST_DAY),
            active: false,
            rate: 0.0,
        }
    }

    /// Day offset from the reference start date.
    pub fn day(&self) -> i64 {
        self.day
    }

    /// Whether the window switches on at this event.
    pub fn active(&self) -> bool {
        self.active
    }

    /// `1` for an on-event, `0` for an off-event.
    pub fn flag(&self) -> u8 {
        u8::from(self.active)
    }

    /// Rate in force from this event on (`0.0` when off).
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

/// An annual activation window.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceWindow {
    start: DayOrDate,
    end: WindowEnd,
    rate: f64,
}

impl RecurrenceWindow {
    /// Creates a window with the default rate.
    pub fn new(start: impl Into<DayOrDate>, end: WindowEnd) -> Self {
        Self {
            start: start.into(),
            end,
            rate: DEFAULT_RATE,
        }
    }

    /// Sets the activation rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Returns the window start.
    pub fn start(&self) -> DayOrDate {
        self.start
    }

    /// Returns the window end specification.
    pub fn end(&self) -> WindowEnd {
        self.end
    }

    /// Returns the activation rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Validates the numeric parts of the window.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidWindow`] if the rate is negative or
    /// non-finite, or the year fraction lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), CalendarError> {
        if !self.rate.is_finite() || self.rate < 0.0 {
            return Err(CalendarError::InvalidWindow {
                reason: format!("rate must be finite and >= 0, got {}", self.rate),
            });
        }
        if let WindowEnd::FractionOfYear(f) = self.end
            && !(0.0..=1.0).contains(&f)
        {
            return Err(CalendarError::InvalidWindow {
                reason: format!("fraction of year must be in [0, 1], got {f}"),
            });
        }
        Ok(())
    }

    /// Expands the window into a chronological event list.
    ///
    /// The list opens with an off-event on day 1 so the state on the first
    /// simulated day is explicit. Each year contributes an on-event at the
    /// window start and an off-event at the window end; both boundaries then
    /// advance by one calendar year (February 29 becomes March 1 in non-leap
    /// years). Expansion stops once the window start reaches `horizon`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidWindow`] if validation fails or the
    /// end precedes the start, and [`CalendarError::DateOutOfRange`] on date
    /// overflow.
    pub fn expand(
        &self,
        date_start: NaiveDate,
        horizon: DayOrDate,
    ) -> Result<Vec<RecurrenceEvent>, CalendarError> {
        self.validate()?;

        let mut start = self.start.resolve(date_start)?;
        let mut end = match self.end {
            WindowEnd::At(at) => at.resolve(date_start)?,
            WindowEnd::FractionOfYear(f) => add_days(start, (365.0 * f).floor() as i64)?,
        };
        if end < start {
            return Err(CalendarError::InvalidWindow {
                reason: format!(
                    "window ends {} days before it starts",
                    day_offset(end, start)
                ),
            });
        }
        let horizon = horizon.resolve(date_start)?;

        let mut events = vec![RecurrenceEvent::off(FIRST_DAY)];
        while start < horizon {
            events.push(RecurrenceEvent::on(day_offset(date_start, start), self.rate));
            events.push(RecurrenceEvent::off(day_offset(date_start, end)));
            start = add_years(start, 1)?;
            end = add_years(end, 1)?;
        }
        debug!(n_events = events.len(), "recurrence expanded");
        Ok(events)
    }
}

/// Expands an irrigation-style window from loosely typed inputs.
///
/// `date_start` is `dd/mm/yyyy`; `irrig_start`, `horizon` and `window_end`
/// are offsets from it or absolute dates. Without `window_end` the window
/// lasts `floor(365 * fraction_of_year)` days. The on-rate is
/// [`DEFAULT_RATE`].
///
/// # Errors
///
/// Returns [`CalendarError::MalformedDate`] for an unparseable start date and
/// every error of [`RecurrenceWindow::expand`].
pub fn compute_recurrence(
    date_start: &str,
    irrig_start: DayOrDate,
    horizon: DayOrDate,
    window_end: Option<DayOrDate>,
    fraction_of_year: f64,
) -> Result<Vec<RecurrenceEvent>, CalendarError> {
    let date_start = parse_date(date_start)?;
    let end = match window_end {
        Some(at) => WindowEnd::At(at),
        None => WindowEnd::FractionOfYear(fraction_of_year),
    };
    RecurrenceWindow::new(irrig_start, end).expand(date_start, horizon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn seed_only_when_horizon_precedes_window() {
        let window = RecurrenceWindow::new(DayOrDate::Offset(100), WindowEnd::FractionOfYear(0.5));
        let events = window.expand(ymd(2000, 1, 1), DayOrDate::Offset(50)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].day(), 1);
        assert!(!events[0].active());
        assert_eq!(events[0].rate(), 0.0);
    }

    #[test]
    fn explicit_end_used() {
        let window = RecurrenceWindow::new(
            DayOrDate::Date(ymd(2000, 5, 1)),
            WindowEnd::At(DayOrDate::Date(ymd(2000, 9, 1))),
        )
        .with_rate(1.25);
        let events = window.expand(ymd(2000, 1, 1), DayOrDate::Offset(365)).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].day(), 121);
        assert_eq!(events[1].rate(), 1.25);
        assert_eq!(events[1].flag(), 1);
        assert_eq!(events[2].day(), 244);
        assert_eq!(events[2].flag(), 0);
    }

    #[test]
    fn window_at_day_zero_clamped() {
        let events = compute_recurrence(
            "01/01/2000",
            DayOrDate::Offset(0),
            DayOrDate::Offset(100),
            None,
            0.1,
        )
        .unwrap();
        let days: Vec<i64> = events.iter().map(|e| e.day()).collect();
        assert_eq!(days, vec![1, 1, 36]);
    }

    #[test]
    fn end_before_start_rejected() {
        let window = RecurrenceWindow::new(
            DayOrDate::Offset(200),
            WindowEnd::At(DayOrDate::Offset(100)),
        );
        let err = window.expand(ymd(2000, 1, 1), DayOrDate::Offset(1000)).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidWindow { .. }));
    }

    #[test]
    fn validate_rejects_bad_fraction_and_rate() {
        let bad_fraction = RecurrenceWindow::new(0_i64, WindowEnd::FractionOfYear(1.5));
        assert!(bad_fraction.validate().is_err());
        let bad_rate = RecurrenceWindow::new(0_i64, WindowEnd::FractionOfYear(0.5)).with_rate(-1.0);
        assert!(bad_rate.validate().is_err());
    }

    #[test]
    fn malformed_start_date() {
        let err = compute_recurrence(
            "1900-01-01",
            DayOrDate::Offset(0),
            DayOrDate::Offset(10),
            None,
            0.5,
        )
        .unwrap_err();
        assert!(matches!(err, CalendarError::MalformedDate { .. }));
    }
}
