//! Error types for the lumpr-calendar crate.

/// Error type for all fallible operations in the lumpr-calendar crate.
///
/// Covers date parsing, date arithmetic that leaves chrono's supported range,
/// and structurally invalid scheduling requests.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a date string is not in `dd/mm/yyyy` form or names a
    /// day that does not exist.
    #[error("malformed date '{input}' (expected dd/mm/yyyy): {reason}")]
    MalformedDate {
        /// The string that failed to parse.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Returned when date arithmetic leaves the representable range.
    #[error("date out of range: {reason}")]
    DateOutOfRange {
        /// Description of the overflowing operation.
        reason: String,
    },

    /// Returned when neither a day count nor an end date is supplied.
    #[error("simulation length unknown: supply a day count or an end date")]
    MissingDayCount,

    /// Returned when the end date precedes the start date.
    #[error("end date {end} precedes start date {start}")]
    EndBeforeStart {
        /// Start date, `dd/mm/yyyy`.
        start: String,
        /// End date, `dd/mm/yyyy`.
        end: String,
    },

    /// Returned when a calendar-derived cadence is requested without a
    /// start date to anchor it.
    #[error("cadence '{cadence}' requires a start date")]
    CadenceNeedsStartDate {
        /// Name of the cadence.
        cadence: &'static str,
    },

    /// Returned when an explicit day list is unsorted or out of range.
    #[error("invalid output day list: {reason}")]
    InvalidDayList {
        /// Description of the offending entry.
        reason: String,
    },

    /// Returned when a recurrence window cannot be expanded.
    #[error("invalid recurrence window: {reason}")]
    InvalidWindow {
        /// Description of the problem.
        reason: String,
    },
}
