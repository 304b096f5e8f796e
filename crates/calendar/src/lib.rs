//! # lumpr-calendar
//!
//! Gregorian date arithmetic for LUMPREM model decks.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["dd/mm/yyyy"] -->|"parse_date()"| B["NaiveDate"]
//!     B -->|"compute_output_days_from_dates()"| C["OutputSchedule"]
//!     D["ScheduleSpec"] --> C
//!     E["RecurrenceWindow"] -->|".expand()"| F["Vec of RecurrenceEvent"]
//!     B --> F
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use lumpr_calendar::{DayOrDate, ScheduleSpec, compute_output_days, compute_recurrence};
//!
//! // First-of-month output days for one year
//! let sched = compute_output_days(Some("01/01/2000"), Some(366), None, &ScheduleSpec::Monthly)
//!     .unwrap();
//! assert_eq!(sched.len(), 12);
//! assert_eq!(sched.days()[0], 31);
//!
//! // Half-year irrigation season recurring every year
//! let events = compute_recurrence(
//!     "01/01/2000",
//!     DayOrDate::Offset(90),
//!     DayOrDate::Offset(730),
//!     None,
//!     0.5,
//! )
//! .unwrap();
//! assert_eq!(events.len(), 5);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `date` | `dd/mm/yyyy` parsing, day and year arithmetic |
//! | `sequence` | Date sequence generation |
//! | `schedule` | Output-day schedules |
//! | `recurrence` | Annual on/off activation windows |
//! | `error` | Error types |

mod date;
mod error;
mod recurrence;
mod schedule;
mod sequence;

pub use date::{DATE_FORMAT, DayOrDate, add_days, add_years, day_offset, format_date, parse_date};
pub use error::CalendarError;
pub use recurrence::{
    DEFAULT_RATE, RecurrenceEvent, RecurrenceWindow, WindowEnd, compute_recurrence,
};
pub use schedule::{
    OutputSchedule, ScheduleSpec, compute_output_days, compute_output_days_from_dates,
    linspace_days,
};
pub use sequence::date_sequence;
