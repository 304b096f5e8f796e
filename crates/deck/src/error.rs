//! Error types for the lumpr-deck crate.

use std::path::PathBuf;

use lumpr_calendar::CalendarError;
use lumpr_model::ModelError;

/// Error type for all fallible operations in the lumpr-deck crate.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// Returned when a file or directory cannot be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Returned when the per-descriptor lists of an output-series block have
    /// different lengths.
    #[error("output series '{list}' has {got} entries, expected {expected} (one per column)")]
    ShapeMismatch {
        /// Name of the offending list.
        list: &'static str,
        /// Number of column names.
        expected: usize,
        /// Length of the offending list.
        got: usize,
    },

    /// Returned when a field selected for templating has no value that a
    /// placeholder could stand in for.
    #[error("field '{field}' cannot be templated: {reason}")]
    NotTemplatable {
        /// Field name.
        field: String,
        /// Why it cannot be templated.
        reason: String,
    },

    /// Returned when the template delimiter would collide with deck content.
    #[error("invalid template delimiter '{delimiter}': must be a visible, non-alphanumeric character other than '.', '-' or '+'")]
    InvalidDelimiter {
        /// The rejected character.
        delimiter: char,
    },

    /// Returned when solver or buffer options are unusable.
    #[error("invalid deck options: {reason}")]
    InvalidOptions {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when deck text cannot be read back.
    #[error("malformed deck: {reason}")]
    MalformedDeck {
        /// Description of the problem.
        reason: String,
    },

    /// Wraps an error from lumpr-model.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Wraps an error from lumpr-calendar.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl DeckError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeckError::Io {
            path: path.into(),
            source,
        }
    }
}
