//! Error types for lumpr-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the lumpr-io crate.
///
/// Covers file access, malformed LUMPREM and MF6 text files, bridge-file
/// validation and result joining.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a file to be read does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when reading an existing file fails.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Returned when writing a file fails.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a results file has no header line.
    #[error("no header in {}", path.display())]
    EmptyFile {
        /// Path to the empty file.
        path: PathBuf,
    },

    /// Returned when a data cell is not a number.
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Parser diagnostic.
        reason: String,
    },

    /// Returned when a data row and the header disagree in width.
    #[error("{}:{line}: row has {got} values, header has {expected}", path.display())]
    RowShape {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Header width.
        expected: usize,
        /// Row width.
        got: usize,
    },

    /// Returned when an MF6 time-series file is structurally invalid.
    #[error("malformed time-series file {}: {reason}", path.display())]
    MalformedTimeSeries {
        /// File being parsed.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when two result sets share one model name.
    #[error("results for model '{name}' supplied more than once")]
    DuplicateModel {
        /// The repeated model name.
        name: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/data/lr_a.out"),
        };
        assert_eq!(err.to_string(), "file not found: /data/lr_a.out");
    }

    #[test]
    fn error_parse() {
        let err = IoError::Parse {
            path: PathBuf::from("lr_a.out"),
            line: 7,
            reason: "'abc' is not a number".to_string(),
        };
        assert_eq!(err.to_string(), "lr_a.out:7: 'abc' is not a number");
    }

    #[test]
    fn error_row_shape() {
        let err = IoError::RowShape {
            path: PathBuf::from("lr_a.out"),
            line: 3,
            expected: 5,
            got: 4,
        };
        assert_eq!(err.to_string(), "lr_a.out:3: row has 4 values, header has 5");
    }

    #[test]
    fn error_duplicate_model() {
        let err = IoError::DuplicateModel {
            name: "lr1".to_string(),
        };
        assert_eq!(err.to_string(), "results for model 'lr1' supplied more than once");
    }

    #[test]
    fn error_validation() {
        let err = IoError::Validation {
            count: 1,
            details: "unknown series 'x'".to_string(),
        };
        assert_eq!(err.to_string(), "1 validation error(s): unknown series 'x'");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<IoError>();
    }
}
