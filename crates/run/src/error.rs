//! Error types for lumpr-run.

/// Error type for all fallible operations in the lumpr-run crate.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Returned when the program could not be started at all.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program name or path.
        program: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Returned when feeding commands or collecting output fails.
    #[error("I/O with '{program}' failed: {source}")]
    Io {
        /// Program name or path.
        program: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Returned when the program exits unsuccessfully.
    #[error("'{program}' exited with {}: {stderr}", describe_exit(.code))]
    ExternalProcessFailed {
        /// Program name or path.
        program: String,
        /// Exit code, `None` if killed by a signal.
        code: Option<i32>,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "a signal".to_string(),
    }
}
