//! Error types for the lumpr-model crate.

/// Error type for all fallible operations in the lumpr-model crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Returned when one or more parameter checks fail at build time.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Failure messages joined with `"; "`.
        details: String,
    },

    /// Returned when a field name does not match any deck field.
    #[error("unknown model field '{name}'")]
    UnknownField {
        /// The unrecognised name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_validation() {
        let err = ModelError::Validation {
            count: 2,
            details: "maxvol must be > 0; elevmin > elevmax".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): maxvol must be > 0; elevmin > elevmax"
        );
    }

    #[test]
    fn error_unknown_field() {
        let err = ModelError::UnknownField {
            name: "maxvl".to_string(),
        };
        assert_eq!(err.to_string(), "unknown model field 'maxvl'");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ModelError>();
    }
}
