//! Checks shared by the bridge and results readers.

use crate::error::IoError;

/// Problems found while checking a bridge or results setup, reported
/// together.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Fails with every recorded problem, `"; "`-separated.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Records an error when `name` is empty or contains whitespace, since every
/// LUMPREM-family reader splits on whitespace.
pub(crate) fn check_token(c: &mut ValidationCollector, what: &str, name: &str) {
    if name.is_empty() {
        c.push(format!("{what} is empty"));
    } else if name.contains(char::is_whitespace) {
        c.push(format!("{what} '{name}' contains whitespace"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_recorded_passes() {
        let c = ValidationCollector::new();
        assert_eq!(c.len(), 0);
        assert!(c.finish().is_ok());
    }

    #[test]
    fn problems_reported_together() {
        let mut c = ValidationCollector::new();
        c.push("series 'rch' never read");
        c.push("scale must be finite");
        assert_eq!(c.len(), 2);

        match c.finish().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert_eq!(details, "series 'rch' never read; scale must be finite");
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn token_checks() {
        let mut c = ValidationCollector::new();
        check_token(&mut c, "series name", "rch");
        assert_eq!(c.len(), 0);
        check_token(&mut c, "series name", "");
        check_token(&mut c, "series name", "a b");
        assert_eq!(c.len(), 2);
    }
}
