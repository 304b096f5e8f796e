//! Accumulated validation.

use crate::error::ModelError;

/// Gathers validation failures and converts them into a single
/// [`ModelError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Record `msg` unless `ok` holds.
    pub(crate) fn check(&mut self, ok: bool, msg: impl FnOnce() -> String) {
        if !ok {
            self.errors.push(msg());
        }
    }

    /// Record an error if `value` is NaN or infinite.
    pub(crate) fn finite(&mut self, name: &str, value: f64) {
        self.check(value.is_finite(), || {
            format!("{name} must be finite, got {value}")
        });
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` if nothing was recorded, otherwise one error with all
    /// messages joined by `"; "`.
    pub(crate) fn finish(self) -> Result<(), ModelError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ModelError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}
