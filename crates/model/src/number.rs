//! Number rendering shared by every LUMPREM text format.

/// Renders a float as its shortest round-trip decimal, appending `.0` to
/// integral values so the external reader sees a real literal.
///
/// ```
/// use lumpr_model::fmt_float;
///
/// assert_eq!(fmt_float(0.5), "0.5");
/// assert_eq!(fmt_float(5.0), "5.0");
/// assert_eq!(fmt_float(-1.0e10), "-10000000000.0");
/// ```
pub fn fmt_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{text}.0")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional() {
        assert_eq!(fmt_float(0.1), "0.1");
        assert_eq!(fmt_float(1.0e-5), "0.00001");
    }

    #[test]
    fn integral() {
        assert_eq!(fmt_float(0.0), "0.0");
        assert_eq!(fmt_float(100.0), "100.0");
        assert_eq!(fmt_float(-3.0), "-3.0");
    }

    #[test]
    fn non_finite_untouched() {
        assert_eq!(fmt_float(f64::INFINITY), "inf");
        assert_eq!(fmt_float(f64::NAN), "NaN");
    }
}
