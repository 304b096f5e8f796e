//! Line layout rules of the deck.

/// Values per line of the output-day list in [`FormatVersion::Wrapped`].
pub const VALUES_PER_LINE: usize = 10;

/// Width every value except the last is left-aligned to on a field line.
const FIELD_WIDTH: usize = 4;

/// Layout revision of the timing section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatVersion {
    /// Output days wrapped [`VALUES_PER_LINE`] to a line.
    #[default]
    Wrapped,
    /// All output days on a single line.
    Legacy,
}

impl FormatVersion {
    /// Splits a value list into deck lines.
    pub(crate) fn list_lines(self, values: &[String]) -> Vec<String> {
        match self {
            FormatVersion::Legacy => vec![values.join(" ")],
            FormatVersion::Wrapped => values
                .chunks(VALUES_PER_LINE)
                .map(|chunk| chunk.join(" "))
                .collect(),
        }
    }
}

/// Joins values with a single space, left-aligning all but the last to
/// [`FIELD_WIDTH`] columns.
pub(crate) fn field_line<S: AsRef<str>>(values: &[S]) -> String {
    let mut line = String::new();
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        if i + 1 == values.len() {
            line.push_str(v.as_ref());
        } else {
            line.push_str(&format!("{:<FIELD_WIDTH$}", v.as_ref()));
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_line_pads_all_but_last() {
        assert_eq!(field_line(&["0.5", "0.5"]), "0.5  0.5");
        assert_eq!(field_line(&["1", "100", "0.00001"]), "1    100  0.00001");
    }

    #[test]
    fn field_line_long_values_unpadded() {
        assert_eq!(field_line(&["10000000000.0", "1"]), "10000000000.0 1");
    }

    #[test]
    fn field_line_empty_tokens_keep_columns() {
        assert_eq!(field_line(&["0.5", "", ""]), "0.5       ");
    }

    #[test]
    fn wrapped_lines() {
        let values: Vec<String> = (1..=23).map(|d| d.to_string()).collect();
        let lines = FormatVersion::Wrapped.list_lines(&values);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1 2 3 4 5 6 7 8 9 10");
        assert_eq!(lines[2], "21 22 23");
    }

    #[test]
    fn legacy_single_line() {
        let values: Vec<String> = (1..=23).map(|d| d.to_string()).collect();
        let lines = FormatVersion::Legacy.list_lines(&values);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("22 23"));
    }

    #[test]
    fn default_is_wrapped() {
        assert_eq!(FormatVersion::default(), FormatVersion::Wrapped);
    }
}
