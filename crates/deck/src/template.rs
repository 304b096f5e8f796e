//! PEST template tokens.

use lumpr_model::{Field, ModelError};

use crate::error::DeckError;

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = '~';

/// Width the label inside a token is right-aligned to.
const LABEL_WIDTH: usize = 16;
const PARAM_CHARS: usize = 8;
const MODEL_CHARS: usize = 7;

/// Which deck fields a template replaces, and the delimiter it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    delimiter: char,
    fields: Vec<Field>,
}

impl TemplateSpec {
    /// Template over `fields` with the default delimiter.
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            fields,
        }
    }

    /// Template over named fields.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownField`] for the first unrecognised name.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, ModelError> {
        Field::parse_list(names).map(Self::new)
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Whether `field` is replaced by a token.
    pub fn selects(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Rejects delimiters that could appear inside a deck value.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidDelimiter`].
    pub fn validate(&self) -> Result<(), DeckError> {
        let d = self.delimiter;
        if d.is_alphanumeric() || d.is_whitespace() || d.is_control() || matches!(d, '.' | '-' | '+') {
            return Err(DeckError::InvalidDelimiter { delimiter: d });
        }
        Ok(())
    }

    /// First line of every template file.
    pub fn header(&self) -> String {
        format!("ptf {}", self.delimiter)
    }

    /// Placeholder for parameter `param` of model `model`.
    pub fn token(&self, param: &str, model: &str) -> String {
        let d = self.delimiter;
        format!("{d}{:>LABEL_WIDTH$}{d}", template_label(param, model))
    }
}

/// Parameter label: the first 8 characters of the parameter name and the
/// first 7 of the model name, joined by `_`.
pub fn template_label(param: &str, model: &str) -> String {
    let param: String = param.chars().take(PARAM_CHARS).collect();
    let model: String = model.chars().take(MODEL_CHARS).collect();
    format!("{param}_{model}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_truncation() {
        assert_eq!(template_label("maxvol", "lr1"), "maxvol_lr1");
        assert_eq!(template_label("irrigvolfrac", "catchment01"), "irrigvol_catchme");
    }

    #[test]
    fn token_layout() {
        let spec = TemplateSpec::new(vec![Field::Maxvol]);
        let token = spec.token("maxvol", "lr1");
        assert_eq!(token, "~      maxvol_lr1~");
        assert_eq!(token.len(), LABEL_WIDTH + 2);
    }

    #[test]
    fn custom_delimiter() {
        let spec = TemplateSpec::new(vec![]).with_delimiter('$');
        assert_eq!(spec.header(), "ptf $");
        assert!(spec.token("ks", "a").starts_with('$'));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn invalid_delimiters() {
        for d in ['a', '7', ' ', '.', '-'] {
            let spec = TemplateSpec::new(vec![]).with_delimiter(d);
            assert!(spec.validate().is_err(), "{d:?} accepted");
        }
    }

    #[test]
    fn parse_names() {
        let spec = TemplateSpec::parse(&["maxvol", "vegfile"]).unwrap();
        assert!(spec.selects(Field::Vegfile));
        assert!(!spec.selects(Field::Ks));
        assert!(TemplateSpec::parse(&["bogus"]).is_err());
    }
}
