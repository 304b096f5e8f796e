//! References to LUMPREM data-series files.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::number::fmt_float;

/// A data-file entry of the deck.
///
/// LUMPREM accepts either a file name or a mode code followed by a numeric
/// parameter (for example a constant crop factor or irrigation fraction) in
/// place of a file.
///
/// Deserialises from a plain string or from a `{ code, param }` table whose
/// `code` may be written as text or as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileRef {
    /// A file name, written verbatim.
    Bare(String),
    /// A mode code plus its parameter, written as two tokens.
    WithParam {
        /// Mode code.
        #[serde(deserialize_with = "code_text")]
        code: String,
        /// Scale or fraction attached to the code.
        param: f64,
    },
}

impl FileRef {
    /// A bare file name.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::Bare(name.into())
    }

    /// A code/parameter pair.
    pub fn with_param(code: impl Into<String>, param: f64) -> Self {
        Self::WithParam {
            code: code.into(),
            param,
        }
    }

    /// The deck tokens for this entry: one for a file name, two for a pair.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Self::Bare(name) => vec![name.clone()],
            Self::WithParam { code, param } => vec![code.clone(), fmt_float(*param)],
        }
    }

    /// Whether the entry can be replaced by template tokens.
    pub fn is_templatable(&self) -> bool {
        matches!(self, Self::WithParam { .. })
    }

    pub(crate) fn problem(&self) -> Option<String> {
        match self {
            Self::Bare(name) if name.is_empty() => Some("file name is empty".to_string()),
            Self::Bare(name) if name.contains(char::is_whitespace) => {
                Some(format!("file name '{name}' contains whitespace"))
            }
            Self::WithParam { code, .. } if code.is_empty() || code.contains(char::is_whitespace) => {
                Some(format!("code '{code}' must be a single token"))
            }
            Self::WithParam { param, .. } if !param.is_finite() => {
                Some(format!("parameter must be finite, got {param}"))
            }
            _ => None,
        }
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

impl From<&str> for FileRef {
    fn from(name: &str) -> Self {
        Self::bare(name)
    }
}

fn code_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(s) => s,
        Code::Int(i) => i.to_string(),
        Code::Float(f) => f.to_string(),
    })
}
