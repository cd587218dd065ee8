//! Card YAML codec
//!
//! Parses card text into a [`Document`] and renders it back. Serialization is
//! deterministic: the same document always produces byte-identical text, and
//! `serialize(parse(t))` is a fixed point after the first pass.
//!
//! Output follows the style Home Assistant cards are written in; see
//! [`render`] for the adjustments made to the emitter's text.

mod render;

use serde_yaml::Value;

use crate::model::Document;

/// Error type for the card codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Text is not well-formed card YAML
    Malformed {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// Document could not be rendered
    Serialize(String),
}

impl CodecError {
    fn malformed(err: serde_yaml::Error) -> Self {
        let location = err.location();
        Self::Malformed {
            message: err.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    }
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed {
                message,
                line: Some(line),
                ..
            } => write!(f, "YAML parse error at line {}: {}", line, message),
            Self::Malformed { message, .. } => write!(f, "YAML parse error: {}", message),
            Self::Serialize(message) => write!(f, "YAML render error: {}", message),
        }
    }
}

impl std::error::Error for CodecError {}

/// Parse card text into a document.
///
/// Blank or comment-only text is an empty card. A missing `type` becomes
/// `picture-elements` and a missing or null `elements` becomes an empty list.
/// Merge keys (`<<: *anchor`) are applied; tagged values such as `!secret`
/// are kept as they are.
pub fn parse(text: &str) -> Result<Document, CodecError> {
    if is_blank(text) {
        return Ok(Document::default());
    }

    let mut value: Value = serde_yaml::from_str(text).map_err(CodecError::malformed)?;
    value.apply_merge().map_err(CodecError::malformed)?;
    let document = match value {
        Value::Null => Document::default(),
        value => serde_yaml::from_value(value).map_err(CodecError::malformed)?,
    };
    tracing::trace!(elements = document.elements.len(), "parsed card");
    Ok(document)
}

/// Render a document as card text
pub fn serialize(document: &Document) -> Result<String, CodecError> {
    let emitted =
        serde_yaml::to_string(document).map_err(|e| CodecError::Serialize(e.to_string()))?;
    Ok(render::house_style(&emitted))
}

/// Render a single string as a YAML scalar (quoted only when it must be)
pub fn scalar(value: &str) -> String {
    let emitted = serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", value));
    render::quote_word(&emitted).into_owned()
}

fn is_blank(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}
