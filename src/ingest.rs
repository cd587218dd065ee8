//! Background image import
//!
//! A dropped image becomes two things: an embedded data URL the preview can
//! show straight away (and the session keeps), and a path reference written
//! into the card's `image:` key. The key is rewritten on the raw text so a
//! card that does not parse still gets its background updated.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use regex::{NoExpand, Regex};
use std::path::Path;
use std::sync::OnceLock;

use crate::codec;

const SVG_MIME: &str = "image/svg+xml";

/// Result of importing one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedImage {
    /// `data:<mime>;base64,...`
    pub data_url: String,
    /// Path the card should refer to, e.g. `/local/images/plan.png`
    pub reference: String,
}

/// Error type for image import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    Empty,
    /// No file name left once directories are stripped
    MissingFilename,
    UnknownFormat { filename: String },
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "image is empty"),
            Self::MissingFilename => write!(f, "image has no file name"),
            Self::UnknownFormat { filename } => {
                write!(f, "{} is not a recognised image format", filename)
            }
        }
    }
}

impl std::error::Error for IngestError {}

fn mime_type(bytes: &[u8], filename: &str) -> Option<&'static str> {
    if let Ok(format) = image::guess_format(bytes) {
        return Some(format.to_mime_type());
    }
    let is_svg = Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    (is_svg && std::str::from_utf8(bytes).is_ok()).then_some(SVG_MIME)
}

/// Import `bytes` dropped as `filename`.
///
/// Only the last path component of `filename` is used for the reference.
pub fn ingest_image(
    bytes: &[u8],
    filename: &str,
    image_base: &str,
) -> Result<IngestedImage, IngestError> {
    if bytes.is_empty() {
        return Err(IngestError::Empty);
    }
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or(IngestError::MissingFilename)?;

    let mime = mime_type(bytes, name).ok_or_else(|| IngestError::UnknownFormat {
        filename: name.to_string(),
    })?;

    let separator = if image_base.ends_with('/') { "" } else { "/" };
    let image = IngestedImage {
        data_url: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        reference: format!("{image_base}{separator}{name}"),
    };
    tracing::debug!(
        mime,
        size = bytes.len(),
        reference = %image.reference,
        "imported background image"
    );
    Ok(image)
}

fn background_line() -> &'static Regex {
    static BACKGROUND_LINE: OnceLock<Regex> = OnceLock::new();
    BACKGROUND_LINE.get_or_init(|| {
        Regex::new(r"(?m)^image:[^\r\n]*$").expect("Invalid background regex")
    })
}

fn kind_line() -> &'static Regex {
    static KIND_LINE: OnceLock<Regex> = OnceLock::new();
    KIND_LINE.get_or_init(|| Regex::new(r"(?m)^type:[^\r\n]*$").expect("Invalid kind regex"))
}

/// Point the card's top-level `image:` key at `reference`.
///
/// Replaces the first top-level `image:` line if there is one, otherwise adds
/// the key right after the top-level `type:` line, otherwise at the top.
/// Indented `image:` keys on elements are never touched.
pub fn set_background_reference(text: &str, reference: &str) -> String {
    let line = format!("image: {}", codec::scalar(reference));

    if background_line().is_match(text) {
        return background_line().replace(text, NoExpand(&line)).into_owned();
    }
    if let Some(kind) = kind_line().find(text) {
        let end = kind.end();
        return format!("{}\n{}{}", &text[..end], line, &text[end..]);
    }
    format!("{}\n{}", line, text)
}
