//! Semantic edits on card text
//!
//! Every operation runs the same pipeline: parse the current text, change the
//! document, serialize it again. The input text is never touched; callers
//! commit the returned text only on `Ok`, so a failed edit leaves the session
//! exactly as it was.

mod delete;
mod devices;
mod display;
mod sensors;

pub use delete::{delete_element, DeleteTarget};
pub use devices::{floor_background, humidifier_entity, insert_device_group};
pub use display::{resolve_display_image, resolve_placeholder_text};
pub use sensors::{insert_sensor_pair, paired_entity, sensor_pair, SensorRole};

use crate::codec::{self, CodecError};
use crate::model::{Document, ElementAddress};

/// Why an edit was not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Current text does not parse (or the result does not render)
    Malformed(CodecError),
    /// Address does not name an element of the current document
    InvalidIndex {
        address: ElementAddress,
        len: usize,
    },
    /// More than one element matches a delete target that has no entity
    AmbiguousDeleteTarget { matches: usize },
    /// Nothing matches a delete target
    NotFound,
}

impl From<CodecError> for EditError {
    fn from(err: CodecError) -> Self {
        Self::Malformed(err)
    }
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "{}", err),
            Self::InvalidIndex { address, len } => {
                write!(f, "no element at {} (card has {} elements)", address, len)
            }
            Self::AmbiguousDeleteTarget { matches } => write!(
                f,
                "delete target has no entity and matches {} elements",
                matches
            ),
            Self::NotFound => write!(f, "no matching element to delete"),
        }
    }
}

impl std::error::Error for EditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

/// Parse, mutate, serialize
fn edit<F>(text: &str, op: &'static str, mutate: F) -> Result<String, EditError>
where
    F: FnOnce(&mut Document) -> Result<(), EditError>,
{
    let mut document = codec::parse(text)?;
    mutate(&mut document)?;
    let output = codec::serialize(&document)?;
    tracing::debug!(op, elements = document.elements.len(), "applied edit");
    Ok(output)
}

/// Move an element to `left`/`top`.
///
/// A missing style block is created; every other field of the element is
/// kept. An address that names nothing is reported as
/// [`EditError::InvalidIndex`] so the caller keeps its text unchanged; drags
/// are live input and must never take the session down.
pub fn update_position(
    text: &str,
    address: ElementAddress,
    left: &str,
    top: &str,
) -> Result<String, EditError> {
    edit(text, "update_position", |document| {
        let len = document.elements.len();
        let Some(element) = document.element_mut(address) else {
            tracing::warn!("Ignoring move of {}: card has {} elements", address, len);
            return Err(EditError::InvalidIndex { address, len });
        };
        element.set_position(left, top);
        Ok(())
    })
}
