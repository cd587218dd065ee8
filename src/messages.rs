//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::model::ElementAddress;
use crate::mutation::DeleteTarget;

/// Everything the user can do to a session
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Free-form edit in the text pane; bypasses the mutation engine
    TextEdited(String),
    /// Element dropped at a new spot on the preview
    MoveElement {
        address: ElementAddress,
        left: String,
        top: String,
    },
    /// Add a temperature/humidity label pair
    AddSensor { floor: String, id: String },
    /// Add the floor's humidifier group at the configured placements
    AddHumidifierGroup { floor: String },
    DeleteElement(DeleteTarget),
    /// Background image dropped on the preview
    ImageDropped { bytes: Vec<u8>, filename: String },
    SetPlaceholders(bool),
    TogglePlaceholders,
    DragStarted(ElementAddress),
    DragEnded,
    /// Start over from the built-in sample card
    ResetDocument,
}

impl Msg {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Msg::TextEdited(_) => "TextEdited",
            Msg::MoveElement { .. } => "MoveElement",
            Msg::AddSensor { .. } => "AddSensor",
            Msg::AddHumidifierGroup { .. } => "AddHumidifierGroup",
            Msg::DeleteElement(_) => "DeleteElement",
            Msg::ImageDropped { .. } => "ImageDropped",
            Msg::SetPlaceholders(_) => "SetPlaceholders",
            Msg::TogglePlaceholders => "TogglePlaceholders",
            Msg::DragStarted(_) => "DragStarted",
            Msg::DragEnded => "DragEnded",
            Msg::ResetDocument => "ResetDocument",
        }
    }
}
