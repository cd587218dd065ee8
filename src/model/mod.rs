//! Application model - the complete state of the editing session
//!
//! The card text is the source of truth. `document` is derived from it and
//! keeps the last version that parsed, so the preview survives while the text
//! is mid-edit and temporarily invalid.

pub mod document;

pub use document::{
    Condition, Conditional, Document, Element, ElementAddress, ElementKind, ImageElement,
    StateLabel, Style, DOCUMENT_KIND,
};

use crate::codec::{self, CodecError};
use crate::config::EditorConfig;
use crate::highlight;
use crate::ingest::IngestError;
use crate::mutation::{resolve_display_image, resolve_placeholder_text, EditError};
use crate::session::SessionState;

/// Home Assistant's `www/` folder; not reachable outside Home Assistant
const LOCAL_PREFIX: &str = "/local/";

/// Last non-fatal problem, shown to the user until the next success
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Current text does not parse; the preview shows the last good card
    Parse(CodecError),
    /// A semantic edit was refused; the text is unchanged
    Edit(EditError),
    /// A dropped image was rejected
    Ingest(IngestError),
    /// The session could not be written
    Persist(String),
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{}", err),
            Self::Edit(err) => write!(f, "edit not applied: {}", err),
            Self::Ingest(err) => write!(f, "image not imported: {}", err),
            Self::Persist(message) => write!(f, "session not saved: {}", message),
        }
    }
}

/// A state label as the preview shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelView {
    pub address: ElementAddress,
    pub text: String,
    pub position: Option<(String, String)>,
}

/// An image as the preview shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub address: ElementAddress,
    pub source: String,
    pub position: Option<(String, String)>,
}

/// The complete application model
#[derive(Debug, Clone)]
pub struct AppModel {
    /// Card text exactly as the user last left it
    pub text: String,
    /// Last card that parsed
    pub document: Document,
    /// Embedded background dropped in by the user
    pub background_image: Option<String>,
    pub show_placeholders: bool,
    /// Element currently being dragged on the preview
    pub dragging: Option<ElementAddress>,
    pub config: EditorConfig,
    pub diagnostic: Option<Diagnostic>,
}

impl AppModel {
    /// Restore a session
    pub fn new(session: SessionState, config: EditorConfig) -> Self {
        let mut model = Self {
            text: String::new(),
            document: Document::default(),
            background_image: session.image,
            show_placeholders: session.show_placeholders,
            dragging: None,
            config,
            diagnostic: None,
        };
        model.set_text(session.yaml);
        model
    }

    /// State to persist
    pub fn session_state(&self) -> SessionState {
        SessionState {
            yaml: self.text.clone(),
            image: self.background_image.clone(),
            show_placeholders: self.show_placeholders,
        }
    }

    /// Replace the text and re-derive the document.
    ///
    /// Text that does not parse is still kept; the document stays at the
    /// last good version and a parse diagnostic is recorded.
    pub fn set_text(&mut self, text: String) {
        match codec::parse(&text) {
            Ok(document) => {
                self.document = document;
                self.diagnostic = None;
            }
            Err(err) => {
                tracing::warn!("Keeping last good card: {}", err);
                self.diagnostic = Some(Diagnostic::Parse(err));
            }
        }
        self.text = text;
    }

    /// Whether the current text parses
    pub fn is_text_valid(&self) -> bool {
        !matches!(self.diagnostic, Some(Diagnostic::Parse(_)))
    }

    /// Background the preview should show.
    ///
    /// The embedded image the user dropped in wins. Otherwise the card's own
    /// reference is shown unless it is a `/local/` path, which only resolves
    /// inside Home Assistant.
    pub fn display_background(&self) -> Option<&str> {
        if let Some(embedded) = self.background_image.as_deref() {
            return Some(embedded);
        }
        self.document
            .background
            .as_deref()
            .filter(|reference| !reference.starts_with(LOCAL_PREFIX))
    }

    /// Text lines of the element being dragged
    pub fn highlighted_lines(&self) -> Vec<usize> {
        highlight::highlighted_lines(&self.text, self.dragging)
    }

    /// Every state label with its display text, nested ones included
    pub fn labels(&self) -> Vec<LabelView> {
        self.visible()
            .into_iter()
            .filter_map(|(address, element)| match element {
                Element::StateLabel(label) => Some(LabelView {
                    address,
                    text: resolve_placeholder_text(
                        &label.entity,
                        label.prefix.as_deref(),
                        self.show_placeholders,
                    ),
                    position: owned_position(element),
                }),
                _ => None,
            })
            .collect()
    }

    /// Every element that draws an image, nested ones included
    pub fn images(&self) -> Vec<ImageView> {
        self.visible()
            .into_iter()
            .filter_map(|(address, element)| {
                resolve_display_image(element).map(|source| ImageView {
                    address,
                    source: source.to_string(),
                    position: owned_position(element),
                })
            })
            .collect()
    }

    /// Top-level elements followed by the contents of each group, in order
    fn visible(&self) -> Vec<(ElementAddress, &Element)> {
        let mut out = Vec::new();
        for (index, element) in self.document.elements.iter().enumerate() {
            out.push((ElementAddress::top(index), element));
            if let Element::Conditional(group) = element {
                out.extend(
                    group
                        .elements
                        .iter()
                        .enumerate()
                        .map(|(nested, e)| (ElementAddress::nested(index, nested), e)),
                );
            }
        }
        out
    }
}

fn owned_position(element: &Element) -> Option<(String, String)> {
    element
        .position()
        .map(|(left, top)| (left.to_string(), top.to_string()))
}
