//! Floor plan card editor - Elm-style editing core
//!
//! This crate keeps a picture-elements card's YAML text in sync with a typed
//! model: a codec between the two, semantic edits (move, add sensors, add
//! humidifier groups, delete), line highlighting for the dragged element and
//! a persisted session, all driven through one message/update loop.

pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod highlight;
pub mod ingest;
pub mod messages;
pub mod model;
pub mod mutation;
pub mod session;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::{AppModel, Document, Element, ElementAddress};
pub use session::{SessionState, SessionStore};
