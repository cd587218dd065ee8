//! Persisted editing session
//!
//! The session is one JSON object with three independent slots: the card
//! text, the user-supplied background image and the placeholder preference.
//! Each slot is decoded on its own, so a damaged slot only loses itself.
//! The store is read once at startup and rewritten after every change.

use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const YAML_SLOT: &str = "ha-picture-yaml";
const IMAGE_SLOT: &str = "ha-picture-image";
const PLACEHOLDERS_SLOT: &str = "ha-picture-show-placeholders";

/// Card shown when nothing has been saved yet
pub const DEFAULT_YAML: &str = "type: picture-elements
elements:
  - type: state-label
    entity: sensor.temp_1f_1_temp
    prefix: 🌡️
    style:
      left: 42.4%
      top: 42.4%
      color: red
      font-size: 14px
  - type: state-label
    entity: sensor.temp_1f_1_humidity
    prefix: 1 💧
    style:
      left: 32.6%
      top: 46.2%
      color: red
      font-size: 14px
  - type: state-label
    entity: sensor.temp_1f_2_temp
    prefix: 🌡️
    style:
      left: 65.4%
      top: 47.2%
      color: red
      font-size: 14px
  - type: state-label
    entity: sensor.temp_1f_2_humidity
    prefix: 2 💧
    style:
      left: 64.4%
      top: 50%
      color: red
      font-size: 14px
";

/// Everything that survives a restart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Last card text, valid or not
    pub yaml: String,
    /// Embedded (data URL) background the user dropped in, if any
    pub image: Option<String>,
    pub show_placeholders: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            yaml: DEFAULT_YAML.to_string(),
            image: None,
            show_placeholders: true,
        }
    }
}

/// On-disk layout; slot names are fixed
#[derive(Serialize)]
struct SessionFile<'a> {
    #[serde(rename = "ha-picture-yaml")]
    yaml: &'a str,
    #[serde(rename = "ha-picture-image", skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    #[serde(rename = "ha-picture-show-placeholders")]
    show_placeholders: bool,
}

/// Error type for session persistence
#[derive(Debug)]
pub enum SessionError {
    /// No config directory and no explicit path
    NoLocation,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoLocation => write!(f, "no location available for the session file"),
            Self::Io { path, source } => {
                write!(f, "failed to write session {}: {}", path.display(), source)
            }
            Self::Encode(err) => write!(f, "failed to encode session: {}", err),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoLocation => None,
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Reads and writes [`SessionState`] at one path
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store at `<config dir>/session.json`
    pub fn default_location() -> Self {
        Self {
            path: crate::config_paths::session_file(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load the session, falling back to defaults slot by slot
    pub fn load(&self) -> SessionState {
        let Some(path) = &self.path else {
            tracing::debug!("No session location available, using defaults");
            return SessionState::default();
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No session at {}, starting fresh", path.display());
                return SessionState::default();
            }
            Err(e) => {
                tracing::warn!("Failed to read session {}: {}", path.display(), e);
                return SessionState::default();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(slots)) => Self::decode(&slots),
            Ok(_) => {
                tracing::warn!("Session {} is not a JSON object, ignoring", path.display());
                SessionState::default()
            }
            Err(e) => {
                tracing::warn!("Failed to parse session {}: {}", path.display(), e);
                SessionState::default()
            }
        }
    }

    fn decode(slots: &serde_json::Map<String, Value>) -> SessionState {
        let defaults = SessionState::default();

        let yaml = match slots.get(YAML_SLOT) {
            Some(Value::String(yaml)) => yaml.clone(),
            None => defaults.yaml,
            Some(other) => {
                tracing::warn!("Ignoring session slot {}: {}", YAML_SLOT, other);
                defaults.yaml
            }
        };

        let image = match slots.get(IMAGE_SLOT) {
            Some(Value::String(image)) if !image.is_empty() => Some(image.clone()),
            Some(Value::String(_)) | Some(Value::Null) | None => None,
            Some(_) => {
                tracing::warn!("Ignoring session slot {}: not a string", IMAGE_SLOT);
                None
            }
        };

        let show_placeholders = match slots.get(PLACEHOLDERS_SLOT) {
            Some(Value::Bool(flag)) => *flag,
            None => defaults.show_placeholders,
            Some(other) => {
                tracing::warn!("Ignoring session slot {}: {}", PLACEHOLDERS_SLOT, other);
                defaults.show_placeholders
            }
        };

        SessionState {
            yaml,
            image,
            show_placeholders,
        }
    }

    /// Overwrite the stored session
    pub fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        let Some(path) = &self.path else {
            return Err(SessionError::NoLocation);
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = SessionFile {
            yaml: &state.yaml,
            image: state.image.as_deref(),
            show_placeholders: state.show_placeholders,
        };
        let content = serde_json::to_string_pretty(&file).map_err(SessionError::Encode)?;
        std::fs::write(path, content).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!("Saved session to {}", path.display());
        Ok(())
    }
}
