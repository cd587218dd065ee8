//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/floorplan-editor/config.yaml`

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where one device of a humidifier group is dropped on the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub top: String,
    pub left: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl Placement {
    pub fn new(top: &str, left: &str, width: &str) -> Self {
        Self {
            top: top.to_string(),
            left: left.to_string(),
            width: Some(width.to_string()),
        }
    }
}

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Path prefix for imported background images (e.g. "/local/images/")
    #[serde(default = "default_image_base")]
    pub image_base: String,
    /// Where "add humidifier group" places its devices
    #[serde(default = "default_humidifier_positions")]
    pub humidifier_positions: Vec<Placement>,
}

fn default_image_base() -> String {
    "/local/images/".to_string()
}

fn default_humidifier_positions() -> Vec<Placement> {
    vec![
        Placement::new("24%", "82%", "15%"),
        Placement::new("49%", "63%", "15%"),
        Placement::new("68%", "65%", "15%"),
    ]
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            image_base: default_image_base(),
            humidifier_positions: default_humidifier_positions(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults if it can't be read
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_positions() {
        let config = EditorConfig::default();
        assert_eq!(config.humidifier_positions.len(), 3);
        assert_eq!(config.humidifier_positions[0].top, "24%");
        assert_eq!(config.image_base, "/local/images/");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EditorConfig = serde_yaml::from_str("image_base: /media/plans/\n").unwrap();
        assert_eq!(config.image_base, "/media/plans/");
        assert_eq!(config.humidifier_positions, default_humidifier_positions());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = EditorConfig {
            image_base: "/local/floorplans/".to_string(),
            humidifier_positions: vec![Placement::new("1%", "2%", "3%")],
        };

        config.save_to(&path).unwrap();
        assert_eq!(EditorConfig::load_from(&path), config);
    }

    #[test]
    fn test_unparseable_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "humidifier_positions: [oops").unwrap();

        assert_eq!(EditorConfig::load_from(&path), EditorConfig::default());
    }
}
