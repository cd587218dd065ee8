//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use floorplan::config::EditorConfig;
use floorplan::model::{AppModel, Document, Element};
use floorplan::session::SessionState;
use floorplan::{codec, SessionStore};
use tempfile::TempDir;

/// Three top-level blocks with a blank line inside the middle one
pub const THREE_BLOCKS: &str = "type: picture-elements
image: /local/images/1st_floor.png
elements:
  - type: state-label
    entity: sensor.temp_1f_1_temp
    prefix: 🌡️
    style:
      left: 10%
      top: 10%

  - type: image
    entity: switch.switch_humidifier_1f_floor

    state_image:
      'on': /local/images/gif/on_humidifier.gif
      'off': /local/images/gif/off_humidifier.png
    style:
      left: 20%
      top: 20%

  - type: state-label
    entity: sensor.temp_1f_1_humidity
    prefix: 1 💧
    style:
      left: 30%
      top: 30%
";

/// Card with a conditional group holding a sensor pair
pub const WITH_GROUP: &str = "type: picture-elements
elements:
  - type: state-label
    entity: sensor.outdoor
  - type: conditional
    conditions:
      - entity: switch.switch_humidifier_1f_floor
        state: 'on'
    elements:
      - type: state-label
        entity: sensor.temp_1f_2_temp
        style:
          left: 1%
          top: 1%
      - type: state-label
        entity: sensor.temp_1f_2_humidity
        style:
          left: 2%
          top: 2%
";

pub fn parse(text: &str) -> Document {
    codec::parse(text).expect("test card should parse")
}

/// Entity of every top-level element ("-" when it has none)
pub fn entities(text: &str) -> Vec<String> {
    parse(text)
        .elements
        .iter()
        .map(|e| e.entity().unwrap_or("-").to_string())
        .collect()
}

pub fn kinds(elements: &[Element]) -> Vec<&'static str> {
    elements.iter().map(|e| e.kind().as_str()).collect()
}

/// Model over `text` with default config and placeholders on
pub fn test_model(text: &str) -> AppModel {
    AppModel::new(
        SessionState {
            yaml: text.to_string(),
            image: None,
            show_placeholders: true,
        },
        EditorConfig::default(),
    )
}

/// Store backed by a file in a fresh temp dir (keep the dir alive)
pub fn temp_store() -> (TempDir, SessionStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = SessionStore::new(dir.path().join("session.json"));
    (dir, store)
}
