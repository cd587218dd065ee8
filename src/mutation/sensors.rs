//! Temperature/humidity sensor pairs
//!
//! A pair is two state labels whose entities differ only in the `_temp` /
//! `_humidity` suffix. The suffix is the only link between them.

use serde_yaml::Mapping;

use super::{edit, EditError};
use crate::model::{Element, ElementKind, StateLabel, Style};

const TEMP_SUFFIX: &str = "_temp";
const HUMIDITY_SUFFIX: &str = "_humidity";

const THERMOMETER: &str = "🌡️";
const DROPLET: &str = "💧";

/// Which half of a sensor pair an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorRole {
    Temperature,
    Humidity,
}

impl SensorRole {
    pub fn of(entity: &str) -> Option<Self> {
        if entity.ends_with(TEMP_SUFFIX) {
            Some(Self::Temperature)
        } else if entity.ends_with(HUMIDITY_SUFFIX) {
            Some(Self::Humidity)
        } else {
            None
        }
    }
}

/// The other half of a sensor pair, derived from the suffix
pub fn paired_entity(entity: &str) -> Option<String> {
    if let Some(stem) = entity.strip_suffix(TEMP_SUFFIX) {
        Some(format!("{stem}{HUMIDITY_SUFFIX}"))
    } else {
        entity
            .strip_suffix(HUMIDITY_SUFFIX)
            .map(|stem| format!("{stem}{TEMP_SUFFIX}"))
    }
}

fn label(entity: String, prefix: String, left: &str, top: &str) -> Element {
    Element::StateLabel(StateLabel {
        entity,
        prefix: Some(prefix),
        style: Some(Style {
            color: Some("red".to_string()),
            font_size: Some("14px".to_string()),
            ..Style::at(left, top)
        }),
        extra: Mapping::new(),
    })
}

/// Build the `(temperature, humidity)` labels for sensor `id` on `floor`
pub fn sensor_pair(floor: &str, id: &str) -> (Element, Element) {
    let stem = format!("sensor.temp_{floor}f_{id}");
    let temperature = label(
        format!("{stem}{TEMP_SUFFIX}"),
        THERMOMETER.to_string(),
        "60%",
        "80%",
    );
    let humidity = label(
        format!("{stem}{HUMIDITY_SUFFIX}"),
        format!("{id} {DROPLET}"),
        "54.8%",
        "83%",
    );
    (temperature, humidity)
}

/// Insert a new sensor pair right after the last existing state label, or at
/// the end of the card when there is none.
pub fn insert_sensor_pair(text: &str, floor: &str, id: &str) -> Result<String, EditError> {
    edit(text, "insert_sensor_pair", |document| {
        let (temperature, humidity) = sensor_pair(floor, id);
        if let Some(entity) = temperature.entity() {
            if document.elements.iter().any(|e| e.entity() == Some(entity)) {
                tracing::debug!("Sensor {} is already on the card, adding again", entity);
            }
        }

        let at = document
            .last_index_of(ElementKind::StateLabel)
            .map(|i| i + 1)
            .unwrap_or(document.elements.len());
        document.elements.splice(at..at, [temperature, humidity]);
        Ok(())
    })
}
