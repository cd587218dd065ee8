//! What an element shows on the static preview

use super::sensors::SensorRole;
use crate::model::Element;

const PLACEHOLDER_TEMPERATURE: &str = "🌡️30.9 °C";
const PLACEHOLDER_HUMIDITY: &str = "💧76.0%";
const DROPLET_SUFFIX: &str = " 💧";

/// Image to draw for an element.
///
/// There is no live device state here, so state images always resolve to
/// their `off` entry.
pub fn resolve_display_image(element: &Element) -> Option<&str> {
    match element {
        Element::Image(image) if image.state_image.is_some() => image.state_image("off"),
        Element::Image(image) => image.image.as_deref(),
        Element::StateLabel(_) | Element::Conditional(_) => None,
    }
}

/// Text for a state label.
///
/// With placeholders on, sensors show a canned reading (humidity keeps the
/// sensor number from its prefix); everything else shows `"{prefix} {entity}"`.
pub fn resolve_placeholder_text(entity: &str, prefix: Option<&str>, placeholders: bool) -> String {
    let plain = || format!("{} {}", prefix.unwrap_or(""), entity);
    if !placeholders {
        return plain();
    }

    match SensorRole::of(entity) {
        Some(SensorRole::Temperature) => PLACEHOLDER_TEMPERATURE.to_string(),
        Some(SensorRole::Humidity) => {
            let id = prefix
                .map(|p| p.replace(DROPLET_SUFFIX, ""))
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| "1".to_string());
            format!("{id} {PLACEHOLDER_HUMIDITY}")
        }
        None => plain(),
    }
}
