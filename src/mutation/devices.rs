//! Humidifier device groups
//!
//! A group is several image elements sharing one switch entity, each showing
//! the same on/off/unavailable artwork at a different spot on the plan.

use serde_yaml::{Mapping, Value};

use super::{edit, EditError};
use crate::config::Placement;
use crate::model::{Element, ElementKind, ImageElement, Style};

const ON_IMAGE: &str = "/local/images/gif/on_humidifier.gif";
const OFF_IMAGE: &str = "/local/images/gif/off_humidifier.png";

/// Switch entity shared by every humidifier on `floor`
pub fn humidifier_entity(floor: &str) -> String {
    format!("switch.switch_humidifier_{floor}f_floor")
}

/// Default background for `floor` ("1" -> `/local/images/1st_floor.png`)
pub fn floor_background(floor: &str) -> String {
    let ordinal = match floor {
        "1" => "1st".to_string(),
        "2" => "2nd".to_string(),
        "3" => "3rd".to_string(),
        other => format!("{other}th"),
    };
    format!("/local/images/{ordinal}_floor.png")
}

fn state_images() -> Mapping {
    let mut images = Mapping::new();
    for (state, image) in [
        ("on", ON_IMAGE),
        ("off", OFF_IMAGE),
        ("unavailable", OFF_IMAGE),
    ] {
        images.insert(Value::from(state), Value::from(image));
    }
    images
}

fn humidifier(entity: &str, placement: &Placement) -> Element {
    Element::Image(ImageElement {
        entity: Some(entity.to_string()),
        image: None,
        state_image: Some(state_images()),
        style: Some(Style {
            width: placement.width.clone(),
            ..Style::at(&placement.left, &placement.top)
        }),
        extra: Mapping::new(),
    })
}

/// Insert one humidifier per placement right after the last existing image
/// element (or at the very start of the card), and point the background at
/// the floor's default plan.
pub fn insert_device_group(
    text: &str,
    floor: &str,
    placements: &[Placement],
) -> Result<String, EditError> {
    edit(text, "insert_device_group", |document| {
        let entity = humidifier_entity(floor);
        let group = placements.iter().map(|p| humidifier(&entity, p));

        let at = document
            .last_index_of(ElementKind::Image)
            .map(|i| i + 1)
            .unwrap_or(0);
        document.elements.splice(at..at, group);
        document.set_background(floor_background(floor));
        Ok(())
    })
}
