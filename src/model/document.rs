//! Card document model - the structured form of a picture-elements card
//!
//! A card is a background reference plus an ordered list of positioned
//! elements. The order of `elements` is meaningful: it is the paint order on
//! the preview and it drives where new sensors and devices are inserted.
//!
//! Unknown keys are carried in `extra` maps so hand-written YAML survives a
//! parse/serialize cycle untouched.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::{Mapping, Number, Value};
use std::fmt;

/// Fixed `type` tag of the card
pub const DOCUMENT_KIND: &str = "picture-elements";

fn default_kind() -> String {
    DOCUMENT_KIND.to_string()
}

/// A complete picture-elements card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Card type tag, defaulted to `picture-elements` when missing
    #[serde(rename = "type")]
    pub kind: String,
    /// Background image reference
    #[serde(rename = "image", skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Elements in paint order (never absent, `null` reads as empty)
    pub elements: Vec<Element>,
    /// Any other top-level keys, preserved verbatim
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            background: None,
            elements: Vec::new(),
            extra: Mapping::new(),
        }
    }
}

impl Document {
    /// Look up an element by compound address
    pub fn element(&self, address: ElementAddress) -> Option<&Element> {
        let top = self.elements.get(address.index)?;
        match address.nested {
            None => Some(top),
            Some(nested) => match top {
                Element::Conditional(group) => group.elements.get(nested),
                _ => None,
            },
        }
    }

    /// Mutable lookup by compound address
    pub fn element_mut(&mut self, address: ElementAddress) -> Option<&mut Element> {
        let top = self.elements.get_mut(address.index)?;
        match address.nested {
            None => Some(top),
            Some(nested) => match top {
                Element::Conditional(group) => group.elements.get_mut(nested),
                _ => None,
            },
        }
    }

    /// Index of the last top-level element of the given kind
    pub fn last_index_of(&self, kind: ElementKind) -> Option<usize> {
        self.elements.iter().rposition(|e| e.kind() == kind)
    }

    /// Point the background at `reference`, replacing a tagged `image` too
    pub fn set_background(&mut self, reference: String) {
        drop_keys(&mut self.extra, &["image"]);
        self.background = Some(reference);
    }
}

/// Element type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    StateLabel,
    Image,
    Conditional,
}

impl ElementKind {
    /// The `type:` value used in YAML
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::StateLabel => "state-label",
            ElementKind::Image => "image",
            ElementKind::Conditional => "conditional",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positioned element on the card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Element {
    #[serde(rename = "state-label")]
    StateLabel(StateLabel),
    #[serde(rename = "image")]
    Image(ImageElement),
    #[serde(rename = "conditional")]
    Conditional(Conditional),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::StateLabel(_) => ElementKind::StateLabel,
            Element::Image(_) => ElementKind::Image,
            Element::Conditional(_) => ElementKind::Conditional,
        }
    }

    /// Entity id, if this kind of element carries one
    pub fn entity(&self) -> Option<&str> {
        match self {
            Element::StateLabel(label) => Some(label.entity.as_str()),
            Element::Image(image) => image.entity.as_deref(),
            Element::Conditional(_) => None,
        }
    }

    pub fn style(&self) -> Option<&Style> {
        match self {
            Element::StateLabel(label) => label.style.as_ref(),
            Element::Image(image) => image.style.as_ref(),
            Element::Conditional(group) => group.style.as_ref(),
        }
    }

    fn style_slot(&mut self) -> &mut Option<Style> {
        match self {
            Element::StateLabel(label) => &mut label.style,
            Element::Image(image) => &mut image.style,
            Element::Conditional(group) => &mut group.style,
        }
    }

    /// Current `(left, top)` if both are set
    pub fn position(&self) -> Option<(&str, &str)> {
        let style = self.style()?;
        Some((style.left.as_deref()?, style.top.as_deref()?))
    }

    /// Overwrite `left`/`top`, synthesizing a style block if there is none.
    ///
    /// Every other style key is left as it was.
    pub fn set_position(&mut self, left: &str, top: &str) {
        let style = self.style_slot().get_or_insert_with(Style::default);
        drop_keys(&mut style.extra, &["left", "top"]);
        style.left = Some(left.to_string());
        style.top = Some(top.to_string());
    }
}

/// `type: state-label`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateLabel {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// `type: image`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Single static image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Per-state images (`on`, `off`, `unavailable`, ...), in source order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_image: Option<Mapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl ImageElement {
    /// Image configured for `state`, if any
    pub fn state_image(&self, state: &str) -> Option<&str> {
        self.state_image.as_ref()?.get(state)?.as_str()
    }
}

/// `type: conditional`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditional {
    pub conditions: Vec<Condition>,
    pub elements: Vec<Element>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// One `entity`/`state` condition of a conditional group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Inline CSS-ish style of an element.
///
/// Values are kept as text; ones that were numbers in the card (`left: 50`)
/// are written back as numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "number_or_text")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "number_or_text")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "number_or_text")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "number_or_text")]
    pub color: Option<String>,
    #[serde(
        rename = "font-size",
        skip_serializing_if = "Option::is_none",
        serialize_with = "number_or_text"
    )]
    pub font_size: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Style {
    /// Style with only a position set
    pub fn at(left: &str, top: &str) -> Self {
        Self {
            left: Some(left.to_string()),
            top: Some(top.to_string()),
            ..Self::default()
        }
    }
}

/// Address of an element: a top-level index plus, for elements inside a
/// conditional group, the index within the group.
///
/// `nested: None` always means the top-level element itself, including when
/// that element is a conditional group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementAddress {
    pub index: usize,
    pub nested: Option<usize>,
}

impl ElementAddress {
    pub fn top(index: usize) -> Self {
        Self {
            index,
            nested: None,
        }
    }

    pub fn nested(index: usize, nested: usize) -> Self {
        Self {
            index,
            nested: Some(nested),
        }
    }
}

impl fmt::Display for ElementAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nested {
            Some(nested) => write!(f, "#{}.{}", self.index, nested),
            None => write!(f, "#{}", self.index),
        }
    }
}

// =============================================================================
// Reading cards
// =============================================================================
//
// Derived `flatten` and internally tagged enums buffer values in a form that
// cannot hold YAML tags (`!secret`, `!include`). Each card type reads a plain
// `Mapping` instead, picks its own keys out of it and keeps the rest.

const ELEMENT_TYPES: &[&str] = &["state-label", "image", "conditional"];

/// Separate the keys a type reads from the ones it only carries.
///
/// A tagged value under an `optional` key stays with the carried keys, so it
/// is written back verbatim and reads as unset. `required` keys are always
/// read (a tag on them is dropped).
fn split_fields(mapping: Mapping, optional: &[&str], required: &[&str]) -> (Mapping, Mapping) {
    let mut fields = Mapping::new();
    let mut extra = Mapping::new();
    for (key, value) in mapping {
        let read = match key.as_str() {
            Some(name) if required.contains(&name) => true,
            Some(name) if optional.contains(&name) => !matches!(value, Value::Tagged(_)),
            _ => false,
        };
        if read {
            fields.insert(key, value);
        } else {
            extra.insert(key, value);
        }
    }
    (fields, extra)
}

/// Remove `keys` from `mapping`, keeping the order of the rest
fn drop_keys(mapping: &mut Mapping, keys: &[&str]) {
    if keys.iter().any(|key| mapping.contains_key(*key)) {
        *mapping = std::mem::take(mapping)
            .into_iter()
            .filter(|(key, _)| !key.as_str().is_some_and(|name| keys.contains(&name)))
            .collect();
    }
}

fn from_value<T: DeserializeOwned, E: de::Error>(value: Value) -> Result<T, E> {
    serde_yaml::from_value(value).map_err(E::custom)
}

#[derive(Deserialize)]
struct DocumentFields {
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    #[serde(rename = "image", default)]
    background: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    elements: Vec<Element>,
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mapping = Mapping::deserialize(deserializer)?;
        let (fields, extra) = split_fields(mapping, &["image", "elements"], &["type"]);
        let fields: DocumentFields = from_value(Value::Mapping(fields))?;
        Ok(Self {
            kind: fields.kind,
            background: fields.background,
            elements: fields.elements,
            extra,
        })
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut mapping = Mapping::deserialize(deserializer)?;
        let kind = match mapping.get("type") {
            Some(Value::String(kind)) => kind.clone(),
            Some(_) => return Err(de::Error::custom("element `type` must be a string")),
            None => return Err(de::Error::missing_field("type")),
        };
        drop_keys(&mut mapping, &["type"]);
        let body = Value::Mapping(mapping);
        match kind.as_str() {
            "state-label" => from_value(body).map(Element::StateLabel),
            "image" => from_value(body).map(Element::Image),
            "conditional" => from_value(body).map(Element::Conditional),
            other => Err(de::Error::unknown_variant(other, ELEMENT_TYPES)),
        }
    }
}

#[derive(Deserialize)]
struct StateLabelFields {
    #[serde(deserialize_with = "scalar_string")]
    entity: String,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    prefix: Option<String>,
    #[serde(default)]
    style: Option<Style>,
}

impl<'de> Deserialize<'de> for StateLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mapping = Mapping::deserialize(deserializer)?;
        let (fields, extra) = split_fields(mapping, &["prefix", "style"], &["entity"]);
        let fields: StateLabelFields = from_value(Value::Mapping(fields))?;
        Ok(Self {
            entity: fields.entity,
            prefix: fields.prefix,
            style: fields.style,
            extra,
        })
    }
}

#[derive(Deserialize)]
struct ImageFields {
    #[serde(default, deserialize_with = "optional_scalar_string")]
    entity: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    state_image: Option<Mapping>,
    #[serde(default)]
    style: Option<Style>,
}

impl<'de> Deserialize<'de> for ImageElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mapping = Mapping::deserialize(deserializer)?;
        let (fields, extra) =
            split_fields(mapping, &["entity", "image", "state_image", "style"], &[]);
        let fields: ImageFields = from_value(Value::Mapping(fields))?;
        Ok(Self {
            entity: fields.entity,
            image: fields.image,
            state_image: fields.state_image,
            style: fields.style,
            extra,
        })
    }
}

#[derive(Deserialize)]
struct ConditionalFields {
    #[serde(default)]
    conditions: Vec<Condition>,
    #[serde(default, deserialize_with = "null_as_empty")]
    elements: Vec<Element>,
    #[serde(default)]
    style: Option<Style>,
}

impl<'de> Deserialize<'de> for Conditional {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mapping = Mapping::deserialize(deserializer)?;
        let (fields, extra) = split_fields(mapping, &["conditions", "elements", "style"], &[]);
        let fields: ConditionalFields = from_value(Value::Mapping(fields))?;
        Ok(Self {
            conditions: fields.conditions,
            elements: fields.elements,
            style: fields.style,
            extra,
        })
    }
}

#[derive(Deserialize)]
struct ConditionFields {
    #[serde(deserialize_with = "scalar_string")]
    entity: String,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    state: Option<String>,
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mapping = Mapping::deserialize(deserializer)?;
        let (fields, extra) = split_fields(mapping, &["state"], &["entity"]);
        let fields: ConditionFields = from_value(Value::Mapping(fields))?;
        Ok(Self {
            entity: fields.entity,
            state: fields.state,
            extra,
        })
    }
}

#[derive(Deserialize)]
struct StyleFields {
    #[serde(default, deserialize_with = "optional_scalar_string")]
    left: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    top: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    width: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    color: Option<String>,
    #[serde(rename = "font-size", default, deserialize_with = "optional_scalar_string")]
    font_size: Option<String>,
}

impl<'de> Deserialize<'de> for Style {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mapping = Mapping::deserialize(deserializer)?;
        let (fields, extra) = split_fields(
            mapping,
            &["left", "top", "width", "color", "font-size"],
            &[],
        );
        let fields: StyleFields = from_value(Value::Mapping(fields))?;
        Ok(Self {
            left: fields.left,
            top: fields.top,
            width: fields.width,
            color: fields.color,
            font_size: fields.font_size,
            extra,
        })
    }
}

// =============================================================================
// Lenient scalar handling
// =============================================================================

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Element>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Element>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Render a YAML scalar as text (`left: 50` reads as `"50"`)
fn scalar_text<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Tagged(tagged) => scalar_text(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => {
            Err(E::custom("expected a scalar value, found a nested block"))
        }
    }
}

fn optional_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(Value::deserialize(deserializer)?)
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(Value::deserialize(deserializer)?)?
        .ok_or_else(|| de::Error::custom("expected a value, found null"))
}

/// The number `text` was read from, if it renders back to exactly `text`
fn as_number(text: &str) -> Option<Number> {
    if text.is_empty()
        || !text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-'))
    {
        return None;
    }
    let Ok(Value::Number(number)) = serde_yaml::from_str::<Value>(text) else {
        return None;
    };
    let rendered = serde_yaml::to_string(&number).ok()?;
    (rendered.trim_end() == text).then_some(number)
}

fn number_or_text<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.as_deref().and_then(as_number) {
        Some(number) => number.serialize(serializer),
        None => value.serialize(serializer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(entity: &str) -> Element {
        Element::StateLabel(StateLabel {
            entity: entity.to_string(),
            prefix: None,
            style: None,
            extra: Mapping::new(),
        })
    }

    #[test]
    fn test_set_position_synthesizes_style() {
        let mut element = label("sensor.x");
        assert!(element.position().is_none());

        element.set_position("10%", "20%");
        assert_eq!(element.position(), Some(("10%", "20%")));
    }

    #[test]
    fn test_set_position_keeps_other_style_keys() {
        let mut element = label("sensor.x");
        if let Element::StateLabel(l) = &mut element {
            l.style = Some(Style {
                color: Some("red".to_string()),
                ..Style::at("1%", "2%")
            });
        }

        element.set_position("5%", "6%");

        let style = element.style().unwrap();
        assert_eq!(style.color.as_deref(), Some("red"));
        assert_eq!(style.left.as_deref(), Some("5%"));
    }

    #[test]
    fn test_nested_address_requires_conditional() {
        let doc = Document {
            elements: vec![label("sensor.a")],
            ..Document::default()
        };
        assert!(doc.element(ElementAddress::top(0)).is_some());
        assert!(doc.element(ElementAddress::nested(0, 0)).is_none());
    }

    #[test]
    fn test_address_display() {
        assert_eq!(ElementAddress::top(3).to_string(), "#3");
        assert_eq!(ElementAddress::nested(3, 1).to_string(), "#3.1");
    }

    #[test]
    fn test_set_position_replaces_tagged_position() {
        let mut element: Element = serde_yaml::from_str(
            "type: state-label\nentity: sensor.x\nstyle:\n  left: !secret spot\n  color: red\n",
        )
        .unwrap();
        assert!(element.position().is_none());

        element.set_position("5%", "6%");
        let style = element.style().unwrap();
        assert!(style.extra.is_empty());
        assert_eq!(style.color.as_deref(), Some("red"));
        assert_eq!(element.position(), Some(("5%", "6%")));
    }

    #[test]
    fn test_extra_keys_keep_their_order() {
        let element: Element = serde_yaml::from_str(
            "tap_action: {action: toggle}\ntype: image\nentity: switch.a\nhold_action: {action: none}\n",
        )
        .unwrap();
        let Element::Image(image) = element else {
            panic!("expected an image");
        };
        let keys: Vec<_> = image.extra.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["tap_action", "hold_action"]);
    }

    #[test]
    fn test_style_numbers_render_as_numbers() {
        let style = Style {
            width: Some("7.5".to_string()),
            color: Some("red".to_string()),
            ..Style::at("50", "12%")
        };
        let text = serde_yaml::to_string(&style).unwrap();
        assert_eq!(text, "left: 50\ntop: 12%\nwidth: 7.5\ncolor: red\n");
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(ElementKind::StateLabel.as_str(), "state-label");
        assert_eq!(ElementKind::Conditional.to_string(), "conditional");
    }
}
