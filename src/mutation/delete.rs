//! Element deletion with sensor-pair awareness

use super::sensors::{paired_entity, SensorRole};
use super::{edit, EditError};
use crate::model::{Document, Element, ElementAddress};

/// What to delete
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    /// Exactly the element at this address (plus its sensor partner)
    At(ElementAddress),
    /// Top-level elements equal to this one by type and entity. Entity-less
    /// elements must match structurally and unambiguously.
    Matching(Element),
}

/// Remove an element from the card.
///
/// Deleting either half of a `_temp`/`_humidity` label pair removes both
/// halves, wherever they sit in the sequence.
pub fn delete_element(text: &str, target: &DeleteTarget) -> Result<String, EditError> {
    edit(text, "delete_element", |document| match target {
        DeleteTarget::At(address) => delete_at(document, *address),
        DeleteTarget::Matching(element) => delete_matching(document, element),
    })
}

fn pair_partner(element: &Element) -> Option<String> {
    match element {
        Element::StateLabel(label) => paired_entity(&label.entity),
        _ => None,
    }
}

fn is_label_for(element: &Element, entity: &str) -> bool {
    matches!(element, Element::StateLabel(label) if label.entity == entity)
}

fn delete_at(document: &mut Document, address: ElementAddress) -> Result<(), EditError> {
    let len = document.elements.len();
    let invalid = EditError::InvalidIndex { address, len };

    let siblings = match address.nested {
        None => &mut document.elements,
        Some(_) => match document.elements.get_mut(address.index) {
            Some(Element::Conditional(group)) => &mut group.elements,
            _ => return Err(invalid),
        },
    };
    let position = address.nested.unwrap_or(address.index);
    if position >= siblings.len() {
        return Err(invalid);
    }

    let removed = siblings.remove(position);
    if let Some(partner) = pair_partner(&removed) {
        // Prefer the neighbour on the side a freshly inserted pair puts it:
        // with duplicate pairs that is the half added together with this one.
        let after = Some(position);
        let before = position.checked_sub(1);
        let neighbours = match removed.entity().and_then(SensorRole::of) {
            Some(SensorRole::Temperature) => [after, before],
            _ => [before, after],
        };
        let found = neighbours
            .into_iter()
            .flatten()
            .find(|&i| siblings.get(i).is_some_and(|e| is_label_for(e, &partner)))
            .or_else(|| siblings.iter().position(|e| is_label_for(e, &partner)));
        if let Some(i) = found {
            siblings.remove(i);
        }
    }
    tracing::debug!("Deleted {} at {}", removed.kind(), address);
    Ok(())
}

fn delete_matching(document: &mut Document, target: &Element) -> Result<(), EditError> {
    let before = document.elements.len();

    if let Some(entity) = target.entity() {
        let partner = pair_partner(target);
        let kind = target.kind();
        document.elements.retain(|e| {
            let same = e.kind() == kind && e.entity() == Some(entity);
            let paired = partner.as_deref().is_some_and(|p| is_label_for(e, p));
            !(same || paired)
        });
    } else {
        let matches: Vec<usize> = document
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| *e == target)
            .map(|(i, _)| i)
            .collect();
        match matches.as_slice() {
            [] => {}
            [only] => {
                document.elements.remove(*only);
            }
            many => {
                tracing::warn!(
                    "Refusing to delete {}: {} identical elements",
                    target.kind(),
                    many.len()
                );
                return Err(EditError::AmbiguousDeleteTarget {
                    matches: many.len(),
                });
            }
        }
    }

    if document.elements.len() == before {
        return Err(EditError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    const CARD: &str = "elements:
  - type: state-label
    entity: sensor.temp_1f_1_temp
  - type: image
    entity: switch.a
  - type: state-label
    entity: sensor.outdoor
  - type: state-label
    entity: sensor.temp_1f_1_humidity
  - type: conditional
    conditions: []
    elements:
      - type: state-label
        entity: sensor.temp_2f_1_temp
      - type: state-label
        entity: sensor.temp_2f_1_humidity
      - type: state-label
        entity: sensor.nested
";

    fn entities(text: &str) -> Vec<String> {
        codec::parse(text)
            .unwrap()
            .elements
            .iter()
            .map(|e| e.entity().unwrap_or("-").to_string())
            .collect()
    }

    #[test]
    fn test_delete_pair_by_address_far_apart() {
        let out = delete_element(CARD, &DeleteTarget::At(ElementAddress::top(3))).unwrap();
        assert_eq!(entities(&out), vec!["switch.a", "sensor.outdoor", "-"]);
    }

    #[test]
    fn test_delete_single_label() {
        let out = delete_element(CARD, &DeleteTarget::At(ElementAddress::top(2))).unwrap();
        assert_eq!(
            entities(&out),
            vec![
                "sensor.temp_1f_1_temp",
                "switch.a",
                "sensor.temp_1f_1_humidity",
                "-"
            ]
        );
    }

    #[test]
    fn test_delete_nested_pair_stays_inside_group() {
        let out = delete_element(CARD, &DeleteTarget::At(ElementAddress::nested(4, 0))).unwrap();
        let doc = codec::parse(&out).unwrap();
        assert_eq!(doc.elements.len(), 5);
        match &doc.elements[4] {
            Element::Conditional(group) => {
                assert_eq!(group.elements.len(), 1);
                assert_eq!(group.elements[0].entity(), Some("sensor.nested"));
            }
            other => panic!("expected conditional, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_delete_whole_group() {
        let out = delete_element(CARD, &DeleteTarget::At(ElementAddress::top(4))).unwrap();
        assert_eq!(entities(&out).len(), 4);
    }

    #[test]
    fn test_delete_out_of_range() {
        let err = delete_element(CARD, &DeleteTarget::At(ElementAddress::top(9))).unwrap_err();
        assert!(matches!(err, EditError::InvalidIndex { .. }));
        let err =
            delete_element(CARD, &DeleteTarget::At(ElementAddress::nested(1, 0))).unwrap_err();
        assert!(matches!(err, EditError::InvalidIndex { .. }));
    }

    #[test]
    fn test_delete_duplicate_pair_takes_neighbour() {
        let text = "elements:
  - type: state-label
    entity: sensor.temp_1f_1_temp
    prefix: first
  - type: state-label
    entity: sensor.temp_1f_1_humidity
    prefix: first
  - type: state-label
    entity: sensor.temp_1f_1_temp
    prefix: second
  - type: state-label
    entity: sensor.temp_1f_1_humidity
    prefix: second
";
        let out = delete_element(text, &DeleteTarget::At(ElementAddress::top(2))).unwrap();
        let doc = codec::parse(&out).unwrap();
        assert_eq!(doc.elements.len(), 2);
        for element in &doc.elements {
            match element {
                Element::StateLabel(label) => assert_eq!(label.prefix.as_deref(), Some("first")),
                other => panic!("expected label, got {:?}", other.kind()),
            }
        }
    }

    #[test]
    fn test_delete_matching_pair() {
        let doc = codec::parse(CARD).unwrap();
        let target = doc.elements[0].clone();
        let out = delete_element(CARD, &DeleteTarget::Matching(target)).unwrap();
        assert_eq!(entities(&out), vec!["switch.a", "sensor.outdoor", "-"]);
    }

    #[test]
    fn test_delete_matching_by_type_and_entity() {
        let doc = codec::parse(CARD).unwrap();
        let target = doc.elements[1].clone();
        let out = delete_element(CARD, &DeleteTarget::Matching(target)).unwrap();
        assert!(!entities(&out).contains(&"switch.a".to_string()));
        assert_eq!(entities(&out).len(), 4);
    }

    #[test]
    fn test_delete_matching_entityless_unique() {
        let doc = codec::parse(CARD).unwrap();
        let target = doc.elements[4].clone();
        let out = delete_element(CARD, &DeleteTarget::Matching(target)).unwrap();
        assert_eq!(entities(&out).len(), 4);
    }

    #[test]
    fn test_delete_matching_entityless_ambiguous() {
        let text = "elements:
  - type: conditional
    elements: []
  - type: conditional
    elements: []
";
        let doc = codec::parse(text).unwrap();
        let err = delete_element(text, &DeleteTarget::Matching(doc.elements[0].clone()))
            .unwrap_err();
        assert_eq!(err, EditError::AmbiguousDeleteTarget { matches: 2 });
    }

    #[test]
    fn test_delete_matching_nothing() {
        let (missing, _) = super::super::sensor_pair("9", "9");
        let err = delete_element(CARD, &DeleteTarget::Matching(missing)).unwrap_err();
        assert_eq!(err, EditError::NotFound);
    }
}
