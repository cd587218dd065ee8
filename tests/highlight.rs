//! Highlight mapper tests
//!
//! Line ranges are 1-based and must line up with the element order the codec
//! sees.

mod common;

use common::{parse, test_model, THREE_BLOCKS, WITH_GROUP};
use floorplan::highlight::{block_lines, element_lines, highlighted_lines};
use floorplan::model::ElementAddress;

#[test]
fn test_middle_block_boundaries() {
    // Block 2 runs from its marker to its last style line; the blank line
    // inside it stays, the blank lines around it do not.
    assert_eq!(block_lines(THREE_BLOCKS, 1), (11..=19).collect::<Vec<_>>());
}

#[test]
fn test_outer_blocks() {
    assert_eq!(block_lines(THREE_BLOCKS, 0), (4..=9).collect::<Vec<_>>());
    assert_eq!(block_lines(THREE_BLOCKS, 2), (21..=26).collect::<Vec<_>>());
}

#[test]
fn test_every_element_has_a_block() {
    for card in [THREE_BLOCKS, WITH_GROUP, floorplan::session::DEFAULT_YAML] {
        let count = parse(card).elements.len();
        for index in 0..count {
            assert!(!block_lines(card, index).is_empty(), "block {index} missing");
        }
        assert!(block_lines(card, count).is_empty());
    }
}

#[test]
fn test_blocks_are_disjoint_and_ordered() {
    let first = block_lines(WITH_GROUP, 0);
    let second = block_lines(WITH_GROUP, 1);
    assert!(first.last() < second.first());
}

#[test]
fn test_nested_member_lines() {
    assert_eq!(
        element_lines(WITH_GROUP, ElementAddress::nested(1, 1)),
        (15..=19).collect::<Vec<_>>()
    );
}

#[test]
fn test_deterministic() {
    let address = Some(ElementAddress::top(1));
    assert_eq!(
        highlighted_lines(THREE_BLOCKS, address),
        highlighted_lines(THREE_BLOCKS, address)
    );
    assert!(highlighted_lines(THREE_BLOCKS, None).is_empty());
}

#[test]
fn test_lines_follow_serialized_text() {
    let mut model = test_model(THREE_BLOCKS);
    model.dragging = Some(ElementAddress::top(1));
    let before = model.highlighted_lines();

    // After a semantic edit the text is re-rendered; the mapper follows it
    model.set_text(
        floorplan::mutation::update_position(&model.text, ElementAddress::top(1), "1%", "1%")
            .unwrap(),
    );
    let after = model.highlighted_lines();
    assert!(!after.is_empty());
    assert_ne!(before, after);
}
