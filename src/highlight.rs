//! Element-to-line mapping for editor highlighting
//!
//! Finds the lines of card text that belong to one element so the text pane
//! can highlight whatever is being dragged on the preview. This is a plain
//! line scan, not a parse: a block starts at a list item whose first key is
//! `type:` and runs until the next line that is indented no deeper than the
//! item's dash. Blank and comment lines never start or end a block; they are
//! kept when they sit inside one and dropped when they trail it.
//!
//! Only markers at the indentation of the first marker in the text count as
//! top-level blocks, so the items of a nested `elements:` list stay inside
//! their group's block.

use crate::model::ElementAddress;

/// A non-trivial line of the text
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    /// 1-based line number
    number: usize,
    indent: usize,
    content: &'a str,
}

impl Line<'_> {
    /// Blank or comment-only
    fn is_skippable(&self) -> bool {
        self.content.is_empty() || self.content.starts_with('#')
    }

    /// `- type: ...`
    fn is_block_start(&self) -> bool {
        self.content
            .strip_prefix('-')
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .is_some_and(|rest| rest.trim_start().starts_with("type:"))
    }
}

fn lines(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .map(|(i, raw)| {
            let content = raw.trim_start();
            Line {
                number: i + 1,
                indent: raw.len() - content.len(),
                content: content.trim_end(),
            }
        })
        .collect()
}

/// Find block `target` among the list items of `lines`.
///
/// Returns the slice of lines making up the block, starting with its marker.
fn find_block<'l, 'a>(lines: &'l [Line<'a>], target: usize) -> Option<&'l [Line<'a>]> {
    let list_indent = lines.iter().find(|l| l.is_block_start())?.indent;

    let mut seen = 0;
    let mut start = None;
    for (i, line) in lines.iter().enumerate() {
        if line.is_skippable() {
            continue;
        }
        if let Some(start) = start {
            if line.indent <= list_indent {
                return Some(trim_trailing(&lines[start..i]));
            }
            continue;
        }
        if line.indent == list_indent && line.is_block_start() {
            if seen == target {
                start = Some(i);
            }
            seen += 1;
        }
    }
    start.map(|start| trim_trailing(&lines[start..]))
}

fn trim_trailing<'l, 'a>(block: &'l [Line<'a>]) -> &'l [Line<'a>] {
    let end = block
        .iter()
        .rposition(|l| !l.is_skippable())
        .map_or(0, |i| i + 1);
    &block[..end]
}

/// 1-based line numbers of the block for top-level element `index`
pub fn block_lines(text: &str, index: usize) -> Vec<usize> {
    element_lines(text, ElementAddress::top(index))
}

/// 1-based line numbers of the block for `address`.
///
/// Nested addresses look inside the group's own block for its list items.
pub fn element_lines(text: &str, address: ElementAddress) -> Vec<usize> {
    let scanned = lines(text);
    let Some(block) = find_block(&scanned, address.index) else {
        return Vec::new();
    };
    let block = match address.nested {
        None => Some(block),
        Some(nested) => find_block(&block[1..], nested),
    };
    block
        .map(|b| b.iter().map(|l| l.number).collect())
        .unwrap_or_default()
}

/// Lines to highlight for whatever is being dragged, if anything
pub fn highlighted_lines(text: &str, dragging: Option<ElementAddress>) -> Vec<usize> {
    dragging
        .map(|address| element_lines(text, address))
        .unwrap_or_default()
}
