//! House style for rendered card text
//!
//! `serde_yaml` emits YAML 1.2: words like `on` and `off` come out plain and
//! sequences under a key are not indented. Home Assistant reads cards with a
//! YAML 1.1 loader (where plain `on` is a boolean) and hand-written cards
//! indent their lists, so the emitter output is adjusted line by line:
//!
//! - plain YAML 1.1 boolean words in key or value position get single quotes
//! - block sequences nested under a mapping key are indented by two spaces
//!
//! Block scalar bodies (`|`, `>`) are only shifted, never rewritten.

use std::borrow::Cow;

/// Words a YAML 1.1 loader reads as booleans but YAML 1.2 reads as strings.
///
/// `true`/`false`/`null` are not listed: the emitter already quotes those
/// when they are strings, so a plain one is a real boolean or null.
const YAML11_BOOLEANS: &[&str] = &["y", "n", "yes", "no", "on", "off"];

const INDENT: usize = 2;

/// Quote `scalar` if it is a plain YAML 1.1 boolean word
pub(super) fn quote_word(scalar: &str) -> Cow<'_, str> {
    if YAML11_BOOLEANS
        .iter()
        .any(|word| scalar.eq_ignore_ascii_case(word))
    {
        Cow::Owned(format!("'{scalar}'"))
    } else {
        Cow::Borrowed(scalar)
    }
}

/// Body of one line once its indentation and `- ` markers are stripped
enum Body<'a> {
    /// Plain sequence item or flow node
    Item(&'a str),
    /// `key:` or `key: value`
    Entry { key: &'a str, value: &'a str },
}

impl<'a> Body<'a> {
    fn parse(body: &'a str) -> Self {
        let key_end = match body.as_bytes().first() {
            Some(b'\'') => quoted_end(body, b'\''),
            Some(b'"') => quoted_end(body, b'"'),
            Some(b'[' | b'{' | b'?' | b'!' | b'&' | b'*' | b'|' | b'>') | None => None,
            Some(_) => plain_key_end(body),
        };
        let Some(end) = key_end else {
            return Body::Item(body);
        };
        match body[end..].strip_prefix(':') {
            Some("") => Body::Entry {
                key: &body[..end],
                value: "",
            },
            Some(rest) if rest.starts_with(' ') => Body::Entry {
                key: &body[..end],
                value: rest.trim_start(),
            },
            _ => Body::Item(body),
        }
    }
}

/// Byte offset just past the closing quote
fn quoted_end(body: &str, quote: u8) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if quote == b'"' => i += 2,
            b if b == quote && quote == b'\'' && bytes.get(i + 1) == Some(&b'\'') => i += 2,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// A plain key runs up to the first `: ` (or a `:` ending the line)
fn plain_key_end(body: &str) -> Option<usize> {
    match body.find(": ") {
        Some(end) => Some(end),
        None => body.strip_suffix(':').map(str::len),
    }
}

/// Split leading `- ` markers off a line's content
fn split_markers(content: &str) -> (&str, &str) {
    let mut rest = content;
    while let Some(after) = rest.strip_prefix("- ") {
        rest = after;
    }
    if rest == "-" {
        rest = "";
    }
    let markers = content.len() - rest.len();
    (&content[..markers], rest)
}

fn is_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

fn is_block_scalar_header(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some('|' | '>'))
        && chars.all(|c| matches!(c, '-' | '+') || c.is_ascii_digit())
}

/// Apply the house style to emitter output
pub(super) fn house_style(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len() + yaml.len() / 4);
    // Columns of the sequences currently being lifted
    let mut lifted: Vec<usize> = Vec::new();
    // Column of a key whose value starts on the next line
    let mut open_key: Option<usize> = None;
    // Column a block scalar body must be indented past
    let mut block_scalar: Option<usize> = None;

    for line in yaml.lines() {
        let content = line.trim_start_matches(' ');
        let indent = line.len() - content.len();

        if let Some(owner) = block_scalar {
            if content.is_empty() || indent > owner {
                if !line.is_empty() {
                    push_indent(&mut out, INDENT * lifted.len());
                }
                out.push_str(line);
                out.push('\n');
                continue;
            }
            block_scalar = None;
        }

        while let Some(&column) = lifted.last() {
            if indent > column || (indent == column && is_item(content)) {
                break;
            }
            lifted.pop();
        }
        if let Some(column) = open_key.take() {
            if indent == column && is_item(content) {
                lifted.push(column);
            }
        }

        let (markers, body) = split_markers(content);
        let column = indent + markers.len();
        push_indent(&mut out, indent + INDENT * lifted.len());
        out.push_str(markers);

        match Body::parse(body) {
            Body::Item(item) => {
                if is_block_scalar_header(item) {
                    block_scalar = Some(column.saturating_sub(INDENT));
                }
                out.push_str(&quote_word(item));
            }
            Body::Entry { key, value } => {
                out.push_str(&quote_word(key));
                out.push(':');
                if value.is_empty() {
                    open_key = Some(column);
                } else {
                    if is_block_scalar_header(value) {
                        block_scalar = Some(column);
                    }
                    out.push(' ');
                    out.push_str(&quote_word(value));
                }
            }
        }
        out.push('\n');
    }
    out
}

fn push_indent(out: &mut String, width: usize) {
    out.push_str(&" ".repeat(width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_boolean_words() {
        assert_eq!(quote_word("on"), "'on'");
        assert_eq!(quote_word("OFF"), "'OFF'");
        assert_eq!(quote_word("Yes"), "'Yes'");
        assert_eq!(quote_word("online"), "online");
        assert_eq!(quote_word("true"), "true");
    }

    #[test]
    fn test_quotes_keys_and_values() {
        let text = house_style("state_image:\n  on: a.gif\n  off: b.png\nstate: on\n");
        assert_eq!(
            text,
            "state_image:\n  'on': a.gif\n  'off': b.png\nstate: 'on'\n"
        );
    }

    #[test]
    fn test_leaves_quoted_and_real_booleans() {
        let text = "a: 'on'\nb: true\nc: on board\n";
        assert_eq!(house_style(text), text);
    }

    #[test]
    fn test_indents_nested_sequences() {
        let emitted = "type: picture-elements\nelements:\n- type: conditional\n  conditions:\n  - entity: switch.a\n    state: on\n  elements:\n  - type: state-label\n    entity: sensor.b\ntitle: x\n";
        let expected = "type: picture-elements\nelements:\n  - type: conditional\n    conditions:\n      - entity: switch.a\n        state: 'on'\n    elements:\n      - type: state-label\n        entity: sensor.b\ntitle: x\n";
        assert_eq!(house_style(emitted), expected);
    }

    #[test]
    fn test_first_key_of_item_holding_a_sequence() {
        let emitted = "elements:\n- elements:\n  - type: image\n  style: {}\n";
        let expected = "elements:\n  - elements:\n      - type: image\n    style: {}\n";
        assert_eq!(house_style(emitted), expected);
    }

    #[test]
    fn test_block_scalar_body_is_not_rewritten() {
        let emitted = "elements:\n- type: image\n  note: |-\n    on\n\n    - off:\n  entity: switch.a\n";
        let expected = "elements:\n  - type: image\n    note: |-\n      on\n\n      - off:\n    entity: switch.a\n";
        assert_eq!(house_style(emitted), expected);
    }
}
