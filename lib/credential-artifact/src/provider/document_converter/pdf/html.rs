//! Minimal HTML flattening into a stream of layout nodes.
//!
//! Only the subset produced by credential templates is understood: inline
//! emphasis, headings, block elements, table cells and `data:` images.

use ct_codecs::{Base64, Decoder};

pub(super) const DEFAULT_FONT_SIZE: f32 = 11.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            size: DEFAULT_FONT_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Node {
    Word { text: String, style: TextStyle },
    Space,
    LineBreak,
    Image(EmbeddedImage),
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct EmbeddedImage {
    pub png: Vec<u8>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

const SKIPPED_ELEMENTS: [&str; 4] = ["head", "style", "script", "title"];
const BLOCK_ELEMENTS: [&str; 12] = [
    "p", "div", "br", "tr", "li", "ul", "ol", "table", "section", "header", "footer", "body",
];

fn heading_size(tag: &str) -> Option<f32> {
    match tag {
        "h1" => Some(20.0),
        "h2" => Some(16.0),
        "h3" => Some(13.0),
        "h4" | "h5" | "h6" => Some(DEFAULT_FONT_SIZE),
        _ => None,
    }
}

struct Tag<'a> {
    name: String,
    closing: bool,
    attributes: &'a str,
}

fn parse_tag(raw: &str) -> Tag<'_> {
    let raw = raw.trim().trim_end_matches('/').trim();
    let (closing, raw) = match raw.strip_prefix('/') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, raw),
    };

    let name_end = raw.find(char::is_whitespace).unwrap_or(raw.len());
    Tag {
        name: raw[..name_end].to_ascii_lowercase(),
        closing,
        attributes: &raw[name_end..],
    }
}

pub(super) fn attribute(attributes: &str, name: &str) -> Option<String> {
    let mut rest = attributes;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }

        let key_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let key = &rest[..key_end];
        rest = rest[key_end..].trim_start();

        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let inner = &after_eq[1..];
                    let end = inner.find(quote).unwrap_or(inner.len());
                    rest = inner.get(end + 1..).unwrap_or_default();
                    &inner[..end]
                }
                _ => {
                    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    rest = &after_eq[end..];
                    &after_eq[..end]
                }
            }
        } else {
            ""
        };

        if key.eq_ignore_ascii_case(name) {
            return Some(decode_entities(value));
        }
    }
}

fn parse_length(value: Option<String>) -> Option<f32> {
    value?.trim().trim_end_matches("px").trim().parse().ok()
}

fn decode_data_uri(src: &str) -> Option<Vec<u8>> {
    let (meta, data) = src.strip_prefix("data:")?.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    Base64::decode_to_vec(data.trim(), None).ok()
}

pub(super) fn decode_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        result.push_str(&rest[..start]);
        rest = &rest[start..];

        let decoded = rest.find(';').and_then(|end| {
            let entity = &rest[1..end];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|ch| (ch, end))
        });

        match decoded {
            Some((ch, end)) => {
                result.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                result.push('&');
                rest = &rest[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

#[derive(Default)]
struct State {
    bold: usize,
    italic: usize,
    skipped: usize,
    headings: Vec<f32>,
}

impl State {
    fn style(&self) -> TextStyle {
        TextStyle {
            bold: self.bold > 0 || !self.headings.is_empty(),
            italic: self.italic > 0,
            size: self.headings.last().copied().unwrap_or(DEFAULT_FONT_SIZE),
        }
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str, style: TextStyle) {
    let text = decode_entities(text);
    if text.starts_with(char::is_whitespace) {
        push_space(nodes);
    }

    let mut words = text.split_whitespace().peekable();
    while let Some(word) = words.next() {
        nodes.push(Node::Word {
            text: word.to_owned(),
            style,
        });
        if words.peek().is_some() {
            nodes.push(Node::Space);
        }
    }

    if text.ends_with(char::is_whitespace) && !text.trim().is_empty() {
        push_space(nodes);
    }
}

fn push_space(nodes: &mut Vec<Node>) {
    if matches!(nodes.last(), Some(Node::Word { .. })) {
        nodes.push(Node::Space);
    }
}

fn push_break(nodes: &mut Vec<Node>) {
    if matches!(nodes.last(), Some(Node::Space)) {
        nodes.pop();
    }
    if !matches!(nodes.last(), None | Some(Node::LineBreak)) {
        nodes.push(Node::LineBreak);
    }
}

fn handle_tag(nodes: &mut Vec<Node>, state: &mut State, tag: Tag<'_>) {
    let name = tag.name.as_str();

    if SKIPPED_ELEMENTS.contains(&name) {
        if tag.closing {
            state.skipped = state.skipped.saturating_sub(1);
        } else {
            state.skipped += 1;
        }
        return;
    }
    if state.skipped > 0 {
        return;
    }

    match (name, tag.closing) {
        ("b" | "strong" | "th", false) => state.bold += 1,
        ("b" | "strong" | "th", true) => state.bold = state.bold.saturating_sub(1),
        ("i" | "em", false) => state.italic += 1,
        ("i" | "em", true) => state.italic = state.italic.saturating_sub(1),
        ("img", false) => {
            let src = attribute(tag.attributes, "src").unwrap_or_default();
            match decode_data_uri(&src) {
                Some(png) => {
                    push_break(nodes);
                    nodes.push(Node::Image(EmbeddedImage {
                        png,
                        width: parse_length(attribute(tag.attributes, "width")),
                        height: parse_length(attribute(tag.attributes, "height")),
                    }));
                    nodes.push(Node::LineBreak);
                }
                None => tracing::debug!("Skipping non-embedded image"),
            }
        }
        _ => {}
    }

    if let Some(size) = heading_size(name) {
        if tag.closing {
            state.headings.pop();
        } else {
            state.headings.push(size);
        }
    }

    if matches!(name, "td" | "th") && tag.closing {
        push_space(nodes);
    }
    if BLOCK_ELEMENTS.contains(&name) || heading_size(name).is_some() {
        push_break(nodes);
    }
}

pub(super) fn flatten(html: &str) -> Vec<Node> {
    let mut nodes = vec![];
    let mut state = State::default();
    let mut rest = html;

    while !rest.is_empty() {
        let Some(start) = rest.find('<') else {
            if state.skipped == 0 {
                push_text(&mut nodes, rest, state.style());
            }
            break;
        };

        if start > 0 && state.skipped == 0 {
            push_text(&mut nodes, &rest[..start], state.style());
        }
        rest = &rest[start..];

        if let Some(comment) = rest.strip_prefix("<!--") {
            rest = comment
                .find("-->")
                .map(|end| &comment[end + 3..])
                .unwrap_or_default();
            continue;
        }

        let Some(end) = rest.find('>') else {
            break;
        };
        let raw = &rest[1..end];
        rest = &rest[end + 1..];

        if raw.starts_with('!') || raw.starts_with('?') {
            continue;
        }
        handle_tag(&mut nodes, &mut state, parse_tag(raw));
    }

    push_break(&mut nodes);
    nodes
}
