//! Chat mrkdwn format (serialization only)
//!
//! The chat platform's posting API does not take rich-text blocks on input.
//! Compiled rich text is therefore downconverted to section blocks whose text
//! object holds mrkdwn markup:
//!
//! | Rich text               | mrkdwn                 |
//! |-------------------------|------------------------|
//! | bold / italic / strike  | `*t*` / `_t_` / `~t~`  |
//! | code                    | `` `t` ``              |
//! | link                    | `<url\|text>`          |
//! | user / channel          | `<@U1>` / `<#C1>`      |
//! | user group              | `<!subteam^S1>`        |
//! | broadcast               | `<!here>`              |
//! | list item               | `- t` / `N. t`         |
//! | quote                   | `> t`                  |
//!
//! `&`, `<` and `>` in text are written as HTML entities.

use crate::common::line_writer::LineWriter;
use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::blocks::{Block, ContextElement, TextObject};
use crate::ir::rich_text::{ListStyle, RichTextElement, SectionElement, Style};
use crate::options::{ConvertOptions, DEFAULT_MAX_DEPTH};
use std::borrow::Cow;

/// Serialize blocks to mrkdwn text, one blank line between blocks.
pub fn serialize_to_mrkdwn(blocks: &[Block]) -> String {
    let mut w = LineWriter::new();
    for block in blocks {
        w.ensure_par();
        block_to_mrkdwn(&mut w, block);
    }
    w.into_string()
}

/// Replaces every rich-text block with a section block holding its mrkdwn.
pub fn downconvert(blocks: Vec<Block>) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|block| match block {
            Block::RichText { elements } => {
                let mut w = LineWriter::new();
                rich_text_to_mrkdwn(&mut w, &elements);
                Block::mrkdwn_section(w.into_string())
            }
            other => other,
        })
        .collect()
}

fn block_to_mrkdwn(w: &mut LineWriter, block: &Block) {
    match block {
        Block::RichText { elements } => rich_text_to_mrkdwn(w, elements),
        Block::Header { text } => {
            w.push_str("*");
            w.push_str(&escape_entities(text.text()));
            w.push_str("*");
        }
        Block::Section { text, fields } => {
            for (i, field) in text.iter().chain(fields).enumerate() {
                if i > 0 {
                    w.ensure_line();
                }
                text_object(w, field);
            }
        }
        Block::Context { elements } => {
            for element in elements {
                match element {
                    ContextElement::Image { image_url, alt_text } => {
                        w.push_str(&format!("<{image_url}|{}>", escape_entities(alt_text)))
                    }
                    ContextElement::PlainText { text, .. } => w.push_str(&escape_entities(text)),
                    ContextElement::Mrkdwn { text, .. } => w.push_str(text),
                    ContextElement::Unknown => w.push_str("[unknown context element type]"),
                }
            }
        }
        Block::Divider => w.push_str("---"),
        Block::Image {
            image_url,
            alt_text,
            ..
        } => w.push_str(&format!("<{image_url}|{}>", escape_entities(alt_text))),
        Block::Actions { .. } => w.push_str("[unrendered action block]"),
        Block::File { .. } => w.push_str("[unrendered file block]"),
        Block::Input { .. } => w.push_str("[unrendered input block]"),
        Block::Unknown => w.push_str("[unknown block type]"),
    }
}

fn text_object(w: &mut LineWriter, text: &TextObject) {
    match text {
        TextObject::PlainText { text, .. } => w.push_str(&escape_entities(text)),
        TextObject::Mrkdwn { text, .. } => w.push_str(text),
    }
}

fn rich_text_to_mrkdwn(w: &mut LineWriter, elements: &[RichTextElement]) {
    for element in elements {
        w.ensure_par();
        element_to_mrkdwn(w, element, 0);
    }
}

fn element_to_mrkdwn(w: &mut LineWriter, element: &RichTextElement, depth: usize) {
    if depth >= DEFAULT_MAX_DEPTH {
        w.push_str(&escape_entities(&element.flat_text()));
        return;
    }

    match element {
        RichTextElement::Section { elements } => {
            for element in elements {
                section_element(w, element);
            }
        }
        RichTextElement::List {
            style,
            elements,
            indent,
            offset,
        } => {
            let pad = "    ".repeat(indent.unwrap_or(0) as usize);
            for (i, item) in elements.iter().enumerate() {
                w.ensure_line();
                w.push_str(&pad);
                match style {
                    ListStyle::Bullet => w.push_str("- "),
                    ListStyle::Ordered => {
                        w.push_str(&format!("{}. ", offset.unwrap_or(0) as usize + i + 1))
                    }
                }
                element_to_mrkdwn(w, item, depth + 1);
            }
        }
        RichTextElement::Quote { elements } => {
            let mut side = LineWriter::new();
            for element in elements {
                element_to_mrkdwn(&mut side, element, depth + 1);
            }
            w.ensure_line();
            let quoted = side.into_string();
            for (n, line) in quoted.trim_end_matches('\n').split('\n').enumerate() {
                if n > 0 {
                    w.push_str("\n");
                }
                w.push_str("> ");
                w.push_str(line);
            }
        }
        RichTextElement::Preformatted { elements } => {
            w.ensure_line();
            w.push_str("```\n");
            for element in elements {
                w.push_str(&element.raw_text());
            }
            w.ensure_line();
            w.push_str("```");
        }
        RichTextElement::Unknown => w.push_str("[unknown rich-text element type]"),
    }
}

fn section_element(w: &mut LineWriter, element: &SectionElement) {
    match element {
        SectionElement::Text { text, style } => styled(w, &escape_entities(text), *style),
        SectionElement::Link { url, text, style } => {
            let link = match text.as_deref().filter(|text| !text.is_empty()) {
                Some(text) => format!("<{url}|{}>", escape_entities(text)),
                None => format!("<{url}>"),
            };
            styled(w, &link, *style);
        }
        SectionElement::User { user_id, style } => styled(w, &format!("<@{user_id}>"), *style),
        SectionElement::Channel { channel_id, style } => {
            styled(w, &format!("<#{channel_id}>"), *style)
        }
        SectionElement::Team { team_id, style } => styled(w, team_id, *style),
        SectionElement::Usergroup { usergroup_id } => {
            w.push_str(&format!("<!subteam^{usergroup_id}>"))
        }
        SectionElement::Broadcast { range } => w.push_str(&format!("<!{range}>")),
        SectionElement::Date {
            timestamp,
            fallback,
        } => {
            let fallback = fallback.clone().unwrap_or_else(|| timestamp.to_string());
            w.push_str(&format!(
                "<!date^{timestamp}^{{date_short}}|{}>",
                escape_entities(&fallback)
            ));
        }
        SectionElement::Emoji { name, .. } => w.push_str(&format!(":{name}:")),
        SectionElement::Color { value } => w.push_str(&escape_entities(value)),
        SectionElement::Unknown => {}
    }
}

/// Code outermost, then strike, italic and bold innermost. Surrounding
/// whitespace stays outside the markers.
fn styled(w: &mut LineWriter, content: &str, style: Style) {
    let start = content.len() - content.trim_start().len();
    let end = content.trim_end().len().max(start);
    let core = &content[start..end];
    if style.is_plain() || core.is_empty() {
        w.push_str(content);
        return;
    }

    let markers: Vec<&str> = [
        (style.code, "`"),
        (style.strike, "~"),
        (style.italic, "_"),
        (style.bold, "*"),
    ]
    .into_iter()
    .filter_map(|(set, marker)| set.then_some(marker))
    .collect();

    w.push_str(&content[..start]);
    for marker in &markers {
        w.push_str(marker);
    }
    w.push_str(core);
    for marker in markers.iter().rev() {
        w.push_str(marker);
    }
    w.push_str(&content[end..]);
}

/// Escapes the three characters mrkdwn reserves for its own markup.
pub fn escape_entities(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    )
}

/// Format implementation for chat mrkdwn
pub struct MrkdwnFormat;

impl Format for MrkdwnFormat {
    fn name(&self) -> &str {
        "mrkdwn"
    }

    fn description(&self) -> &str {
        "Chat mrkdwn markup (serialization only)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["mrkdwn"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, blocks: &[Block], _options: &ConvertOptions) -> Result<String, ConvertError> {
        Ok(serialize_to_mrkdwn(blocks))
    }
}
