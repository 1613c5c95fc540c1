//! Markdown serialization (chat blocks → Markdown)
//!
//! Renders blocks straight into a [`LineWriter`]; no intermediate AST is
//! built. Every user-supplied value is escaped exactly once, at the point
//! where it is written, and never inside code spans or fenced blocks.

use crate::common::escape::escape;
use crate::common::line_writer::LineWriter;
use crate::ir::blocks::{Block, ContextElement, TextObject};
use crate::ir::rich_text::{ListStyle, RichTextElement, SectionElement, Style};
use crate::options::ConvertOptions;

const LIST_INDENT: &str = "    ";

/// Render blocks as Markdown, one blank line between blocks.
pub fn render(blocks: &[Block], options: &ConvertOptions) -> String {
    let renderer = Renderer { options };
    let mut w = LineWriter::new();
    for block in blocks {
        w.ensure_par();
        renderer.block(&mut w, block);
    }
    w.into_string()
}

struct Renderer<'o> {
    options: &'o ConvertOptions,
}

impl Renderer<'_> {
    fn block(&self, w: &mut LineWriter, block: &Block) {
        match block {
            Block::Actions { .. } => w.push_str("[unrendered action block]"),
            Block::File { .. } => w.push_str("[unrendered file block]"),
            Block::Input { .. } => w.push_str("[unrendered input block]"),
            Block::Context { elements } => {
                for element in elements {
                    context_element(w, element);
                }
            }
            Block::Divider => w.push_str("---"),
            Block::Header { text } => {
                w.push_str(&self.options.header_prefix());
                text_object(w, text);
            }
            Block::Image {
                image_url,
                alt_text,
                ..
            } => image(w, image_url, alt_text),
            Block::RichText { elements } => {
                for element in elements {
                    w.ensure_par();
                    self.rich_text_element(w, element, 0);
                }
            }
            Block::Section { text, fields } => {
                if !fields.is_empty() {
                    field_rows(w, fields);
                } else if let Some(text) = text {
                    text_object(w, text);
                }
            }
            Block::Unknown => w.push_str("[unknown block type]"),
        }
    }

    fn rich_text_element(&self, w: &mut LineWriter, element: &RichTextElement, depth: usize) {
        if depth >= self.options.max_depth {
            log::debug!("rich text nested deeper than {}; flattening", self.options.max_depth);
            w.push_str(&escape(&element.flat_text()));
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
            } => self.list(w, *style, elements, indent.unwrap_or(0), offset.unwrap_or(0), depth),
            RichTextElement::Quote { elements } => {
                let mut side = LineWriter::new();
                for element in elements {
                    self.rich_text_element(&mut side, element, depth + 1);
                }
                w.ensure_line();
                let quoted = side.into_string();
                for (n, line) in quoted.trim_end_matches('\n').split('\n').enumerate() {
                    if n > 0 {
                        w.push_str("\n");
                    }
                    w.push_str(if line.is_empty() { ">" } else { "> " });
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

    /// Items are separated by a blank line and the first item starts on a
    /// fresh line. Continuation lines of an item are indented under its
    /// marker.
    fn list(
        &self,
        w: &mut LineWriter,
        style: ListStyle,
        items: &[RichTextElement],
        indent: u32,
        offset: u32,
        depth: usize,
    ) {
        let pad = LIST_INDENT.repeat(indent as usize);
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                w.ensure_par();
            } else {
                w.ensure_line();
            }
            let marker = match style {
                ListStyle::Bullet => "- ".to_string(),
                ListStyle::Ordered => format!("{}. ", offset as usize + i + 1),
            };

            let mut body = LineWriter::new();
            self.rich_text_element(&mut body, item, depth + 1);
            let body = body.into_string();

            let continuation = " ".repeat(pad.len() + marker.len());
            for (n, line) in body.trim_end_matches('\n').split('\n').enumerate() {
                if n == 0 {
                    w.push_str(&pad);
                    w.push_str(&marker);
                } else {
                    w.push_str("\n");
                    if !line.is_empty() {
                        w.push_str(&continuation);
                    }
                }
                w.push_str(line);
            }
        }
    }
}

fn context_element(w: &mut LineWriter, element: &ContextElement) {
    match element {
        ContextElement::Image {
            image_url,
            alt_text,
        } => image(w, image_url, alt_text),
        ContextElement::PlainText { text, .. } | ContextElement::Mrkdwn { text, .. } => {
            w.push_str(&escape(text))
        }
        ContextElement::Unknown => w.push_str("[unknown context element type]"),
    }
}

fn text_object(w: &mut LineWriter, text: &TextObject) {
    w.push_str(&escape(text.text()));
}

fn image(w: &mut LineWriter, url: &str, alt: &str) {
    w.push_str(&format!("![{}]({url})", escape(alt)));
}

/// Two fields per table row; an odd last field sits alone.
fn field_rows(w: &mut LineWriter, fields: &[TextObject]) {
    for pair in fields.chunks(2) {
        w.ensure_line();
        w.push_str("| ");
        text_object(w, &pair[0]);
        if let Some(second) = pair.get(1) {
            w.push_str(" | ");
            text_object(w, second);
        }
        w.push_str(" |");
    }
}

fn section_element(w: &mut LineWriter, element: &SectionElement) {
    match element {
        SectionElement::Text { text, style } => styled(w, text, *style),
        SectionElement::Link { url, .. } => {
            w.push_str(&format!("[{}]({url})", escape(&element.raw_text())));
        }
        SectionElement::Channel { channel_id: id, style }
        | SectionElement::User { user_id: id, style }
        | SectionElement::Team { team_id: id, style } => styled(w, id, style.with_bold()),
        SectionElement::Broadcast { range } => styled(w, range, Style::default().with_bold()),
        SectionElement::Date { timestamp, .. } => {
            styled(w, &timestamp.to_string(), Style::default().with_italic())
        }
        SectionElement::Emoji { name, .. } => w.push_str(&format!(":{name}:")),
        SectionElement::Usergroup { usergroup_id } => w.push_str(&escape(usergroup_id)),
        SectionElement::Color { value } => w.push_str(&escape(value)),
        SectionElement::Unknown => w.push_str("[unknown rich-text section element type]"),
    }
}

/// Writes `content` wrapped in the markers of `style`: strike outermost,
/// then bold/italic, then code innermost. Whitespace at either end stays
/// outside the emphasis markers, and empty content gets no markers.
fn styled(w: &mut LineWriter, content: &str, style: Style) {
    if style.is_plain() {
        w.push_str(&escape(content));
        return;
    }

    let emphasis = match (style.bold, style.italic) {
        (true, true) => "***",
        (true, false) => "**",
        (false, true) => "_",
        (false, false) => "",
    };
    let strike = if style.strike { "~~" } else { "" };

    let (lead, core, trail) = if emphasis.is_empty() && strike.is_empty() {
        ("", content, "")
    } else {
        split_outer_whitespace(content)
    };
    if core.trim().is_empty() {
        w.push_str(&escape(content));
        return;
    }

    w.push_str(lead);
    w.push_str(strike);
    w.push_str(emphasis);
    if style.code {
        w.push_str(&code_span(core));
    } else {
        w.push_str(&escape(core));
    }
    w.push_str(emphasis);
    w.push_str(strike);
    w.push_str(trail);
}

fn split_outer_whitespace(content: &str) -> (&str, &str, &str) {
    let start = content.len() - content.trim_start().len();
    let end = content.trim_end().len().max(start);
    (&content[..start], &content[start..end], &content[end..])
}

/// Backtick fence one longer than the longest backtick run in `code`, with
/// padding when the code itself starts or ends with a backtick.
fn code_span(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest + 1);
    let pad = if code.starts_with('`') || code.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{fence}{pad}{code}{pad}{fence}")
}
