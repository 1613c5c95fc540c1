//! Style accumulator for inline token runs.
//!
//! Walks a token slice and produces rich-text section elements, threading
//! the style flags down into nested emphasis spans. Each nested span receives
//! its own copy of the flags, so nothing set inside a span reaches its
//! siblings.

use crate::common::html_text::html_to_text;
use crate::ir::rich_text::{SectionElement, Style};
use crate::ir::tokens::{find_closer, Tag, Token};
use crate::options::ConvertOptions;

/// Placeholder text for a construct with no chat equivalent.
pub fn unconverted(tag: Tag) -> String {
    format!("[unconverted token of type {tag}]")
}

/// Converts `tokens` into section elements, starting from the ambient `style`.
pub fn section_elements(
    tokens: &[Token],
    style: Style,
    options: &ConvertOptions,
) -> Vec<SectionElement> {
    let mut out = Vec::new();
    collect_elements(tokens, style, 0, options, &mut out);
    out
}

pub(crate) fn collect_elements(
    tokens: &[Token],
    style: Style,
    depth: usize,
    options: &ConvertOptions,
    out: &mut Vec<SectionElement>,
) {
    let mut pos = 0;
    while pos < tokens.len() {
        let tok = &tokens[pos];

        // Block structure inside an inline run (list items, paragraphs of a
        // quote) carries no text of its own.
        if tok.is_block() && (tok.is_opening() || tok.is_closing()) {
            pos += 1;
            continue;
        }

        if tok.is_opening() {
            let Some(close) = find_closer(tokens, pos) else {
                log::debug!("dropping unmatched {} span", tok.tag);
                return;
            };
            let inner = &tokens[pos + 1..close];

            if tok.tag == Tag::Link {
                let href = tok.href.clone().unwrap_or_default();
                out.push(SectionElement::link(href, plain_text(inner), style));
            } else if depth >= options.max_depth {
                log::debug!("nesting deeper than {}; flattening", options.max_depth);
                push_text(out, plain_text(inner), style);
            } else {
                collect_elements(inner, span_style(tok.tag, style), depth + 1, options, out);
            }
            pos = close + 1;
            continue;
        }

        if tok.is_closing() {
            log::debug!("skipping stray {} closer", tok.tag);
            pos += 1;
            continue;
        }

        leaf_elements(tok, style, depth, options, out);
        pos += 1;
    }
}

/// Flags in effect inside a span opened by `tag`.
pub fn span_style(tag: Tag, style: Style) -> Style {
    match tag {
        Tag::Emphasis => style.with_italic(),
        Tag::Strong => style.with_bold(),
        Tag::Strikethrough => style.with_strike(),
        _ => style,
    }
}

fn leaf_elements(
    tok: &Token,
    style: Style,
    depth: usize,
    options: &ConvertOptions,
    out: &mut Vec<SectionElement>,
) {
    match tok.tag {
        Tag::Text => push_text(out, tok.content.clone(), style),
        Tag::CodeInline => push_text(out, tok.content.clone(), style.with_code()),
        Tag::Softbreak => out.push(SectionElement::plain(" ")),
        Tag::Hardbreak => out.push(SectionElement::plain("\n")),
        Tag::HtmlInline | Tag::HtmlBlock => {
            let text = html_to_text(&tok.content).unwrap_or_else(|err| {
                log::debug!("html island not parsed: {err}");
                unconverted(tok.tag)
            });
            let text = if tok.is_block() {
                text.trim().to_string()
            } else {
                text
            };
            push_text(out, text, Style::default());
        }
        Tag::Image => out.push(SectionElement::plain(image_placeholder(tok))),
        Tag::Inline => {
            if depth >= options.max_depth {
                push_text(out, plain_text(&tok.children), style);
            } else {
                collect_elements(&tok.children, style, depth + 1, options, out);
            }
        }
        // A code span cannot hold a line break: one code run per line.
        Tag::CodeBlock | Tag::Fence => {
            let lines = tok.content.lines().filter(|line| !line.trim().is_empty());
            for (n, line) in lines.enumerate() {
                if n > 0 {
                    out.push(SectionElement::plain("\n"));
                }
                push_text(out, line.to_string(), style.with_code());
            }
        }
        Tag::Hr => {}
        tag => {
            log::trace!("placeholder for {tag} leaf");
            out.push(SectionElement::plain(unconverted(tag)));
        }
    }
}

fn push_text(out: &mut Vec<SectionElement>, text: String, style: Style) {
    if !text.is_empty() {
        out.push(SectionElement::text(text, style));
    }
}

fn image_placeholder(tok: &Token) -> String {
    format!("[image {}]", plain_text(&tok.children))
}

/// Flattens tokens to their visible text, ignoring all styling.
pub fn plain_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    write_plain_text(tokens, &mut out);
    out
}

fn write_plain_text(tokens: &[Token], out: &mut String) {
    for tok in tokens {
        match tok.tag {
            Tag::Text | Tag::CodeInline => out.push_str(&tok.content),
            Tag::Softbreak => out.push(' '),
            Tag::Hardbreak => out.push('\n'),
            Tag::HtmlInline => match html_to_text(&tok.content) {
                Ok(text) => out.push_str(&text),
                Err(_) => out.push_str(&unconverted(tok.tag)),
            },
            Tag::Image => out.push_str(&image_placeholder(tok)),
            Tag::Inline => write_plain_text(&tok.children, out),
            _ => {}
        }
    }
}
