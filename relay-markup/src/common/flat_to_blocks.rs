//! Compiles a flat Markdown token stream into a list of chat blocks.
//!
//! # The Algorithm
//!
//! 1. **Walking siblings:**
//!    - Take the first token of the slice
//!    - Openers are matched with [`find_closer`]: the first closing token with
//!      the same tag at the same or a shallower level. The level constraint
//!      keeps an inner list's closer from ending the outer list.
//!    - Closers without an opener are skipped
//!    - An opener without a closer ends the walk; the rest of the slice is
//!      dropped
//!
//! 2. **Block openers** produce one block each:
//!    - Paragraph → rich text holding one section
//!    - Blockquote → rich text holding one quote of single-element sections,
//!      with a line-break section at every block boundary inside it
//!    - Bullet/ordered list → rich text holding list elements, one section per
//!      item; nested lists become sibling lists with a deeper `indent`
//!    - Heading → header block with the plain text
//!    - Anything else (tables included) → a context block with a visible
//!      `[unconverted token of type …]` notice
//!
//! 3. **Inline openers** met at the top level become a rich-text section
//!    with the span's flag applied.
//!
//! 4. **Leaves** convert directly: code to preformatted rich text, rules to
//!    dividers, images to image blocks, text and HTML to rich-text sections.
//!
//! 5. **Merging:** once per top-level call, runs of adjacent rich-text blocks
//!    are folded into the first block of the run.

use crate::common::html_text::html_to_text;
use crate::common::inline::{collect_elements, plain_text, span_style, unconverted};
use crate::ir::blocks::Block;
use crate::ir::rich_text::{ListStyle, RichTextElement, SectionElement, Style};
use crate::ir::tokens::{find_closer, span_inner, top_level_spans, Tag, Token};
use crate::options::ConvertOptions;

/// Compiles `tokens` into chat blocks, merging adjacent rich-text blocks.
pub fn compile_blocks(tokens: &[Token], options: &ConvertOptions) -> Vec<Block> {
    let compiler = BlockCompiler { options };
    merge_adjacent_rich_text(compiler.compile(tokens))
}

struct BlockCompiler<'o> {
    options: &'o ConvertOptions,
}

impl BlockCompiler<'_> {
    fn compile(&self, tokens: &[Token]) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut pos = 0;

        while pos < tokens.len() {
            let tok = &tokens[pos];

            if tok.is_opening() {
                let Some(close) = find_closer(tokens, pos) else {
                    log::debug!(
                        "unmatched {} opener at level {}; dropping the remaining {} tokens",
                        tok.tag,
                        tok.level,
                        tokens.len() - pos
                    );
                    break;
                };
                let inner = &tokens[pos + 1..close];
                let block = if tok.is_block() {
                    self.container_block(tok, inner)
                } else {
                    self.inline_span_block(tok, inner)
                };
                blocks.extend(block);
                pos = close + 1;
                continue;
            }

            if tok.is_closing() {
                log::debug!("skipping stray {} closer at level {}", tok.tag, tok.level);
                pos += 1;
                continue;
            }

            blocks.extend(self.leaf_block(tok));
            pos += 1;
        }

        blocks
    }

    fn container_block(&self, tok: &Token, inner: &[Token]) -> Option<Block> {
        match tok.tag {
            Tag::Paragraph => Some(Block::rich_text(vec![RichTextElement::section(
                self.elements(inner, Style::default()),
            )])),
            Tag::Blockquote => Some(Block::rich_text(vec![RichTextElement::Quote {
                elements: self.quote_elements(inner),
            }])),
            Tag::BulletList | Tag::OrderedList => {
                Some(Block::rich_text(self.list_elements(tok, inner, 0, 0)))
            }
            Tag::Heading => Some(Block::header(plain_text(inner))),
            tag => {
                log::trace!("placeholder for {tag} block");
                Some(Block::notice(unconverted(tag)))
            }
        }
    }

    fn inline_span_block(&self, tok: &Token, inner: &[Token]) -> Option<Block> {
        let elements = if tok.tag == Tag::Link {
            let href = tok.href.clone().unwrap_or_default();
            vec![SectionElement::link(href, plain_text(inner), Style::default())]
        } else {
            self.elements(inner, span_style(tok.tag, Style::default()))
        };
        Some(Block::rich_text(vec![RichTextElement::section(elements)]))
    }

    fn leaf_block(&self, tok: &Token) -> Option<Block> {
        match tok.tag {
            Tag::CodeBlock | Tag::Fence => Some(Block::rich_text(vec![
                RichTextElement::preformatted(tok.content.clone()),
            ])),
            Tag::Hr => Some(Block::Divider),
            Tag::Image => Some(Block::Image {
                image_url: tok.href.clone().unwrap_or_default(),
                alt_text: plain_text(&tok.children),
                title: None,
            }),
            Tag::HtmlBlock => {
                let text = html_to_text(&tok.content).unwrap_or_else(|err| {
                    log::debug!("html block not parsed: {err}");
                    unconverted(tok.tag)
                });
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                Some(Block::rich_text(vec![RichTextElement::section(vec![
                    SectionElement::plain(text),
                ])]))
            }
            _ if tok.is_block() => {
                log::trace!("placeholder for {} block leaf", tok.tag);
                Some(Block::notice(unconverted(tok.tag)))
            }
            _ => {
                let elements = self.elements(std::slice::from_ref(tok), Style::default());
                if elements.is_empty() {
                    return None;
                }
                Some(Block::rich_text(vec![RichTextElement::section(elements)]))
            }
        }
    }

    fn elements(&self, tokens: &[Token], style: Style) -> Vec<SectionElement> {
        let mut out = Vec::new();
        collect_elements(tokens, style, 0, self.options, &mut out);
        out
    }

    /// One section per section element. Every block boundary inside the
    /// quote (paragraphs, list items, nested quotes) is marked by a line-break
    /// section so the rendered quote keeps its lines.
    fn quote_elements(&self, inner: &[Token]) -> Vec<RichTextElement> {
        let mut lines = Vec::new();
        self.quote_lines(inner, 0, &mut lines);

        let mut elements = Vec::new();
        for line in lines {
            if !elements.is_empty() {
                elements.push(RichTextElement::section(vec![SectionElement::plain("\n")]));
            }
            elements.extend(
                line.into_iter()
                    .map(|element| RichTextElement::section(vec![element])),
            );
        }
        elements
    }

    /// Collects the non-empty lines of a quote body, descending through
    /// lists, list items and nested quotes.
    fn quote_lines(
        &self,
        tokens: &[Token],
        depth: usize,
        lines: &mut Vec<Vec<SectionElement>>,
    ) {
        for span in top_level_spans(tokens) {
            let head = &span[0];
            let is_container = head.is_opening()
                && matches!(
                    head.tag,
                    Tag::Blockquote | Tag::BulletList | Tag::OrderedList | Tag::ListItem
                );
            if is_container && depth < self.options.max_depth {
                self.quote_lines(span_inner(span), depth + 1, lines);
                continue;
            }

            let line = self.elements(span, Style::default());
            if !line.is_empty() {
                lines.push(line);
            }
        }
    }

    /// Compiles one list into a run of list elements.
    ///
    /// Every item becomes a section. An item holding a nested list closes the
    /// current run; the nested list follows with `indent + 1` and a new run
    /// continues the outer numbering afterwards.
    fn list_elements(
        &self,
        list: &Token,
        inner: &[Token],
        indent: u32,
        depth: usize,
    ) -> Vec<RichTextElement> {
        let style = if list.tag == Tag::OrderedList {
            ListStyle::Ordered
        } else {
            ListStyle::Bullet
        };
        let first_offset = list.start.unwrap_or(1).saturating_sub(1);

        let mut out = Vec::new();
        let mut run: Vec<RichTextElement> = Vec::new();
        let mut emitted = 0usize;

        for item in top_level_spans(inner) {
            let mut section = Vec::new();
            let mut nested = Vec::new();

            // A leaf in item position is text flattened by the depth cap.
            let children = if item[0].is_opening() {
                top_level_spans(span_inner(item))
            } else {
                vec![item]
            };
            for child in children {
                let head = &child[0];
                let is_list = head.is_opening()
                    && matches!(head.tag, Tag::BulletList | Tag::OrderedList);
                if is_list && depth < self.options.max_depth {
                    nested.extend(self.list_elements(
                        head,
                        span_inner(child),
                        indent + 1,
                        depth + 1,
                    ));
                    continue;
                }

                let child_elements = self.elements(child, Style::default());
                if child_elements.is_empty() {
                    continue;
                }
                if !section.is_empty() {
                    section.push(SectionElement::plain("\n"));
                }
                section.extend(child_elements);
            }

            run.push(RichTextElement::section(section));
            if !nested.is_empty() {
                emitted += flush_run(&mut out, &mut run, style, indent, first_offset + emitted);
                out.extend(nested);
            }
        }
        flush_run(&mut out, &mut run, style, indent, first_offset + emitted);
        out
    }
}

/// Moves `run` into a list element appended to `out`; returns the number of
/// items moved.
fn flush_run(
    out: &mut Vec<RichTextElement>,
    run: &mut Vec<RichTextElement>,
    style: ListStyle,
    indent: u32,
    offset: usize,
) -> usize {
    if run.is_empty() {
        return 0;
    }
    let elements = std::mem::take(run);
    let count = elements.len();
    out.push(RichTextElement::List {
        style,
        elements,
        indent: (indent > 0).then_some(indent),
        offset: (style == ListStyle::Ordered && offset > 0).then(|| offset as u32),
    });
    count
}

/// Folds every run of adjacent rich-text blocks into the first block of the
/// run, concatenating their elements in order.
pub fn merge_adjacent_rich_text(blocks: Vec<Block>) -> Vec<Block> {
    let mut merged: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if let (Some(Block::RichText { elements: into }), Block::RichText { elements }) =
            (merged.last_mut(), &block)
        {
            into.extend(elements.iter().cloned());
            continue;
        }
        merged.push(block);
    }
    merged
}
