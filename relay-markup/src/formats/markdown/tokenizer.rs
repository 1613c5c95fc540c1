//! Markdown tokenizer (Markdown → flat token stream)
//!
//! Parses the source with `comrak` and walks the resulting AST, emitting the
//! flat opener/closer stream described in [`crate::ir::tokens`]. Paragraphs,
//! headings and table cells get a single `Inline` token holding their inline
//! children.

use crate::error::ConvertError;
use crate::ir::tokens::{Tag, Token};
use crate::options::ConvertOptions;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use std::io::Read;

/// Tokenizes Markdown bytes. Fails only when the bytes are not UTF-8.
pub fn parse_tokens(bytes: &[u8], options: &ConvertOptions) -> Result<Vec<Token>, ConvertError> {
    let source = std::str::from_utf8(bytes)?;
    Ok(tokenize(source, options))
}

/// Reads `reader` to the end and tokenizes its contents.
pub fn read_tokens(mut reader: impl Read, options: &ConvertOptions) -> Result<Vec<Token>, ConvertError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_tokens(&bytes, options)
}

/// Tokenizes a Markdown string. Every input produces a stream.
pub fn tokenize(source: &str, options: &ConvertOptions) -> Vec<Token> {
    let arena = Arena::new();
    let root = parse_document(&arena, source, &default_comrak_options());

    let mut walker = Walker {
        options,
        out: Vec::new(),
    };
    for child in root.children() {
        walker.block(child, 0, 0);
    }
    walker.out
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.footnotes = true;
    options
}

struct Walker<'o> {
    options: &'o ConvertOptions,
    out: Vec<Token>,
}

impl Walker<'_> {
    fn block<'a>(&mut self, node: &'a AstNode<'a>, level: usize, depth: usize) {
        if depth >= self.options.max_depth {
            self.flatten(node, level);
            return;
        }

        let node_data = node.data.borrow();
        match &node_data.value {
            NodeValue::Paragraph => self.inline_container(Tag::Paragraph, node, level, depth),
            NodeValue::Heading(_) => self.inline_container(Tag::Heading, node, level, depth),
            NodeValue::BlockQuote => self.container(Tag::Blockquote, node, level, depth),
            NodeValue::List(list) => {
                let open = match list.list_type {
                    ListType::Bullet => Token::open(Tag::BulletList, true, level),
                    ListType::Ordered => {
                        Token::open(Tag::OrderedList, true, level).with_start(list.start)
                    }
                };
                let tag = open.tag;
                self.out.push(open);
                self.children(node, level + 1, depth);
                self.out.push(Token::close(tag, true, level));
            }
            NodeValue::Item(_) => self.container(Tag::ListItem, node, level, depth),
            NodeValue::CodeBlock(code) => {
                let tag = if code.fenced { Tag::Fence } else { Tag::CodeBlock };
                self.out
                    .push(Token::leaf(tag, true, level).with_content(code.literal.clone()));
            }
            NodeValue::HtmlBlock(html) => {
                self.out.push(
                    Token::leaf(Tag::HtmlBlock, true, level).with_content(html.literal.clone()),
                );
            }
            NodeValue::ThematicBreak => self.out.push(Token::leaf(Tag::Hr, true, level)),
            NodeValue::Table(_) => self.table(node, level, depth),
            value if value.block() => {
                self.container(Tag::Other(node_name(value)), node, level, depth)
            }
            _ => self.inline(node, level, depth),
        }
    }

    fn children<'a>(&mut self, node: &'a AstNode<'a>, level: usize, depth: usize) {
        for child in node.children() {
            self.block(child, level, depth + 1);
        }
    }

    fn container<'a>(&mut self, tag: Tag, node: &'a AstNode<'a>, level: usize, depth: usize) {
        self.out.push(Token::open(tag, true, level));
        self.children(node, level + 1, depth);
        self.out.push(Token::close(tag, true, level));
    }

    /// Opener, one `Inline` token with the node's inline children, closer.
    fn inline_container<'a>(
        &mut self,
        tag: Tag,
        node: &'a AstNode<'a>,
        level: usize,
        depth: usize,
    ) {
        self.out.push(Token::open(tag, true, level));
        let children = self.inline_children(node, depth + 1);
        self.out
            .push(Token::leaf(Tag::Inline, false, level + 1).with_children(children));
        self.out.push(Token::close(tag, true, level));
    }

    fn inline_children<'a>(&mut self, node: &'a AstNode<'a>, depth: usize) -> Vec<Token> {
        let outer = std::mem::take(&mut self.out);
        for child in node.children() {
            self.inline(child, 0, depth);
        }
        std::mem::replace(&mut self.out, outer)
    }

    /// Header rows go under `Thead` with `Th` cells, the rest under `Tbody`
    /// with `Td` cells.
    fn table<'a>(&mut self, node: &'a AstNode<'a>, level: usize, depth: usize) {
        let (head, body): (Vec<_>, Vec<_>) = node
            .children()
            .partition(|row| matches!(row.data.borrow().value, NodeValue::TableRow(true)));

        self.out.push(Token::open(Tag::Table, true, level));
        for (group, cell, rows) in [(Tag::Thead, Tag::Th, head), (Tag::Tbody, Tag::Td, body)] {
            if rows.is_empty() {
                continue;
            }
            self.out.push(Token::open(group, true, level + 1));
            for row in rows {
                self.out.push(Token::open(Tag::Tr, true, level + 2));
                for child in row.children() {
                    self.inline_container(cell, child, level + 3, depth + 3);
                }
                self.out.push(Token::close(Tag::Tr, true, level + 2));
            }
            self.out.push(Token::close(group, true, level + 1));
        }
        self.out.push(Token::close(Tag::Table, true, level));
    }

    fn inline<'a>(&mut self, node: &'a AstNode<'a>, level: usize, depth: usize) {
        if depth >= self.options.max_depth {
            self.flatten(node, level);
            return;
        }

        let node_data = node.data.borrow();
        match &node_data.value {
            NodeValue::Text(text) => self.out.push(Token::text(text.clone(), level)),
            NodeValue::Code(code) => self.out.push(
                Token::leaf(Tag::CodeInline, false, level).with_content(code.literal.clone()),
            ),
            NodeValue::SoftBreak => self.out.push(Token::leaf(Tag::Softbreak, false, level)),
            NodeValue::LineBreak => self.out.push(Token::leaf(Tag::Hardbreak, false, level)),
            NodeValue::HtmlInline(html) => self
                .out
                .push(Token::leaf(Tag::HtmlInline, false, level).with_content(html.clone())),
            NodeValue::Emph => self.span(Token::open(Tag::Emphasis, false, level), node, depth),
            NodeValue::Strong => self.span(Token::open(Tag::Strong, false, level), node, depth),
            NodeValue::Strikethrough => {
                self.span(Token::open(Tag::Strikethrough, false, level), node, depth)
            }
            NodeValue::Link(link) => self.span(
                Token::open(Tag::Link, false, level).with_href(link.url.clone()),
                node,
                depth,
            ),
            NodeValue::Image(link) => {
                let alt = self.inline_children(node, depth + 1);
                self.out.push(
                    Token::leaf(Tag::Image, false, level)
                        .with_href(link.url.clone())
                        .with_children(alt),
                );
            }
            value if node.first_child().is_some() => self.span(
                Token::open(Tag::Other(node_name(value)), false, level),
                node,
                depth,
            ),
            value => self
                .out
                .push(Token::leaf(Tag::Other(node_name(value)), false, level)),
        }
    }

    fn span<'a>(&mut self, open: Token, node: &'a AstNode<'a>, depth: usize) {
        let (tag, level) = (open.tag, open.level);
        self.out.push(open);
        for child in node.children() {
            self.inline(child, level + 1, depth + 1);
        }
        self.out.push(Token::close(tag, false, level));
    }

    fn flatten<'a>(&mut self, node: &'a AstNode<'a>, level: usize) {
        log::debug!(
            "nesting deeper than {}; flattening subtree to text",
            self.options.max_depth
        );
        let text = subtree_text(node);
        if !text.is_empty() {
            self.out.push(Token::text(text, level));
        }
    }
}

/// Name for a node without a dedicated tag, shown in placeholders.
fn node_name(value: &NodeValue) -> &'static str {
    match value {
        NodeValue::FootnoteDefinition(_) => "footnote_definition",
        NodeValue::FootnoteReference(_) => "footnote_reference",
        NodeValue::DescriptionList => "description_list",
        NodeValue::DescriptionItem(_) => "description_item",
        NodeValue::DescriptionTerm => "description_term",
        NodeValue::DescriptionDetails => "description_details",
        NodeValue::FrontMatter(_) => "front_matter",
        NodeValue::TableRow(_) => "table_row",
        NodeValue::TableCell => "table_cell",
        NodeValue::TaskItem(_) => "task_item",
        NodeValue::MultilineBlockQuote(_) => "multiline_block_quote",
        NodeValue::Superscript => "superscript",
        NodeValue::Underline => "underline",
        NodeValue::SpoileredText => "spoiler",
        NodeValue::Math(_) => "math",
        NodeValue::WikiLink(_) => "wikilink",
        NodeValue::Escaped => "escaped",
        NodeValue::EscapedTag(_) => "escaped_tag",
        _ => "unknown",
    }
}

/// Visible text of a subtree, with breaks as spaces.
fn subtree_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(t) => text.push_str(t),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::CodeBlock(code) => text.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text
}
