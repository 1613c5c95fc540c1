//! Defines the flat token stream produced by the Markdown tokenizer.
//!
//! The stream follows the markdown-it convention: containers are represented
//! by an opening and a closing token sharing the same [`Tag`] and `level`,
//! leaves stand alone. Paragraph-like blocks hold a single [`Tag::Inline`]
//! token whose `children` form a second, independent stream of inline tokens
//! with levels counted from zero again.
//!
//! ```text
//! Paragraph  Opening  level 0
//!   Inline   Leaf     level 1   children: [Strong Opening 0, Text 1, Strong Closing 0]
//! Paragraph  Closing  level 0
//! ```

use serde::Serialize;
use std::fmt;

/// Type identifier of a token. Opening and closing tokens share the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tag {
    Blockquote,
    BulletList,
    OrderedList,
    ListItem,
    Heading,
    Paragraph,
    Table,
    Thead,
    Tbody,
    Tr,
    Th,
    Td,
    Emphasis,
    Strong,
    Strikethrough,
    Link,
    Inline,
    Text,
    CodeInline,
    Softbreak,
    Hardbreak,
    HtmlInline,
    Image,
    CodeBlock,
    Fence,
    HtmlBlock,
    Hr,
    /// A construct the tokenizer recognises without a dedicated tag
    /// (footnotes, description lists, superscript, ...).
    Other(&'static str),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Other(name) => f.write_str(name),
            tag => write!(f, "{tag:?}"),
        }
    }
}

/// Position of a token in its container pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Nesting {
    Opening,
    Closing,
    Leaf,
}

/// A single lexical unit of the Markdown stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub tag: Tag,
    pub nesting: Nesting,
    pub block: bool,
    pub level: usize,
    /// Text, code or raw HTML carried by leaves.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    /// Link target or image source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// First number of an ordered list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    /// Inline tokens of an `Inline` container, alt text of an `Image`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Token>,
}

impl Token {
    fn new(tag: Tag, nesting: Nesting, block: bool, level: usize) -> Self {
        Self {
            tag,
            nesting,
            block,
            level,
            content: String::new(),
            href: None,
            start: None,
            children: Vec::new(),
        }
    }

    pub fn open(tag: Tag, block: bool, level: usize) -> Self {
        Self::new(tag, Nesting::Opening, block, level)
    }

    pub fn close(tag: Tag, block: bool, level: usize) -> Self {
        Self::new(tag, Nesting::Closing, block, level)
    }

    pub fn leaf(tag: Tag, block: bool, level: usize) -> Self {
        Self::new(tag, Nesting::Leaf, block, level)
    }

    /// Inline text leaf.
    pub fn text(content: impl Into<String>, level: usize) -> Self {
        Self::leaf(Tag::Text, false, level).with_content(content)
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_children(mut self, children: Vec<Token>) -> Self {
        self.children = children;
        self
    }

    pub fn is_opening(&self) -> bool {
        self.nesting == Nesting::Opening
    }

    pub fn is_closing(&self) -> bool {
        self.nesting == Nesting::Closing
    }

    pub fn is_block(&self) -> bool {
        self.block
    }
}

/// Finds the closer matching the opener at `open`.
///
/// The closer is the first later token that is closing, carries the same tag
/// and sits at a level no deeper than the opener. A same-tag closer nested
/// deeper (an inner list inside a list) is skipped.
pub fn find_closer(tokens: &[Token], open: usize) -> Option<usize> {
    let opener = tokens.get(open)?;
    tokens[open + 1..]
        .iter()
        .position(|tok| tok.is_closing() && tok.tag == opener.tag && tok.level <= opener.level)
        .map(|offset| open + 1 + offset)
}

/// Splits a token slice into its top-level spans: each matched
/// opener..=closer pair, or a single leaf. Stray closers are dropped and an
/// unmatched opener ends the split.
pub fn top_level_spans(tokens: &[Token]) -> Vec<&[Token]> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while pos < tokens.len() {
        let tok = &tokens[pos];
        if tok.is_opening() {
            match find_closer(tokens, pos) {
                Some(close) => {
                    spans.push(&tokens[pos..=close]);
                    pos = close + 1;
                }
                None => {
                    log::debug!("unmatched {} opener at level {}", tok.tag, tok.level);
                    break;
                }
            }
        } else if tok.is_closing() {
            log::debug!("stray {} closer at level {}", tok.tag, tok.level);
            pos += 1;
        } else {
            spans.push(&tokens[pos..=pos]);
            pos += 1;
        }
    }
    spans
}

/// Contents strictly between an opener and its closer.
pub fn span_inner(span: &[Token]) -> &[Token] {
    match span.len() {
        0..=2 => &[],
        len => &span[1..len - 1],
    }
}
