//! Markdown format implementation
//!
//! Bidirectional conversion between GitHub-flavoured Markdown and chat blocks.
//!
//! # Library Choice
//!
//! Parsing uses `comrak` with the table, strikethrough and autolink extensions.
//! Its AST is lowered to a flat token stream ([`tokenizer`]) which the block
//! compiler consumes. Serialization is hand-written: the chat block model is
//! much smaller than Markdown, and escaping must be applied exactly once per
//! value, which a generic Markdown printer cannot guarantee.
//!
//! # Element Mapping Table
//!
//! | Markdown              | Chat block                       | Export (blocks → Markdown)            |
//! |-----------------------|----------------------------------|---------------------------------------|
//! | Paragraph             | rich_text → section              | section elements in sequence          |
//! | Heading (any level)   | header (plain text)              | `## ` + escaped text                  |
//! | Bullet / ordered list | rich_text → list, one section per item | `- ` / `N. `, blank line between items |
//! | Nested list           | sibling list with `indent + 1`   | four spaces per indent level          |
//! | Blockquote            | rich_text → quote                | `> ` on every line                    |
//! | Fenced / indented code| rich_text → preformatted         | triple-backtick fence                 |
//! | Thematic break        | divider                          | `---`                                 |
//! | Image (block)         | image                            | `![alt](url)`                         |
//! | Table                 | context notice                   | n/a                                   |
//! | Inline:               |                                  |                                       |
//! |   Emphasis            | style.italic                     | `_text_`                              |
//! |   Strong              | style.bold                       | `**text**` (`***` with italic)        |
//! |   Strikethrough       | style.strike                     | `~~text~~`                            |
//! |   Code                | style.code                       | backticks, content unescaped          |
//! |   Link                | link element                     | `[text](url)`                         |
//! |   Raw HTML            | text content only                | n/a                                   |
//!
//! # Lossy Conversions
//!
//! - Heading levels collapse to a single header block kind
//! - Tables become a visible `[unconverted token of type Table]` notice
//! - Link text loses its inline styling
//! - Raw HTML keeps its text only
//! - Blockquote nesting depth is not rendered back
//! - Lists and code inside a blockquote become plain quote lines; code keeps
//!   its style as one code span per line
//! - Footnotes become `[unconverted token of type footnote_…]` notices
//! - Channel, user and team references render as their bold raw id

pub mod parser;
pub mod serializer;
pub mod tokenizer;

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::blocks::Block;
use crate::options::ConvertOptions;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "GitHub-flavoured Markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &[u8], options: &ConvertOptions) -> Result<Vec<Block>, ConvertError> {
        parser::parse_from_markdown(source, options)
    }

    fn serialize(&self, blocks: &[Block], options: &ConvertOptions) -> Result<String, ConvertError> {
        Ok(serializer::render(blocks, options))
    }
}
