//! Rich-text translation between GitHub-flavoured Markdown and chat blocks
//!
//!     This crate converts code-review text (Markdown) into the block model of a team chat
//!     platform, and chat messages (blocks) back into Markdown comment bodies. It is the
//!     message core of the review/chat bridge; webhooks, storage and routing live elsewhere.
//!
//!     This is a pure lib: no printing, no environment variables, no I/O beyond the readers
//!     callers hand in. It powers relay-cli but assumes no shell.
//!
//! Architecture
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # ConvertError
//!     ├── options.rs              # ConvertOptions (depth cap, header level, downconversion)
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── comment.rs              # attributed comment bodies
//!     ├── ir
//!     │   ├── tokens.rs           # flat Markdown token stream
//!     │   ├── blocks.rs           # top-level chat blocks
//!     │   └── rich_text.rs        # rich-text and section elements, styles
//!     ├── common
//!     │   ├── flat_to_blocks.rs   # token stream → blocks compiler
//!     │   ├── inline.rs           # style accumulator for inline runs
//!     │   ├── escape.rs           # Markdown escaping
//!     │   ├── html_text.rs        # raw HTML → text
//!     │   └── line_writer.rs      # newline-aware output buffer
//!     └── formats
//!         ├── markdown            # tokenizer.rs, parser.rs, serializer.rs
//!         ├── json                # chat block JSON payloads
//!         └── mrkdwn              # chat mrkdwn markup (serialization only)
//!
//! Core Algorithms
//!
//!     Markdown → blocks: comrak parses the source, the AST is lowered to a flat stream of
//!     opener/closer/leaf tokens (markdown-it style), and the compiler walks that stream
//!     matching each opener with its closer by tag and level (see ./common/flat_to_blocks.rs).
//!     Inline runs are folded into styled section elements by threading bold/italic/strike/code
//!     flags down the nesting (./common/inline.rs). Adjacent rich-text blocks are merged once at
//!     the end.
//!
//!     Blocks → Markdown: a direct recursive render into a newline-aware buffer, escaping every
//!     user value exactly once (./formats/markdown/serializer.rs).
//!
//! Failure Policy
//!
//!     Only unreadable input is an error. Malformed token structure drops the affected span;
//!     constructs with no counterpart on the other side become visible placeholders such as
//!     `[unconverted token of type Table]` or `[unrendered file block]`. Nesting deeper than
//!     `ConvertOptions::max_depth` is flattened to plain text instead of recursing.
//!
pub mod comment;
pub mod error;
pub mod format;
pub mod formats;
pub mod options;
pub mod registry;

pub mod common;
pub mod ir;

pub use comment::{text_or_blocks_to_markdown, text_or_blocks_to_markdown_with_options};
pub use error::ConvertError;
pub use format::Format;
pub use ir::blocks::Block;
pub use options::ConvertOptions;
pub use registry::FormatRegistry;

/// Converts Markdown bytes to chat blocks with default options.
///
/// Fails only when `source` is not UTF-8.
pub fn markdown_to_blocks(source: &[u8]) -> Result<Vec<Block>, ConvertError> {
    markdown_to_blocks_with_options(source, &ConvertOptions::default())
}

pub fn markdown_to_blocks_with_options(
    source: &[u8],
    options: &ConvertOptions,
) -> Result<Vec<Block>, ConvertError> {
    formats::markdown::parser::parse_from_markdown(source, options)
}

/// Converts Markdown to blocks ready for the chat posting API: when
/// `options.downconvert_rich_text` is set, rich-text blocks are replaced by
/// mrkdwn section blocks.
pub fn markdown_to_postable_blocks(
    source: &[u8],
    options: &ConvertOptions,
) -> Result<Vec<Block>, ConvertError> {
    let blocks = markdown_to_blocks_with_options(source, options)?;
    if options.downconvert_rich_text {
        Ok(formats::mrkdwn::downconvert(blocks))
    } else {
        Ok(blocks)
    }
}

/// Renders chat blocks as Markdown with default options.
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    blocks_to_markdown_with_options(blocks, &ConvertOptions::default())
}

pub fn blocks_to_markdown_with_options(blocks: &[Block], options: &ConvertOptions) -> String {
    formats::markdown::serializer::render(blocks, options)
}
