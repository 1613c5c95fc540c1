//! Attributed comment bodies for messages forwarded from chat.

use crate::common::escape::escape;
use crate::formats::markdown::serializer::render;
use crate::ir::blocks::Block;
use crate::options::ConvertOptions;

/// Builds a Markdown comment body for a chat message.
///
/// The body starts with an attribution line linking back to the message,
/// followed by a blank line and the rendered blocks. Messages without blocks
/// fall back to their escaped plain text.
pub fn text_or_blocks_to_markdown(
    comment_url: &str,
    author: &str,
    text: &str,
    blocks: &[Block],
) -> String {
    text_or_blocks_to_markdown_with_options(
        comment_url,
        author,
        text,
        blocks,
        &ConvertOptions::default(),
    )
}

pub fn text_or_blocks_to_markdown_with_options(
    comment_url: &str,
    author: &str,
    text: &str,
    blocks: &[Block],
    options: &ConvertOptions,
) -> String {
    let body = if blocks.is_empty() {
        escape(text).into_owned()
    } else {
        render(blocks, options)
    };
    format!(
        "_[[comment]({comment_url}) from {}]_\n\n{body}",
        escape(author)
    )
}
