//! Markdown parsing (Markdown → chat blocks)
//!
//! Pipeline: Markdown bytes → Comrak AST → flat tokens → blocks

use crate::common::flat_to_blocks::compile_blocks;
use crate::error::ConvertError;
use crate::formats::markdown::tokenizer::parse_tokens;
use crate::ir::blocks::Block;
use crate::options::ConvertOptions;

/// Parse Markdown bytes to chat blocks
pub fn parse_from_markdown(
    source: &[u8],
    options: &ConvertOptions,
) -> Result<Vec<Block>, ConvertError> {
    // Step 1: Markdown → tokens (the only step that can fail)
    let tokens = parse_tokens(source, options)?;

    // Step 2: tokens → blocks, adjacent rich text merged
    Ok(compile_blocks(&tokens, options))
}
