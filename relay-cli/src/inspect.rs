//! Stage dumps for the `inspect` command
//!
//! Markdown goes through two stages on its way to chat blocks:
//!
//! 1. **Tokenizing** - Markdown → flat token stream
//!    - `tokens`: token stream as JSON
//!    - `tokens-simple`: one token per line, indented by level
//!
//! 2. **Compiling** - tokens → chat blocks
//!    - `blocks`: block list as chat JSON
//!
//! Each dump uses the same options as `convert`, so `--max-depth` shows where
//! deep nesting is flattened.

use relay_markup::formats::json::serialize_blocks_json;
use relay_markup::formats::markdown::tokenizer::parse_tokens;
use relay_markup::ir::tokens::{Nesting, Token};
use relay_markup::{markdown_to_blocks_with_options, ConvertOptions};
use std::fmt::Write;

/// All stages `inspect` can print
pub const AVAILABLE_STAGES: &[&str] = &["tokens", "tokens-simple", "blocks"];

/// Run Markdown `source` up to `stage` and render the result.
pub fn execute_stage(
    source: &[u8],
    stage: &str,
    options: &ConvertOptions,
) -> Result<String, String> {
    match stage {
        "tokens" => {
            let tokens =
                parse_tokens(source, options).map_err(|e| format!("Tokenizing failed: {e}"))?;
            serde_json::to_string_pretty(&tokens)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "tokens-simple" => {
            let tokens =
                parse_tokens(source, options).map_err(|e| format!("Tokenizing failed: {e}"))?;
            let mut out = String::new();
            tokens_to_simple(&tokens, 0, &mut out);
            Ok(out)
        }
        "blocks" => {
            let blocks = markdown_to_blocks_with_options(source, options)
                .map_err(|e| format!("Compiling failed: {e}"))?;
            serialize_blocks_json(&blocks).map_err(|e| e.to_string())
        }
        other => Err(format!(
            "Unknown stage '{other}'. Available: {}",
            AVAILABLE_STAGES.join(", ")
        )),
    }
}

fn tokens_to_simple(tokens: &[Token], base: usize, out: &mut String) {
    for tok in tokens {
        let marker = match tok.nesting {
            Nesting::Opening => "+",
            Nesting::Closing => "-",
            Nesting::Leaf => " ",
        };
        let indent = "  ".repeat(base + tok.level);
        let _ = write!(out, "{indent}{marker}{}", tok.tag);
        if !tok.content.is_empty() {
            let _ = write!(out, " {:?}", tok.content);
        }
        if let Some(href) = &tok.href {
            let _ = write!(out, " -> {href}");
        }
        out.push('\n');
        tokens_to_simple(&tok.children, base + tok.level + 1, out);
    }
}
