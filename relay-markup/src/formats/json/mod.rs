//! Chat block JSON format
//!
//! Reads the block payloads the chat platform delivers and writes block lists
//! ready to post. Three payload shapes are accepted:
//!
//! - a bare array of blocks
//! - a message object with a `blocks` key
//! - an event envelope, `{"event": {"blocks": [...]}}`
//!
//! A block that names a known type but does not match its shape is kept as
//! [`Block::Unknown`] so one bad block never rejects the whole message.

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::blocks::Block;
use crate::options::ConvertOptions;
use serde_json::Value;

/// Parse a JSON block payload
pub fn parse_blocks_json(source: &[u8]) -> Result<Vec<Block>, ConvertError> {
    let payload: Value = serde_json::from_slice(source)
        .map_err(|e| ConvertError::ParseError(format!("Invalid block JSON: {e}")))?;

    let blocks = match payload {
        Value::Array(blocks) => blocks,
        Value::Object(mut object) => match object.remove("blocks") {
            Some(Value::Array(blocks)) => blocks,
            Some(_) => {
                return Err(ConvertError::ParseError(
                    "'blocks' is not an array".to_string(),
                ))
            }
            None => match object
                .remove("event")
                .and_then(|mut event| event.get_mut("blocks").map(Value::take))
            {
                Some(Value::Array(blocks)) => blocks,
                _ => {
                    return Err(ConvertError::ParseError(
                        "Expected a block array, a message with 'blocks' or an event envelope"
                            .to_string(),
                    ))
                }
            },
        },
        _ => {
            return Err(ConvertError::ParseError(
                "Expected a JSON array or object".to_string(),
            ))
        }
    };

    Ok(blocks.into_iter().map(block_from_value).collect())
}

fn block_from_value(value: Value) -> Block {
    serde_json::from_value(value).unwrap_or_else(|e| {
        log::debug!("keeping malformed block as unknown: {e}");
        Block::Unknown
    })
}

/// Serialize blocks as pretty-printed JSON
pub fn serialize_blocks_json(blocks: &[Block]) -> Result<String, ConvertError> {
    serde_json::to_string_pretty(blocks)
        .map_err(|e| ConvertError::SerializationError(format!("Block JSON encoding failed: {e}")))
}

/// Format implementation for chat block JSON
pub struct BlocksJsonFormat;

impl Format for BlocksJsonFormat {
    fn name(&self) -> &str {
        "blocks"
    }

    fn description(&self) -> &str {
        "Chat block JSON (bare array, message or event envelope)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &[u8], _options: &ConvertOptions) -> Result<Vec<Block>, ConvertError> {
        parse_blocks_json(source)
    }

    fn serialize(&self, blocks: &[Block], _options: &ConvertOptions) -> Result<String, ConvertError> {
        serialize_blocks_json(blocks)
    }
}
