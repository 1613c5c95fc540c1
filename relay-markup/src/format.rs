//! Format trait definition
//!
//! Every format converts between its textual representation and the block
//! list of a chat message. A format may support parsing, serialization, or
//! both.

use crate::error::ConvertError;
use crate::ir::blocks::Block;
use crate::options::ConvertOptions;

/// Trait for message formats
///
/// # Examples
///
/// ```ignore
/// struct PlainFormat;
///
/// impl Format for PlainFormat {
///     fn name(&self) -> &str {
///         "plain"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, blocks: &[Block], _: &ConvertOptions) -> Result<String, ConvertError> {
///         Ok(format!("{} blocks", blocks.len()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "blocks")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions without the leading dot, used for detection from
    /// filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → blocks)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (blocks → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source bytes into blocks
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &[u8], _options: &ConvertOptions) -> Result<Vec<Block>, ConvertError> {
        Err(ConvertError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize blocks into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _blocks: &[Block], _options: &ConvertOptions) -> Result<String, ConvertError> {
        Err(ConvertError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
