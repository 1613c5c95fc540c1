//! Error types for conversion operations
//!
//! Only input that cannot be read at all produces an error. Malformed or
//! unsupported markup degrades to placeholders inside the converted output.

use thiserror::Error;

/// Errors that can occur while reading or converting a message
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Source bytes are not UTF-8
    #[error("Input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    /// Reading the source failed
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Format does not support the requested direction
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// Error during parsing (block JSON only; Markdown never fails to parse)
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
