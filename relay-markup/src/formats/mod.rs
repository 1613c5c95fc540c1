//! Format implementations
//!
//! Each format converts between chat blocks and one textual representation.

pub mod json;
pub mod markdown;
pub mod mrkdwn;

pub use json::BlocksJsonFormat;
pub use markdown::MarkdownFormat;
pub use mrkdwn::MrkdwnFormat;
