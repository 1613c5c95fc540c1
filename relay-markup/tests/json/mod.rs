//! Chat block JSON tests
//!
//! Payloads as delivered by the chat platform, rendered to Markdown.

mod events;
