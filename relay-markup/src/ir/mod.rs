//! Intermediate representations shared by the converters.
//!
//! Two shapes meet here: the flat Markdown token stream ([`tokens`]) and the
//! nested chat block tree ([`blocks`], [`rich_text`]). The Markdown direction
//! compiles the former into the latter; the chat direction renders the latter.

pub mod blocks;
pub mod rich_text;
pub mod tokens;
