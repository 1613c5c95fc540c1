//! Markdown format tests
//!
//! Tests for Markdown → blocks compilation, blocks → Markdown rendering and
//! the behaviour of the two directions combined.

mod escaping;
mod export;
mod import;
mod roundtrip;
