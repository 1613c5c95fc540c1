//! Format-agnostic conversion code.

pub mod escape;
pub mod flat_to_blocks;
pub mod html_text;
pub mod inline;
pub mod line_writer;
