//! Round-trip tests (Markdown → blocks → Markdown)
//!
//! Markdown produced by the renderer must be a fixed point: compiling it
//! again and rendering the result gives the same text.

use crate::common::fixture;
use relay_markup::{blocks_to_markdown, markdown_to_blocks};

fn md_to_md(md: &str) -> String {
    let blocks = markdown_to_blocks(md.as_bytes()).expect("Should parse markdown");
    blocks_to_markdown(&blocks)
}

fn assert_fixed_point(md: &str) {
    let once = md_to_md(md);
    let twice = md_to_md(&once);
    assert_eq!(once, twice, "rendering of {md:?} is not stable");
}

#[test]
fn test_review_comment_fixture() {
    let rendered = md_to_md(&fixture("review_comment.md"));
    assert_eq!(
        rendered.trim_end(),
        fixture("review_comment.expected.md").trim_end()
    );
}

#[test]
fn test_review_comment_is_stable() {
    assert_fixed_point(&fixture("review_comment.md"));
}

#[test]
fn test_event_markdown_is_stable() {
    assert_fixed_point(&fixture("slack_rich_text_event.md"));
}

#[test]
fn test_styles_are_stable() {
    for md in [
        "plain text",
        "**bold** _italic_ ~~strike~~ `code`",
        "***both*** and ~~**struck bold**~~",
        "see [the docs](https://example.com/a_b) now",
        "escaped \\*stars\\* and \\_underscores\\_",
    ] {
        assert_fixed_point(md);
    }
}

#[test]
fn test_lists_are_stable() {
    assert_fixed_point("- one\n- two\n  - nested\n- three\n");
    assert_fixed_point("3. three\n4. four\n");
}

#[test]
fn test_quotes_and_code_are_stable() {
    assert_fixed_point("> quoted **text** and `code`\n");
    assert_fixed_point("```\nfn main() {\n    println!(\"*\");\n}\n```\n");
}

#[test]
fn test_simple_document_round_trips_exactly() {
    let md = "## Title\n\nSome **bold** text\\.\n\n- a\n\n- b\n\n---\n\n> quote";
    assert_eq!(md_to_md(md), md);
}

#[test]
fn test_lists_inside_quotes_keep_item_boundaries() {
    assert_eq!(md_to_md("> - q1\n> - q2"), "> q1\n> q2");
    assert_eq!(md_to_md("> 1. one\n> 2. two"), "> one\n> two");
    // Rendered quote lines come back as one soft-wrapped paragraph.
    assert_eq!(md_to_md("> q1\n> q2"), "> q1 q2");
}

#[test]
fn test_html_block_adds_no_blank_lines() {
    let md = "para\n\n<div>\nhello\n</div>\n\nafter";
    assert_eq!(md_to_md(md), "para\n\nhello\n\nafter");
    assert_fixed_point(md);
}

#[test]
fn test_fence_inside_quote_keeps_its_lines() {
    let md = "> ```\n> let a = 1;\n> let b = 2;\n> ```";
    assert_eq!(md_to_md(md), "> `let a = 1;`\n> `let b = 2;`");
}
