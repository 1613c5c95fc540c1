//! Chat event payloads rendered as Markdown

use crate::common::fixture;
use relay_markup::formats::json::{parse_blocks_json, serialize_blocks_json};
use relay_markup::ir::rich_text::{RichTextElement, SectionElement};
use relay_markup::{blocks_to_markdown, Block, ConvertError, ConvertOptions, FormatRegistry};

#[test]
fn test_event_envelope_renders_to_markdown() {
    let blocks = parse_blocks_json(fixture("slack_rich_text_event.json").as_bytes())
        .expect("Should parse event");
    assert_eq!(blocks.len(), 1);

    let md = blocks_to_markdown(&blocks);
    assert_eq!(md.trim_end(), fixture("slack_rich_text_event.md").trim_end());
}

#[test]
fn test_event_quote_is_normalized() {
    let blocks = parse_blocks_json(fixture("slack_rich_text_event.json").as_bytes()).unwrap();
    let Block::RichText { elements } = &blocks[0] else {
        panic!("Expected rich text, got {:?}", blocks[0]);
    };
    assert_eq!(
        elements[2],
        RichTextElement::Quote {
            elements: vec![RichTextElement::section(vec![SectionElement::plain(
                "Ship it."
            )])]
        }
    );
}

#[test]
fn test_registry_converts_event_to_markdown() {
    let registry = FormatRegistry::with_defaults();
    let source = fixture("slack_rich_text_event.json");
    let options = ConvertOptions::default();
    let blocks = registry.parse(source.as_bytes(), "blocks", &options).unwrap();
    let md = registry.serialize(&blocks, "markdown", &options).unwrap();
    assert_eq!(md.trim_end(), fixture("slack_rich_text_event.md").trim_end());
}

#[test]
fn test_serialized_blocks_parse_back() {
    let blocks = parse_blocks_json(fixture("slack_rich_text_event.json").as_bytes()).unwrap();
    let json = serialize_blocks_json(&blocks).unwrap();
    assert_eq!(parse_blocks_json(json.as_bytes()).unwrap(), blocks);
}

#[test]
fn test_markdown_cannot_be_read_as_blocks() {
    let result = parse_blocks_json(fixture("review_comment.md").as_bytes());
    assert!(matches!(result, Err(ConvertError::ParseError(_))));
}
