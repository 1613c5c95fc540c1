//! Export tests for Markdown (chat blocks → Markdown)

use crate::common::fixture;
use insta::assert_snapshot;
use relay_markup::formats::json::parse_blocks_json;
use relay_markup::ir::blocks::TextObject;
use relay_markup::ir::rich_text::{ListStyle, RichTextElement, SectionElement, Style};
use relay_markup::{
    blocks_to_markdown, blocks_to_markdown_with_options, text_or_blocks_to_markdown, Block,
    ConvertOptions,
};

fn json_to_md(json: &str) -> String {
    let blocks = parse_blocks_json(json.as_bytes()).expect("Should parse block JSON");
    blocks_to_markdown(&blocks)
}

#[test]
fn test_empty_message_renders_nothing() {
    assert_eq!(blocks_to_markdown(&[]), "");
    assert_eq!(json_to_md(r#"{"blocks": []}"#), "");
}

#[test]
fn test_styled_section_from_json() {
    let md = json_to_md(
        r#"[{"type": "rich_text", "elements": [{"type": "rich_text_section", "elements": [
            {"type": "text", "text": "hello ", "style": {"bold": true}},
            {"type": "text", "text": "world", "style": {"italic": true, "strike": true}},
            {"type": "text", "text": " "},
            {"type": "text", "text": "x`y", "style": {"code": true}}
        ]}]}]"#,
    );
    assert_eq!(md, "**hello** ~~_world_~~ ``x`y``");
}

#[test]
fn test_broadcast_date_and_usergroup() {
    let md = json_to_md(
        r##"[{"type": "rich_text", "elements": [{"type": "rich_text_section", "elements": [
            {"type": "broadcast", "range": "channel"},
            {"type": "text", "text": " at "},
            {"type": "date", "timestamp": 1720000000, "fallback": "July 3"},
            {"type": "text", "text": " for "},
            {"type": "usergroup", "usergroup_id": "S_OPS"},
            {"type": "text", "text": " "},
            {"type": "color", "value": "#ff0000"}
        ]}]}]"##,
    );
    assert_eq!(md, r"**channel** at _1720000000_ for S\_OPS \#ff0000");
}

#[test]
fn test_link_without_text_shows_url() {
    let md = json_to_md(
        r#"[{"type": "rich_text", "elements": [{"type": "rich_text_section", "elements": [
            {"type": "link", "url": "https://example.com/a_b"}
        ]}]}]"#,
    );
    assert_eq!(md, r"[https://example\.com/a\_b](https://example.com/a_b)");
}

#[test]
fn test_ordered_list_with_offset_and_nested_bullets() {
    let blocks = vec![Block::rich_text(vec![
        RichTextElement::List {
            style: ListStyle::Ordered,
            elements: vec![RichTextElement::section(vec![SectionElement::plain(
                "prepare",
            )])],
            indent: None,
            offset: Some(2),
        },
        RichTextElement::List {
            style: ListStyle::Bullet,
            elements: vec![
                RichTextElement::section(vec![SectionElement::plain("check config")]),
                RichTextElement::section(vec![SectionElement::text(
                    "check logs",
                    Style::default().with_italic(),
                )]),
            ],
            indent: Some(1),
            offset: None,
        },
        RichTextElement::List {
            style: ListStyle::Ordered,
            elements: vec![RichTextElement::section(vec![SectionElement::plain("ship")])],
            indent: None,
            offset: Some(3),
        },
    ])];
    assert_snapshot!(blocks_to_markdown(&blocks), @r"
    3. prepare

        - check config

        - _check logs_

    4. ship
    ");
}

#[test]
fn test_quote_with_list_inside() {
    let blocks = vec![Block::rich_text(vec![RichTextElement::Quote {
        elements: vec![
            RichTextElement::section(vec![SectionElement::plain("steps:")]),
            RichTextElement::List {
                style: ListStyle::Bullet,
                elements: vec![
                    RichTextElement::section(vec![SectionElement::plain("one")]),
                    RichTextElement::section(vec![SectionElement::plain("two")]),
                ],
                indent: None,
                offset: None,
            },
        ],
    }])];
    assert_snapshot!(blocks_to_markdown(&blocks), @r"
    > steps:
    > - one
    >
    > - two
    ");
}

#[test]
fn test_header_and_section_blocks() {
    let blocks = vec![
        Block::header("Deploy #12"),
        Block::Section {
            text: Some(TextObject::mrkdwn("*already* formatted")),
            fields: vec![],
        },
    ];
    assert_eq!(
        blocks_to_markdown(&blocks),
        "## Deploy \\#12\n\n\\*already\\* formatted"
    );

    let options = ConvertOptions::default().with_header_level(1);
    assert_eq!(
        blocks_to_markdown_with_options(&blocks[..1], &options),
        "# Deploy \\#12"
    );
}

#[test]
fn test_context_block_mixes_images_and_text() {
    let md = json_to_md(
        r#"[{"type": "context", "elements": [
            {"type": "image", "image_url": "https://img.test/a.png", "alt_text": "avatar"},
            {"type": "mrkdwn", "text": " posted by *ops*"},
            {"type": "sparkles"}
        ]}]"#,
    );
    assert_eq!(
        md,
        "![avatar](https://img.test/a.png) posted by \\*ops\\*[unknown context element type]"
    );
}

#[test]
fn test_unsupported_blocks_become_placeholders() {
    let md = json_to_md(
        r#"[
            {"type": "actions", "elements": [{"type": "button", "text": {"type": "plain_text", "text": "OK"}}]},
            {"type": "file", "external_id": "F1", "source": "remote"},
            {"type": "input", "label": {"type": "plain_text", "text": "Name"}, "element": {}},
            {"type": "call", "call_id": "R1"},
            {"type": "rich_text", "elements": [
                {"type": "rich_text_hologram"},
                {"type": "rich_text_section", "elements": [{"type": "sparkle"}]}
            ]}
        ]"#,
    );
    assert_snapshot!(md, @r"
    [unrendered action block]

    [unrendered file block]

    [unrendered input block]

    [unknown block type]

    [unknown rich-text element type]

    [unknown rich-text section element type]
    ");
}

#[test]
fn test_comment_attribution_with_blocks_from_event() {
    let blocks = parse_blocks_json(fixture("slack_rich_text_event.json").as_bytes()).unwrap();
    let body = text_or_blocks_to_markdown(
        "https://chat.example.com/archives/C0456/p1717171717000100",
        "grace_h",
        "ignored when blocks are present",
        &blocks,
    );

    let expected = format!(
        "_[[comment](https://chat.example.com/archives/C0456/p1717171717000100) from grace\\_h]_\n\n{}",
        fixture("slack_rich_text_event.md")
    );
    assert_eq!(body.trim_end(), expected.trim_end());
}

#[test]
fn test_comment_attribution_without_blocks() {
    let body = text_or_blocks_to_markdown("https://c/1", "bob", "1. first [draft]", &[]);
    assert_eq!(body, "_[[comment](https://c/1) from bob]_\n\n1\\. first \\[draft\\]");
}
