//! Escaped text must read back as the same literal text.

use proptest::prelude::*;
use relay_markup::formats::markdown::tokenizer::tokenize;
use relay_markup::ir::rich_text::{RichTextElement, SectionElement};
use relay_markup::ir::tokens::{Nesting, Tag};
use relay_markup::{blocks_to_markdown, Block, ConvertOptions};

fn render_plain(text: &str) -> String {
    blocks_to_markdown(&[Block::rich_text(vec![RichTextElement::section(vec![
        SectionElement::plain(text),
    ])])])
}

#[test]
fn test_leading_asterisk_is_escaped() {
    assert_eq!(render_plain("*foo"), "\\*foo");
}

#[test]
fn test_escaped_heading_marker_stays_text() {
    let md = render_plain("# not a heading");
    assert_eq!(md, "\\# not a heading");

    let tokens = tokenize(&md, &ConvertOptions::default());
    assert_eq!(tokens[0].tag, Tag::Paragraph);
}

proptest! {
    #[test]
    fn rendered_specials_parse_back_as_plain_text(input in r"[a-f\[\]\\`*_{}()#+.!-]{1,24}") {
        let md = render_plain(&input);
        let tokens = tokenize(&md, &ConvertOptions::default());

        prop_assert_eq!(tokens.len(), 3, "tokens: {:?}", tokens);
        prop_assert_eq!(tokens[0].tag, Tag::Paragraph);
        prop_assert_eq!(tokens[0].nesting, Nesting::Opening);
        prop_assert_eq!(tokens[1].tag, Tag::Inline);
        prop_assert_eq!(tokens[2].tag, Tag::Paragraph);
        prop_assert_eq!(tokens[2].nesting, Nesting::Closing);

        let children = &tokens[1].children;
        prop_assert!(children.iter().all(|tok| tok.tag == Tag::Text), "children: {:?}", children);
        let text: String = children.iter().map(|tok| tok.content.as_str()).collect();
        prop_assert_eq!(text, input);
    }
}
