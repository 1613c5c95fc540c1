//! Import tests for Markdown (Markdown → chat blocks)
//!
//! These tests check the block structure produced for each Markdown
//! construct.

use relay_markup::ir::blocks::Block;
use relay_markup::ir::rich_text::{ListStyle, RichTextElement, SectionElement, Style};
use relay_markup::{
    markdown_to_blocks, markdown_to_blocks_with_options, markdown_to_postable_blocks,
    ConvertOptions,
};

fn md_to_blocks(md: &str) -> Vec<Block> {
    markdown_to_blocks(md.as_bytes()).expect("Should parse markdown")
}

fn rich_text_elements(block: &Block) -> &[RichTextElement] {
    match block {
        Block::RichText { elements } => elements,
        other => panic!("Expected rich text block, got {other:?}"),
    }
}

fn plain_section(text: &str) -> RichTextElement {
    RichTextElement::section(vec![SectionElement::plain(text)])
}

#[test]
fn test_emphasis_then_list_merges_into_one_block() {
    let blocks = md_to_blocks("**bold** and _italic_\n\n- item1\n- item2");

    assert_eq!(
        blocks,
        vec![Block::rich_text(vec![
            RichTextElement::section(vec![
                SectionElement::text("bold", Style::default().with_bold()),
                SectionElement::plain(" and "),
                SectionElement::text("italic", Style::default().with_italic()),
            ]),
            RichTextElement::List {
                style: ListStyle::Bullet,
                elements: vec![plain_section("item1"), plain_section("item2")],
                indent: None,
                offset: None,
            },
        ])]
    );
}

#[test]
fn test_two_paragraphs_merge_in_order() {
    let blocks = md_to_blocks("first\n\nsecond\n");
    assert_eq!(
        blocks,
        vec![Block::rich_text(vec![
            plain_section("first"),
            plain_section("second")
        ])]
    );
}

#[test]
fn test_link() {
    let blocks = md_to_blocks("[abc](http://x/y)");
    assert_eq!(
        blocks,
        vec![Block::rich_text(vec![RichTextElement::section(vec![
            SectionElement::link("http://x/y", "abc", Style::default())
        ])])]
    );
}

#[test]
fn test_nested_emphasis_compounds() {
    let blocks = md_to_blocks("***both*** ~~gone~~\n");
    let elements = rich_text_elements(&blocks[0]);
    assert_eq!(
        elements,
        &[RichTextElement::section(vec![
            SectionElement::text("both", Style::default().with_bold().with_italic()),
            SectionElement::plain(" "),
            SectionElement::text("gone", Style::default().with_strike()),
        ])]
    );
}

#[test]
fn test_code_span_forces_code_style() {
    let blocks = md_to_blocks("**`*.go`**\n");
    assert_eq!(
        rich_text_elements(&blocks[0]),
        &[RichTextElement::section(vec![SectionElement::text(
            "*.go",
            Style::default().with_bold().with_code()
        )])]
    );
}

#[test]
fn test_heading_levels_collapse_to_header() {
    let blocks = md_to_blocks("# One\n\n### Three *styled*\n");
    assert_eq!(
        blocks,
        vec![Block::header("One"), Block::header("Three styled")]
    );
}

#[test]
fn test_nested_list_becomes_indented_sibling() {
    let blocks = md_to_blocks("- outer\n  - inner\n- after\n");
    let elements = rich_text_elements(&blocks[0]);

    let summary: Vec<_> = elements
        .iter()
        .map(|element| match element {
            RichTextElement::List {
                elements, indent, ..
            } => (elements.len(), *indent),
            other => panic!("Expected list, got {other:?}"),
        })
        .collect();
    assert_eq!(summary, vec![(1, None), (1, Some(1)), (1, None)]);
}

#[test]
fn test_ordered_list_offset() {
    let blocks = md_to_blocks("7. seven\n8. eight\n");
    match &rich_text_elements(&blocks[0])[0] {
        RichTextElement::List { style, offset, .. } => {
            assert_eq!(*style, ListStyle::Ordered);
            assert_eq!(*offset, Some(6));
        }
        other => panic!("Expected list, got {other:?}"),
    }
}

#[test]
fn test_multi_paragraph_list_item_keeps_one_section() {
    let blocks = md_to_blocks("- first para\n\n  second para\n- next\n");
    match &rich_text_elements(&blocks[0])[0] {
        RichTextElement::List { elements, .. } => {
            assert_eq!(elements.len(), 2);
            assert_eq!(
                elements[0],
                RichTextElement::section(vec![
                    SectionElement::plain("first para"),
                    SectionElement::plain("\n"),
                    SectionElement::plain("second para"),
                ])
            );
        }
        other => panic!("Expected list, got {other:?}"),
    }
}

#[test]
fn test_blockquote_wraps_each_element_in_a_section() {
    let blocks = md_to_blocks("> quoted *text*\n");
    assert_eq!(
        blocks,
        vec![Block::rich_text(vec![RichTextElement::Quote {
            elements: vec![
                plain_section("quoted "),
                RichTextElement::section(vec![SectionElement::text(
                    "text",
                    Style::default().with_italic()
                )]),
            ]
        }])]
    );
}

#[test]
fn test_nested_blockquote_does_not_split_outer_quote() {
    let blocks = md_to_blocks("> outer\n>\n> > inner\n>\n> tail\n");
    assert_eq!(blocks.len(), 1);
    let elements = rich_text_elements(&blocks[0]);
    assert_eq!(elements.len(), 1);
    match &elements[0] {
        RichTextElement::Quote { elements } => {
            let texts: Vec<_> = elements
                .iter()
                .map(|element| element.flat_text())
                .collect();
            assert_eq!(texts, vec!["outer", "\n", "inner", "\n", "tail"]);
        }
        other => panic!("Expected quote, got {other:?}"),
    }
}

#[test]
fn test_lists_inside_quote_are_separated_by_line_breaks() {
    for md in ["> - q1\n> - q2\n", "> 1. q1\n> 2. q2\n"] {
        assert_eq!(
            md_to_blocks(md),
            vec![Block::rich_text(vec![RichTextElement::Quote {
                elements: vec![plain_section("q1"), plain_section("\n"), plain_section("q2")]
            }])],
            "input {md:?}"
        );
    }
}

#[test]
fn test_fence_inside_quote_is_one_code_run_per_line() {
    let blocks = md_to_blocks("> ```\n> let a = 1;\n> let b = 2;\n> ```\n");
    let code = Style::default().with_code();
    assert_eq!(
        blocks,
        vec![Block::rich_text(vec![RichTextElement::Quote {
            elements: vec![
                RichTextElement::section(vec![SectionElement::text("let a = 1;", code)]),
                plain_section("\n"),
                RichTextElement::section(vec![SectionElement::text("let b = 2;", code)]),
            ]
        }])]
    );
}

#[test]
fn test_code_blocks_become_preformatted() {
    let blocks = md_to_blocks("```rust\nfn main() {}\n```\n\n    indented\n");
    assert_eq!(
        blocks,
        vec![Block::rich_text(vec![
            RichTextElement::preformatted("fn main() {}\n"),
            RichTextElement::preformatted("indented\n"),
        ])]
    );
}

#[test]
fn test_rule_splits_rich_text() {
    let blocks = md_to_blocks("above\n\n---\n\nbelow\n");
    assert_eq!(
        blocks,
        vec![
            Block::rich_text(vec![plain_section("above")]),
            Block::Divider,
            Block::rich_text(vec![plain_section("below")]),
        ]
    );
}

#[test]
fn test_table_becomes_notice() {
    let blocks = md_to_blocks("| a | b |\n|---|---|\n| 1 | 2 |\n");
    assert_eq!(
        blocks,
        vec![Block::notice("[unconverted token of type Table]")]
    );
}

#[test]
fn test_html_reduces_to_text() {
    let blocks = md_to_blocks("Press <kbd>Enter</kbd>\n");
    let text: String = rich_text_elements(&blocks[0])
        .iter()
        .map(|element| element.flat_text())
        .collect();
    assert_eq!(text, "Press Enter");
}

#[test]
fn test_html_block_text_is_trimmed() {
    let blocks = md_to_blocks("para\n\n<div>\nhello\n</div>\n\nafter\n");
    assert_eq!(
        blocks,
        vec![Block::rich_text(vec![
            plain_section("para"),
            plain_section("hello"),
            plain_section("after"),
        ])]
    );
}

#[test]
fn test_footnotes_become_placeholders() {
    let blocks = md_to_blocks("Note[^1].\n\n[^1]: the detail\n");
    assert_eq!(
        blocks,
        vec![
            Block::rich_text(vec![RichTextElement::section(vec![
                SectionElement::plain("Note"),
                SectionElement::plain("[unconverted token of type footnote_reference]"),
                SectionElement::plain("."),
            ])]),
            Block::notice("[unconverted token of type footnote_definition]"),
        ]
    );
}

#[test]
fn test_html_comment_block_is_dropped() {
    let blocks = md_to_blocks("<!-- reviewer notes -->\n\nvisible\n");
    assert_eq!(blocks, vec![Block::rich_text(vec![plain_section("visible")])]);
}

#[test]
fn test_inline_image_becomes_placeholder_text() {
    let blocks = md_to_blocks("See ![the chart](https://img.test/c.png)\n");
    let text: String = rich_text_elements(&blocks[0])
        .iter()
        .map(|element| element.flat_text())
        .collect();
    assert_eq!(text, "See [image the chart]");
}

#[test]
fn test_softbreak_is_a_space() {
    let blocks = md_to_blocks("one\ntwo\n");
    assert_eq!(
        blocks,
        vec![Block::rich_text(vec![RichTextElement::section(vec![
            SectionElement::plain("one"),
            SectionElement::plain(" "),
            SectionElement::plain("two"),
        ])])]
    );
}

#[test]
fn test_deep_nesting_is_capped() {
    let md = format!("{}deep\n", "> ".repeat(200));
    let options = ConvertOptions::default().with_max_depth(8);
    let blocks = markdown_to_blocks_with_options(md.as_bytes(), &options).unwrap();
    assert_eq!(blocks.len(), 1);

    let text: String = rich_text_elements(&blocks[0])
        .iter()
        .map(|element| element.flat_text())
        .collect();
    assert_eq!(text, "deep");
}

#[test]
fn test_empty_and_blank_input() {
    assert!(md_to_blocks("").is_empty());
    assert!(md_to_blocks("   \n\n").is_empty());
}

#[test]
fn test_postable_blocks_downconvert_rich_text() {
    let md = "# Title\n\n**hi** <@U1>\n\n- a\n- b\n";
    let options = ConvertOptions::default().with_downconversion(true);
    let blocks = markdown_to_postable_blocks(md.as_bytes(), &options).unwrap();
    assert_eq!(
        blocks,
        vec![
            Block::header("Title"),
            Block::mrkdwn_section("*hi* &lt;@U1&gt;\n\n- a\n- b"),
        ]
    );

    let kept = markdown_to_postable_blocks(md.as_bytes(), &ConvertOptions::default()).unwrap();
    assert!(matches!(kept[1], Block::RichText { .. }));
}
