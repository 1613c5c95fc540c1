//! Reduces raw HTML islands to their text content.
//!
//! Markdown may embed inline or block HTML. The chat side has no HTML, so the
//! fragment is parsed with `html5ever` into an `RcDom` and only its text nodes
//! are kept.

use crate::error::ConvertError;
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parses `fragment` and returns the concatenated text of its nodes.
///
/// Script and style contents are skipped.
pub fn html_to_text(fragment: &str) -> Result<String, ConvertError> {
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut fragment.as_bytes())?;

    let mut text = String::new();
    collect_text(&dom.document, &mut text);
    Ok(text)
}

fn collect_text(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => {
            out.push_str(&contents.borrow());
            return;
        }
        NodeData::Element { name, .. } => {
            let local: &str = &name.local;
            if local == "script" || local == "style" {
                return;
            }
        }
        _ => {}
    }

    for child in handle.children.borrow().iter() {
        collect_text(child, out);
    }
}
