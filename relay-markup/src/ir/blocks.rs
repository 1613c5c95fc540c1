//! Top-level chat blocks.

use crate::ir::rich_text::RichTextElement;
use serde::{Deserialize, Serialize};

/// A text object as used by header, section and context blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        emoji: Option<bool>,
    },
    Mrkdwn {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        verbatim: Option<bool>,
    },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        TextObject::PlainText {
            text: text.into(),
            emoji: Some(true),
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        TextObject::Mrkdwn {
            text: text.into(),
            verbatim: None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            TextObject::PlainText { text, .. } | TextObject::Mrkdwn { text, .. } => text,
        }
    }
}

/// Elements of a context block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextElement {
    Image {
        image_url: String,
        #[serde(default)]
        alt_text: String,
    },
    PlainText {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        emoji: Option<bool>,
    },
    Mrkdwn {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        verbatim: Option<bool>,
    },
    #[serde(other)]
    Unknown,
}

impl From<TextObject> for ContextElement {
    fn from(text: TextObject) -> Self {
        match text {
            TextObject::PlainText { text, emoji } => ContextElement::PlainText { text, emoji },
            TextObject::Mrkdwn { text, verbatim } => ContextElement::Mrkdwn { text, verbatim },
        }
    }
}

/// A top-level block of a chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Actions {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        elements: Vec<serde_json::Value>,
    },
    Context {
        elements: Vec<ContextElement>,
    },
    Divider,
    File {
        #[serde(default)]
        external_id: String,
        #[serde(default)]
        source: String,
    },
    Header {
        text: TextObject,
    },
    Image {
        image_url: String,
        #[serde(default)]
        alt_text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<TextObject>,
    },
    Input {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<TextObject>,
    },
    RichText {
        elements: Vec<RichTextElement>,
    },
    Section {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<TextObject>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fields: Vec<TextObject>,
    },
    #[serde(other)]
    Unknown,
}

impl Block {
    pub fn rich_text(elements: Vec<RichTextElement>) -> Self {
        Block::RichText { elements }
    }

    /// Context block carrying a single plain-text notice.
    pub fn notice(text: impl Into<String>) -> Self {
        Block::Context {
            elements: vec![TextObject::plain(text).into()],
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Block::Header {
            text: TextObject::plain(text),
        }
    }

    pub fn mrkdwn_section(text: impl Into<String>) -> Self {
        Block::Section {
            text: Some(TextObject::mrkdwn(text)),
            fields: Vec::new(),
        }
    }
}
