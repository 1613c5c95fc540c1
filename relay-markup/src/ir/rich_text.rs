//! Rich-text elements nested inside a rich-text block.
//!
//! Field and type names follow the chat platform's JSON so that blocks
//! received from it deserialize directly into these types.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Style flags of a rich-text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strike: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

impl Style {
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.strike || self.code)
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_strike(mut self) -> Self {
        self.strike = true;
        self
    }

    pub fn with_code(mut self) -> Self {
        self.code = true;
        self
    }
}

/// Leaf elements of a rich-text section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionElement {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Style::is_plain")]
        style: Style,
    },
    Link {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Style::is_plain")]
        style: Style,
    },
    Channel {
        channel_id: String,
        #[serde(default, skip_serializing_if = "Style::is_plain")]
        style: Style,
    },
    User {
        user_id: String,
        #[serde(default, skip_serializing_if = "Style::is_plain")]
        style: Style,
    },
    Team {
        team_id: String,
        #[serde(default, skip_serializing_if = "Style::is_plain")]
        style: Style,
    },
    Usergroup {
        usergroup_id: String,
    },
    Emoji {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unicode: Option<String>,
    },
    Broadcast {
        range: String,
    },
    Date {
        timestamp: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<String>,
    },
    Color {
        value: String,
    },
    #[serde(other)]
    Unknown,
}

impl SectionElement {
    pub fn text(text: impl Into<String>, style: Style) -> Self {
        SectionElement::Text {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::text(text, Style::default())
    }

    pub fn link(url: impl Into<String>, text: impl Into<String>, style: Style) -> Self {
        SectionElement::Link {
            url: url.into(),
            text: Some(text.into()),
            style,
        }
    }

    /// Unformatted text of the element: link text (or its url), raw ids,
    /// `:name:` for emoji.
    pub fn raw_text(&self) -> String {
        match self {
            SectionElement::Text { text, .. } => text.clone(),
            SectionElement::Link { url, text, .. } => text
                .clone()
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| url.clone()),
            SectionElement::Channel { channel_id, .. } => channel_id.clone(),
            SectionElement::User { user_id, .. } => user_id.clone(),
            SectionElement::Team { team_id, .. } => team_id.clone(),
            SectionElement::Usergroup { usergroup_id } => usergroup_id.clone(),
            SectionElement::Emoji { name, .. } => format!(":{name}:"),
            SectionElement::Broadcast { range } => range.clone(),
            SectionElement::Date { timestamp, .. } => timestamp.to_string(),
            SectionElement::Color { value } => value.clone(),
            SectionElement::Unknown => String::new(),
        }
    }
}

/// List marker style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStyle {
    Bullet,
    Ordered,
}

/// Elements of a rich-text block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RichTextElement {
    #[serde(rename = "rich_text_section")]
    Section { elements: Vec<SectionElement> },
    #[serde(rename = "rich_text_list")]
    List {
        style: ListStyle,
        elements: Vec<RichTextElement>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        indent: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<u32>,
    },
    #[serde(rename = "rich_text_quote")]
    Quote { elements: Vec<RichTextElement> },
    #[serde(rename = "rich_text_preformatted")]
    Preformatted { elements: Vec<SectionElement> },
    #[serde(rename = "unknown")]
    Unknown,
}

impl RichTextElement {
    pub fn section(elements: Vec<SectionElement>) -> Self {
        RichTextElement::Section { elements }
    }

    /// Preformatted element holding `raw` verbatim.
    pub fn preformatted(raw: impl Into<String>) -> Self {
        RichTextElement::Preformatted {
            elements: vec![SectionElement::plain(raw)],
        }
    }

    /// Raw text of the element and everything below it. Walks with an
    /// explicit stack, so arbitrarily deep input is safe.
    pub fn flat_text(&self) -> String {
        let mut text = String::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            match element {
                RichTextElement::Section { elements }
                | RichTextElement::Preformatted { elements } => {
                    for element in elements {
                        text.push_str(&element.raw_text());
                    }
                }
                RichTextElement::List { elements, .. } | RichTextElement::Quote { elements } => {
                    stack.extend(elements.iter().rev());
                }
                RichTextElement::Unknown => {}
            }
        }
        text
    }
}

/// Wire shape of the `rich_text_*` element types.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum WireElement {
    #[serde(rename = "rich_text_section")]
    Section {
        #[serde(default)]
        elements: Vec<SectionElement>,
    },
    #[serde(rename = "rich_text_list")]
    List {
        style: ListStyle,
        #[serde(default)]
        elements: Vec<RichTextElement>,
        #[serde(default)]
        indent: Option<u32>,
        #[serde(default)]
        offset: Option<u32>,
    },
    #[serde(rename = "rich_text_quote")]
    Quote {
        #[serde(default)]
        elements: Vec<RichTextElement>,
    },
    #[serde(rename = "rich_text_preformatted")]
    Preformatted {
        #[serde(default)]
        elements: Vec<SectionElement>,
    },
    #[serde(other)]
    Unknown,
}

impl From<WireElement> for RichTextElement {
    fn from(wire: WireElement) -> Self {
        match wire {
            WireElement::Section { elements } => RichTextElement::Section { elements },
            WireElement::List {
                style,
                elements,
                indent,
                offset,
            } => RichTextElement::List {
                style,
                elements,
                indent,
                offset,
            },
            WireElement::Quote { elements } => RichTextElement::Quote { elements },
            WireElement::Preformatted { elements } => RichTextElement::Preformatted { elements },
            WireElement::Unknown => RichTextElement::Unknown,
        }
    }
}

// Quotes authored in the chat client hold bare section elements rather than
// sections; each one is wrapped in a section so every container holds
// rich-text elements.
impl<'de> Deserialize<'de> for RichTextElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_container = match value.get("type").and_then(|kind| kind.as_str()) {
            Some(kind) => kind.starts_with("rich_text_"),
            None => return Err(de::Error::missing_field("type")),
        };

        if is_container {
            return WireElement::deserialize(value)
                .map(RichTextElement::from)
                .map_err(de::Error::custom);
        }

        match SectionElement::deserialize(value).map_err(de::Error::custom)? {
            SectionElement::Unknown => Ok(RichTextElement::Unknown),
            element => Ok(RichTextElement::Section {
                elements: vec![element],
            }),
        }
    }
}
