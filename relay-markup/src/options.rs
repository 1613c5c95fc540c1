//! Conversion knobs shared by every format.

/// Default cap on nesting depth for tokenizing, compiling and rendering.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Options controlling both conversion directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Deepest nesting the converters descend into. Deeper content is
    /// flattened to its plain text instead of recursing further.
    pub max_depth: usize,
    /// Number of `#` characters emitted for rendered header blocks.
    pub header_level: usize,
    /// Replace rich-text blocks with mrkdwn section blocks after compiling,
    /// for chat APIs that reject rich text on input.
    pub downconvert_rich_text: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            header_level: 2,
            downconvert_rich_text: false,
        }
    }
}

impl ConvertOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_header_level(mut self, header_level: usize) -> Self {
        self.header_level = header_level.clamp(1, 6);
        self
    }

    pub fn with_downconversion(mut self, downconvert: bool) -> Self {
        self.downconvert_rich_text = downconvert;
        self
    }

    /// Markdown prefix for header blocks, e.g. `"## "`.
    pub(crate) fn header_prefix(&self) -> String {
        format!("{} ", "#".repeat(self.header_level.clamp(1, 6)))
    }
}
