//! String buffer that tracks trailing newlines.
//!
//! Renderers separate lines and paragraphs without knowing what the previous
//! element wrote; [`LineWriter::ensure_line`] and [`LineWriter::ensure_par`]
//! add only the newlines that are missing.

#[derive(Debug, Default)]
pub struct LineWriter {
    buf: String,
    trailing_newlines: usize,
}

impl LineWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.buf.push_str(s);
        let trailing = s.len() - s.trim_end_matches('\n').len();
        if trailing == s.len() {
            self.trailing_newlines += trailing;
        } else {
            self.trailing_newlines = trailing;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Starts a new line unless the buffer is empty or already at one.
    pub fn ensure_line(&mut self) {
        if !self.buf.is_empty() && self.trailing_newlines == 0 {
            self.push_str("\n");
        }
    }

    /// Leaves exactly one blank line before the next write, unless the buffer
    /// is empty or already ends with one.
    pub fn ensure_par(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        match self.trailing_newlines {
            0 => self.push_str("\n\n"),
            1 => self.push_str("\n"),
            _ => {}
        }
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
