//! Markdown special-character escaping.
//!
//! Every character of ``[ ] \ ` * _ { } ( ) # + . ! -`` gets a backslash in
//! front of it. Apply [`escape`] exactly once per leaf value; values passing
//! through several rendering layers must not be escaped again.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static ESCAPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\[\]\\`*_{}()#+.!-])").expect("escape pattern is valid"));

static UNESCAPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\([\[\]\\`*_{}()#+.!-])").expect("unescape pattern is valid"));

/// Backslash-escapes Markdown special characters.
pub fn escape(input: &str) -> Cow<'_, str> {
    ESCAPE_REGEX.replace_all(input, r"\$1")
}

/// Removes the backslashes added by [`escape`].
pub fn unescape(input: &str) -> Cow<'_, str> {
    UNESCAPE_REGEX.replace_all(input, "$1")
}
