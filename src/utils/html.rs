//! Markup helpers for untrusted path segments.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// A tag, or an unterminated tag running to the end of input.
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*(?:>|$)").unwrap());

/// Remove markup tags from `s`.
///
/// Unterminated tags (`foo<script`) are dropped up to the end of the input.
/// Uses `Cow` to avoid allocation when `s` contains no `<`.
///
/// # Example
/// ```ignore
/// assert_eq!(strip_tags("<b>about</b>-us"), "about-us");
/// assert_eq!(strip_tags("about-us"), "about-us"); // No allocation
/// ```
pub fn strip_tags(s: &str) -> Cow<'_, str> {
    if !s.contains('<') {
        return Cow::Borrowed(s);
    }
    RE_TAG.replace_all(s, "")
}
