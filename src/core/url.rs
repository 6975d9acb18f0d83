//! Request path type for resolution.
//!
//! - Internal representation: always decoded (human-readable)
//! - Browser boundary: strip query/fragment and percent-decode once, then split

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use smallvec::SmallVec;

/// Non-empty path segments, borrowed from the decoded path.
///
/// Most request paths are shallow, so segments live inline.
pub type Segments<'a> = SmallVec<[&'a str; 8]>;

/// Split a decoded path on `/`, discarding empty segments.
///
/// This both trims leading/trailing slashes and collapses doubled slashes:
/// `"//en///about-us/"` -> `["en", "about-us"]`.
#[inline]
pub fn tokenize(decoded: &str) -> Segments<'_> {
    decoded.split('/').filter(|s| !s.is_empty()).collect()
}

/// Decoded request path.
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Never contains a query string or fragment when built from a request URI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestPath(Arc<str>);

impl RequestPath {
    /// Wrap an already-decoded path.
    pub fn from_decoded(decoded: &str) -> Self {
        Self(Arc::from(decoded))
    }

    /// Create from a raw request target (strip query/fragment, then decode).
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected, so a
    /// malformed request degrades into a lookup that finds nothing.
    pub fn from_request_uri(raw: &str) -> Self {
        let path = raw.split(['?', '#']).next().unwrap_or(raw);
        let decoded = percent_decode_str(path).decode_utf8_lossy();
        Self(Arc::from(decoded.as_ref()))
    }

    /// Get the decoded path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty path segments.
    #[inline]
    pub fn segments(&self) -> Segments<'_> {
        tokenize(&self.0)
    }

    /// Check if the path denotes the conceptual root (`""`, `/`, `//`...).
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.chars().all(|c| c == '/')
    }
}

impl std::fmt::Display for RequestPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RequestPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RequestPath {
    fn from(s: &str) -> Self {
        Self::from_decoded(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_discards_empty_segments() {
        assert_eq!(tokenize("/en/about-us/").as_slice(), ["en", "about-us"]);
        assert_eq!(tokenize("//en///about-us").as_slice(), ["en", "about-us"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("///").is_empty());
    }

    #[test]
    fn test_from_request_uri_decodes() {
        let path = RequestPath::from_request_uri("/fr/%C3%A0-propos?utm=1#top");
        assert_eq!(path.as_str(), "/fr/à-propos");
        assert_eq!(path.segments().as_slice(), ["fr", "à-propos"]);
    }

    #[test]
    fn test_from_request_uri_decodes_before_split() {
        // An encoded slash becomes a real separator after decoding
        let path = RequestPath::from_request_uri("/blog%2Fhello");
        assert_eq!(path.segments().as_slice(), ["blog", "hello"]);
    }

    #[test]
    fn test_from_request_uri_invalid_utf8_is_lossy() {
        let path = RequestPath::from_request_uri("/bad%FF");
        assert_eq!(path.segments().len(), 1);
        assert!(path.as_str().starts_with("/bad"));
    }

    #[test]
    fn test_is_root() {
        assert!(RequestPath::from_decoded("").is_root());
        assert!(RequestPath::from_decoded("/").is_root());
        assert!(RequestPath::from_decoded("//").is_root());
        assert!(!RequestPath::from_decoded("/en").is_root());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let path = RequestPath::from_request_uri("/en/about%20us");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"/en/about us\"");
    }
}
