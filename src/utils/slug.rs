//! Node name slugification.
//!
//! Free text becomes a machine-safe name in four steps:
//!
//! 1. Transliterate to ASCII (`é` -> `e`, `ß` -> `ss`), which also drops
//!    combining marks.
//! 2. Lowercase.
//! 3. Collapse every run of non `[a-z0-9]` characters into one `-`.
//! 4. Trim separators from both ends.
//!
//! The transformation is idempotent: slugifying a slug returns it unchanged.

use deunicode::deunicode;

/// Separator placed between words.
pub const SEPARATOR: char = '-';

/// Slugify a human title into a node name.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("Ligula  $* _--Egestas Mattis Nullam"), "ligula-egestas-mattis-nullam");
/// assert_eq!(slugify("J'aime les sushis"), "j-aime-les-sushis");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            // Separators are only emitted between words, never leading
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Check whether `name` is already a valid slug.
#[inline]
pub fn is_slug(name: &str) -> bool {
    !name.is_empty() && slugify(name) == name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_punctuation_runs() {
        assert_eq!(
            slugify("Ligula  $* _--Egestas Mattis Nullam"),
            "ligula-egestas-mattis-nullam"
        );
    }

    #[test]
    fn test_slugify_apostrophe() {
        assert_eq!(slugify("J'aime les sushis"), "j-aime-les-sushis");
        assert_eq!(slugify("J’aime les sushis"), "j-aime-les-sushis");
    }

    #[test]
    fn test_slugify_idempotent() {
        let slug = "ligula-egestas-mattis-nullam";
        assert_eq!(slugify(slug), slug);

        for text in ["Crème Brûlée", "  À propos  ", "Straße 42", "a--b__c"] {
            let once = slugify(text);
            assert_eq!(slugify(&once), once, "not idempotent for {text:?}");
        }
    }

    #[test]
    fn test_slugify_strips_diacritics() {
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify("Ærøskøbing"), "aeroskobing");
        assert_eq!(slugify("Straße"), "strasse");
    }

    #[test]
    fn test_slugify_trims_separators() {
        assert_eq!(slugify("--hello--"), "hello");
        assert_eq!(slugify("  About us!  "), "about-us");
        assert_eq!(slugify("$$$"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_is_slug() {
        assert!(is_slug("about-us"));
        assert!(is_slug("page-2"));
        assert!(!is_slug("About-us"));
        assert!(!is_slug("about--us"));
        assert!(!is_slug("-about"));
        assert!(!is_slug(""));
    }
}
