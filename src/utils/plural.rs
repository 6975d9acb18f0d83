//! Count formatting for log and error messages.

/// English plural of `noun` for `count`.
///
/// Handles the regular `-s` suffix plus the consonant `-y -> -ies` and
/// sibilant `-es` forms ("entry" -> "entries", "alias" -> "aliases").
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        return noun.to_owned();
    }
    if let Some(stem) = noun.strip_suffix('y')
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
    {
        return format!("{stem}ies");
    }
    if noun.ends_with(['s', 'x', 'z']) || noun.ends_with("ch") || noun.ends_with("sh") {
        return format!("{noun}es");
    }
    format!("{noun}s")
}

/// `"3 nodes"`, `"1 alias"`, `"0 entries"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {}", pluralize(count, noun))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "node"), "0 nodes");
        assert_eq!(plural_count(1, "node"), "1 node");
        assert_eq!(plural_count(2, "alias"), "2 aliases");
        assert_eq!(plural_count(4, "entry"), "4 entries");
        assert_eq!(plural_count(2, "key"), "2 keys");
    }
}
