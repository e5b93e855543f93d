//! Shared utility helpers.

/// Case-insensitive starts_with check without allocating.
#[inline]
pub fn starts_with_ci(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

/// True for ASCII letters, digits and underscore (the `\w` class on ASCII).
///
/// Non-ASCII bytes count as non-word, so a keyword next to a multi-byte
/// character is still considered bounded.
#[inline]
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Case-insensitive check that `keyword` starts `text` as a whole word.
#[inline]
pub fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    starts_with_ci(text, keyword)
        && text
            .as_bytes()
            .get(keyword.len())
            .map_or(true, |&b| !is_word_byte(b))
}

/// Canonical comparison form: whitespace runs collapsed to one space,
/// trimmed, and lower-cased.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Collapse whitespace runs to one space without changing case.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
