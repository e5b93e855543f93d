//! Quote- and paren-aware scanning primitives
//!
//! Every higher-level parser locates object boundaries through these
//! helpers. They work on byte offsets: all delimiters are ASCII, so every
//! offset they return is a valid `str` boundary.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static BLOCK_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static DASH_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)--.*$").unwrap());
static HASH_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)#.*$").unwrap());

/// How quote characters inside string literals are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuotePolicy {
    /// A quote preceded by a backslash does not open or close a literal.
    #[default]
    BackslashEscapes,
    /// Every quote toggles literal mode (doubled quotes re-open immediately).
    Standard,
}

impl QuotePolicy {
    /// Whether the quote at `bytes[i]` toggles string mode
    #[inline]
    fn toggles(self, bytes: &[u8], i: usize) -> bool {
        match self {
            QuotePolicy::Standard => true,
            QuotePolicy::BackslashEscapes => i == 0 || bytes[i - 1] != b'\\',
        }
    }
}

/// Tracks whether the scan position is inside a single- or double-quoted span
#[derive(Debug, Default)]
pub(crate) struct QuoteState {
    single: bool,
    double: bool,
}

impl QuoteState {
    /// Feed the byte at `i`; returns true when it is quoted text or a quote
    /// delimiter, i.e. when the caller must not interpret it.
    #[inline]
    pub(crate) fn consume(&mut self, bytes: &[u8], i: usize, policy: QuotePolicy) -> bool {
        match bytes[i] {
            b'\'' if !self.double && policy.toggles(bytes, i) => {
                self.single = !self.single;
                true
            }
            b'"' if !self.single && policy.toggles(bytes, i) => {
                self.double = !self.double;
                true
            }
            _ => self.single || self.double,
        }
    }
}

/// Find the parenthesis closing the one at `open_index`.
///
/// Quoted spans are opaque to depth counting. Returns `None` if
/// `open_index` is not a `(` or the parenthesis is never balanced.
pub fn match_paren(text: &str, open_index: usize, policy: QuotePolicy) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open_index) != Some(&b'(') {
        return None;
    }

    let mut quotes = QuoteState::default();
    let mut depth = 0usize;
    for i in open_index..bytes.len() {
        if quotes.consume(bytes, i, policy) {
            continue;
        }
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on commas at parenthesis depth zero.
///
/// Single-, double- and back-quoted spans are opaque, as is a `[...]`
/// identifier (a plain toggle; brackets do not nest). Fragments are
/// returned untrimmed; a trailing empty fragment is dropped.
pub fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let (mut in_single, mut in_double, mut in_backtick, mut in_bracket) =
        (false, false, false, false);

    for (i, &b) in text.as_bytes().iter().enumerate() {
        match b {
            b'\'' if !in_double && !in_backtick && !in_bracket => in_single = !in_single,
            b'"' if !in_single && !in_backtick && !in_bracket => in_double = !in_double,
            b'`' if !in_single && !in_double && !in_bracket => in_backtick = !in_backtick,
            b'[' if !in_single && !in_double && !in_backtick => in_bracket = true,
            b']' if in_bracket => in_bracket = false,
            _ if in_single || in_double || in_backtick || in_bracket => {}
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
}

/// Offset of the first `;` at or after `from` that sits outside quotes and
/// parentheses.
pub fn find_terminator(text: &str, from: usize, policy: QuotePolicy) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut quotes = QuoteState::default();
    let mut depth = 0i32;
    for i in from..bytes.len() {
        if quotes.consume(bytes, i, policy) {
            continue;
        }
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b';' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Replace `/* */` blocks, `--` line comments and (optionally) `#` line
/// comments with a single space each.
pub fn strip_comments(sql: &str, hash_line_comments: bool) -> String {
    let without_blocks = BLOCK_COMMENT_RE.replace_all(sql, " ");
    let without_dashes = DASH_COMMENT_RE.replace_all(&without_blocks, " ");
    if hash_line_comments {
        HASH_COMMENT_RE.replace_all(&without_dashes, " ").into_owned()
    } else {
        without_dashes.into_owned()
    }
}

/// Lazy, restartable sequence of non-overlapping match spans.
///
/// The cursor belongs to the caller: it can be moved forward past a
/// consumed statement with [`MatchSpans::seek`], or reset with
/// [`MatchSpans::restart`].
#[derive(Debug, Clone)]
pub struct MatchSpans<'r, 't> {
    regex: &'r Regex,
    text: &'t str,
    cursor: usize,
}

impl<'r, 't> MatchSpans<'r, 't> {
    pub fn new(regex: &'r Regex, text: &'t str) -> Self {
        Self {
            regex,
            text,
            cursor: 0,
        }
    }

    /// Continue the search from `position` (clamped to the text length).
    pub fn seek(&mut self, position: usize) {
        let mut position = position.min(self.text.len());
        while !self.text.is_char_boundary(position) {
            position += 1;
        }
        self.cursor = position;
    }

    pub fn restart(&mut self) {
        self.cursor = 0;
    }
}

impl Iterator for MatchSpans<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor > self.text.len() {
            return None;
        }
        let found = self.regex.find_at(self.text, self.cursor)?;
        if found.is_empty() {
            // Step over the empty match so the scan always advances.
            let step = self.text[found.end()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor = found.end() + step;
        } else {
            self.cursor = found.end();
        }
        Some(found.range())
    }
}
