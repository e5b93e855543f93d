//! Statement boundary detection for CREATE statements
//!
//! SQL Server scripts group statements into batches separated by a line
//! holding only `GO` (optionally `GO;`). Oracle scripts have no such line
//! and rely on `;` terminators and BEGIN/END blocks.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::block::match_block_end;
use super::scanner::{find_terminator, QuotePolicy};
use crate::model::RoutineKind;

/// A line holding only the batch separator
static BATCH_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*GO[ \t]*;?[ \t]*\r?$").unwrap());

/// Whitespace up to the end of the current line, blank lines, then a separator line
static FOLLOWING_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\A[ \t]*\r?\n(?:[ \t]*\r?\n)*[ \t]*GO[ \t]*;?[ \t]*(?:\r?\n|\z)").unwrap()
});

/// A separator line closing the statement text
static TRAILING_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\A|\n)[ \t]*GO[ \t]*;?\s*\z").unwrap());

static BEGIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bBEGIN\b").unwrap());

/// Kind of CREATE statement being segmented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Table,
    View,
    Index,
    Procedure,
    Function,
    Trigger,
}

impl StatementKind {
    /// Whether the statement body is a BEGIN/END block
    fn has_block_body(self) -> bool {
        matches!(
            self,
            StatementKind::Procedure | StatementKind::Function | StatementKind::Trigger
        )
    }
}

impl From<RoutineKind> for StatementKind {
    fn from(kind: RoutineKind) -> Self {
        match kind {
            RoutineKind::Procedure => StatementKind::Procedure,
            RoutineKind::Function => StatementKind::Function,
            RoutineKind::View => StatementKind::View,
            RoutineKind::Trigger => StatementKind::Trigger,
        }
    }
}

/// Span of the first batch-separator line at or after `from`
pub fn find_batch_separator(text: &str, from: usize) -> Option<Range<usize>> {
    BATCH_SEPARATOR_RE.find_at(text, from).map(|m| m.range())
}

/// Remove a batch-separator line that ends `statement`, then trim.
pub fn strip_trailing_separator(statement: &str) -> &str {
    let trimmed = statement.trim();
    match TRAILING_SEPARATOR_RE.find(trimmed) {
        Some(m) => trimmed[..m.start()].trim(),
        None => trimmed,
    }
}

/// Exclusive end offset of the statement of `kind` starting at `start`.
///
/// Block-bodied statements end after the END balancing their first BEGIN
/// (plus an immediately following separator line); without a usable BEGIN
/// they end at the next separator line. Everything else ends at a separator
/// line that comes before the next top-level `;`, else just after that `;`,
/// else at end of input.
pub fn find_statement_end(
    text: &str,
    start: usize,
    kind: StatementKind,
    policy: QuotePolicy,
) -> usize {
    let separator = find_batch_separator(text, start);

    if kind.has_block_body() {
        // A BEGIN in a later batch belongs to a later statement.
        let search_end = separator.as_ref().map_or(text.len(), |s| s.start);
        if let Some(begin) = BEGIN_RE.find(&text[start..search_end]) {
            if let Some(end) = match_block_end(text, start + begin.start(), policy) {
                return match FOLLOWING_SEPARATOR_RE.find(&text[end..]) {
                    Some(m) => end + m.end(),
                    None => end,
                };
            }
        }
        if let Some(separator) = &separator {
            return separator.end;
        }
    }

    match (separator, find_terminator(text, start, policy)) {
        (Some(separator), Some(terminator)) if separator.start < terminator => separator.end,
        (_, Some(terminator)) => terminator + 1,
        (Some(separator), None) => separator.end,
        (None, None) => text.len(),
    }
}
