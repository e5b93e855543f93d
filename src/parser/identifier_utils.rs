//! Identifier handling shared by the object parsers.
//!
//! Both dialect families are accepted: `[bracketed]`, `"double-quoted"` and
//! `` `back-quoted` `` identifiers are reduced to their bare text, and
//! schema-qualified names keep only their last segment.
//!
//! # Examples
//!
//! ```ignore
//! assert_eq!(strip_quote_chars("[dbo].[Users]"), "dbo.Users");
//! assert_eq!(normalize_object_name("[dbo].[Users]"), "Users");
//! assert_eq!(normalize_object_name("HR.EMPLOYEES"), "EMPLOYEES");
//! ```

use std::sync::LazyLock;

use regex::Regex;

static SORT_DIRECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:asc|desc)$").unwrap());

/// Characters that quote identifiers in either dialect
const QUOTE_CHARS: [char; 4] = ['"', '`', '[', ']'];

/// Removes every identifier quote character from `ident`.
pub fn strip_quote_chars(ident: &str) -> String {
    ident.replace(QUOTE_CHARS, "")
}

/// Bare object name: quotes stripped, schema/owner prefixes dropped.
pub fn normalize_object_name(ident: &str) -> String {
    let stripped = strip_quote_chars(ident.trim());
    match stripped.rsplit_once('.') {
        Some((_, last)) => last.trim().to_string(),
        None => stripped.trim().to_string(),
    }
}

/// Splits a parenthesized column list body into bare column names.
///
/// Trailing `ASC`/`DESC` and quoting are removed; empty entries are dropped.
pub fn parse_column_list(columns: &str) -> Vec<String> {
    columns
        .split(',')
        .map(|col| strip_quote_chars(&SORT_DIRECTION_RE.replace(col.trim(), "")))
        .filter(|col| !col.is_empty())
        .collect()
}
