//! CREATE INDEX extraction
//!
//! ## Supported Syntax
//!
//! ```sql
//! CREATE [UNIQUE] [CLUSTERED | NONCLUSTERED] INDEX [name] ON [schema].[table] (columns)
//! CREATE NONCLUSTERED INDEX [IX_Name] ON [dbo].[Table] ([Col1], [Col2] DESC)
//! CREATE UNIQUE INDEX ux_emp_email ON hr.employees (email);
//! ```
//!
//! Anything after the column list (INCLUDE, WHERE, WITH, TABLESPACE) is kept
//! in the raw text only.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::identifier_utils::{normalize_object_name, parse_column_list};
use super::scanner::MatchSpans;
use super::segmenter::{find_statement_end, strip_trailing_separator, StatementKind};
use super::ParseOptions;
use crate::model::Index;

static CREATE_INDEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)create\s+(unique\s+)?(clustered\s+|nonclustered\s+)?index\s+").unwrap()
});

static INDEX_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)create\s+(?:unique\s+)?(?:clustered\s+|nonclustered\s+)?index\s+([`"\[\]\w.]+)"#,
    )
    .unwrap()
});

/// Table named after the first bare ON
static INDEX_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bon\s+([`"\[\]\w.]+)"#).unwrap());

static INDEX_COLUMNS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bon\s+[`"\[\]\w.]+\s*\(([^)]+)\)"#).unwrap());

static UNIQUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bunique\b").unwrap());
static CLUSTERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bclustered\b").unwrap());
static NONCLUSTERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnonclustered\b").unwrap());

/// Extract every named index in `text`; statements whose name cannot be read
/// are skipped.
pub fn parse_indexes(text: &str, options: &ParseOptions) -> BTreeMap<String, Index> {
    let mut indexes = BTreeMap::new();

    for found in MatchSpans::new(&CREATE_INDEX_RE, text) {
        let end = find_statement_end(text, found.start, StatementKind::Index, options.quotes);
        let raw = strip_trailing_separator(&text[found.start..end]);

        match parse_index_statement(raw) {
            Some(index) => {
                indexes.insert(index.name.clone(), index);
            }
            None => debug!(offset = found.start, "CREATE INDEX without a readable name"),
        }
    }

    indexes
}

/// Parse one complete CREATE INDEX statement
pub fn parse_index_statement(statement: &str) -> Option<Index> {
    let name = normalize_object_name(INDEX_NAME_RE.captures(statement)?.get(1)?.as_str());
    if name.is_empty() {
        return None;
    }

    let table = INDEX_TABLE_RE
        .captures(statement)
        .map(|caps| normalize_object_name(&caps[1]));
    let columns = INDEX_COLUMNS_RE
        .captures(statement)
        .map(|caps| parse_column_list(&caps[1]))
        .unwrap_or_default();

    Some(Index {
        name,
        is_unique: UNIQUE_RE.is_match(statement),
        is_clustered: CLUSTERED_RE.is_match(statement),
        is_nonclustered: NONCLUSTERED_RE.is_match(statement),
        table,
        columns,
        raw: statement.to_string(),
    })
}
