//! CREATE TABLE extraction
//!
//! ```sql
//! CREATE TABLE [dbo].[Users] (
//!     [Id] INT IDENTITY(1,1) NOT NULL,
//!     [Email] NVARCHAR(255) NOT NULL,
//!     CONSTRAINT [PK_Users] PRIMARY KEY CLUSTERED ([Id])
//! )
//! GO
//! CREATE TABLE IF NOT EXISTS hr.employees (id NUMBER(10), name VARCHAR2(100));
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::column_parser::parse_column_definition;
use super::constraint_parser::{is_table_constraint, parse_constraint};
use super::identifier_utils::normalize_object_name;
use super::scanner::{match_paren, split_top_level_commas, MatchSpans};
use super::segmenter::{find_statement_end, strip_trailing_separator, StatementKind};
use super::ParseOptions;
use crate::model::Table;

static CREATE_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcreate\s+table\b").unwrap());

static HEADER_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)create\s+table").unwrap());

static IF_NOT_EXISTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)if\s+not\s+exists").unwrap());

/// Extract every table in `text` (comments already stripped).
///
/// A later definition of the same table name replaces the earlier one.
pub fn parse_tables(text: &str, options: &ParseOptions) -> BTreeMap<String, Table> {
    let mut tables = BTreeMap::new();
    let mut spans = MatchSpans::new(&CREATE_TABLE_RE, text);

    while let Some(found) = spans.next() {
        let start = found.start;
        let Some(open) = text[found.end..].find('(').map(|i| found.end + i) else {
            debug!(offset = start, "CREATE TABLE without column list");
            continue;
        };

        let Some(close) = match_paren(text, open, options.quotes) else {
            debug!(offset = start, "CREATE TABLE with unbalanced column list");
            spans.seek(open + 1);
            continue;
        };

        let name = table_name_from_header(&text[start..open]);
        let end = find_statement_end(text, close + 1, StatementKind::Table, options.quotes);
        spans.seek(end);

        if name.is_empty() {
            debug!(offset = start, "CREATE TABLE without a name");
            continue;
        }

        let table = build_table(
            name,
            &text[open + 1..close],
            strip_trailing_separator(&text[start..end]),
        );
        tables.insert(table.name.clone(), table);
    }

    tables
}

/// Table name from the text between CREATE TABLE and the column list
fn table_name_from_header(header: &str) -> String {
    let header = HEADER_KEYWORD_RE.replace(header, "");
    let header = IF_NOT_EXISTS_RE.replace(&header, "");
    header
        .split_whitespace()
        .next()
        .map(normalize_object_name)
        .unwrap_or_default()
}

fn build_table(name: String, body: &str, raw: &str) -> Table {
    let mut table = Table {
        name,
        columns: Vec::new(),
        constraints: Vec::new(),
        raw: raw.to_string(),
    };

    for fragment in split_top_level_commas(body) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }

        if is_table_constraint(fragment) {
            table.constraints.push(parse_constraint(fragment));
            continue;
        }

        match parse_column_definition(fragment) {
            Some(column) => match table.columns.iter_mut().find(|c| c.name == column.name) {
                Some(existing) => *existing = column,
                None => table.columns.push(column),
            },
            None => debug!(table = %table.name, fragment, "unrecognized column definition"),
        }
    }

    table
}
