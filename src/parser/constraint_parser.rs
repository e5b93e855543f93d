//! Table-level constraint parsing
//!
//! ```sql
//! CONSTRAINT PK_Users PRIMARY KEY CLUSTERED (Id)
//! CONSTRAINT FK_Orders_Users FOREIGN KEY (UserId) REFERENCES dbo.Users (Id)
//! UNIQUE KEY uk_email (email)
//! CHECK (Price >= 0)
//! INDEX ix_name (name)
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::identifier_utils::{normalize_object_name, parse_column_list, strip_quote_chars};
use crate::model::{Constraint, ConstraintKind, ForeignKeyReference};
use crate::util::{collapse_whitespace, starts_with_keyword};

/// Leading keywords that mark a table-level constraint rather than a column
const CONSTRAINT_KEYWORDS: &[&str] = &[
    "constraint",
    "primary key",
    "unique",
    "foreign key",
    "check",
    "index",
    "key",
];

static CONSTRAINT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)constraint\s+([`"\[\]\w]+)"#).unwrap());

static PRIMARY_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)primary\s+key\s*(?:(?:non)?clustered\s*)?\(([^)]+)\)").unwrap()
});

static FOREIGN_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)foreign\s+key\s*\(([^)]+)\)\s*references\s+([`"\[\]\w.]+)\s*\(([^)]+)\)"#)
        .unwrap()
});

static UNIQUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)unique\s*(?:(?:non)?clustered\s*)?(?:key|index)?\s*(?:[`"\[\]\w]+)?\s*\(([^)]+)\)"#,
    )
    .unwrap()
});

static INDEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:index|key)\s+([`"\[\]\w]+)?\s*\(([^)]+)\)"#).unwrap()
});

/// Whether a table-body fragment starts with a constraint keyword
pub fn is_table_constraint(fragment: &str) -> bool {
    let collapsed = collapse_whitespace(fragment);
    CONSTRAINT_KEYWORDS
        .iter()
        .any(|keyword| starts_with_keyword(&collapsed, keyword))
}

/// Parse a table-level constraint fragment.
///
/// Never fails: an unrecognized fragment yields `ConstraintKind::Unknown`.
pub fn parse_constraint(definition: &str) -> Constraint {
    let lower = collapse_whitespace(definition).to_lowercase();

    let mut name = CONSTRAINT_NAME_RE
        .captures(definition)
        .and_then(|caps| caps.get(1))
        .map(|m| strip_quote_chars(m.as_str()));
    let mut columns = Vec::new();
    let mut references = None;

    let kind = if lower.contains("primary key") {
        if let Some(caps) = PRIMARY_KEY_RE.captures(definition) {
            columns = parse_column_list(&caps[1]);
        }
        ConstraintKind::PrimaryKey
    } else if lower.contains("foreign key") {
        if let Some(caps) = FOREIGN_KEY_RE.captures(definition) {
            columns = parse_column_list(&caps[1]);
            references = Some(ForeignKeyReference {
                table: normalize_object_name(&caps[2]),
                columns: parse_column_list(&caps[3]),
            });
        }
        ConstraintKind::ForeignKey
    } else if lower.contains("unique") {
        if let Some(caps) = UNIQUE_RE.captures(definition) {
            columns = parse_column_list(&caps[1]);
        }
        ConstraintKind::Unique
    } else if lower.contains("check") {
        ConstraintKind::Check
    } else if starts_with_keyword(&lower, "index") || starts_with_keyword(&lower, "key") {
        if let Some(caps) = INDEX_RE.captures(definition) {
            if let Some(index_name) = caps.get(1) {
                name = Some(strip_quote_chars(index_name.as_str()));
            }
            columns = parse_column_list(&caps[2]);
        }
        ConstraintKind::Index
    } else {
        ConstraintKind::Unknown
    };

    Constraint {
        kind,
        name,
        columns,
        references,
        raw: definition.to_string(),
    }
}
