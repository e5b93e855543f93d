//! Column definition parsing
//!
//! A column definition is `<name> <type> [options...]`. Only the pieces the
//! comparison needs are recognized: the type token, nullability, a handful of
//! flags and the DEFAULT value.
//!
//! ```sql
//! Id INT IDENTITY(1,1) PRIMARY KEY
//! [Name] [nvarchar](100) NOT NULL DEFAULT 'n/a'
//! "SALARY" NUMBER(10, 2) DEFAULT 0
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::identifier_utils::strip_quote_chars;
use crate::model::Column;
use crate::util::collapse_whitespace;

static COLUMN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)^\s*([`"\[\]\w]+)\s+(.+)$"#).unwrap());

/// Leading type identifier (optionally quoted) plus an optional `(...)` group
static TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[\["`]?(\w+)[\]"`]?(\s*\([^)]*\))?"#).unwrap());

static DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bdefault\s+('[^']*'|"[^"]*"|[^,\s]+)"#).unwrap()
});

/// Parse one column definition fragment (already trimmed).
///
/// Returns `None` when the fragment has no type part.
pub fn parse_column_definition(definition: &str) -> Option<Column> {
    let caps = COLUMN_RE.captures(definition)?;
    let name = strip_quote_chars(caps.get(1)?.as_str());
    let type_rest = collapse_whitespace(caps.get(2)?.as_str());
    let lower = collapse_whitespace(definition).to_lowercase();

    Some(Column {
        name,
        data_type: extract_type(&type_rest),
        nullable: !lower.contains("not null"),
        primary_key: lower.contains("primary key"),
        unique: lower.contains("unique"),
        identity: lower.contains("identity") || lower.contains("auto_increment"),
        default_value: extract_default(&type_rest),
        raw: definition.to_string(),
    })
}

/// Upper-cased type token such as `VARCHAR(50)` or `NUMBER(10, 2)`
pub fn extract_type(type_rest: &str) -> String {
    if let Some(caps) = TYPE_RE.captures(type_rest) {
        let base = caps.get(1).map_or("", |m| m.as_str());
        let precision = caps.get(2).map_or("", |m| m.as_str());
        return collapse_whitespace(&format!("{}{}", base, precision)).to_uppercase();
    }
    type_rest
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_uppercase()
}

/// Token following DEFAULT, with quoted literals kept whole
pub fn extract_default(type_rest: &str) -> Option<String> {
    DEFAULT_RE
        .captures(type_rest)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
