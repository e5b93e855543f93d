//! Literal INSERT ... VALUES extraction
//!
//! Value groups are located with a plain `(...)` pattern that does not look
//! inside quotes, so a literal holding `)` cuts its group short. Rows are
//! stored re-serialized (see [`InsertRow::new`]) so layout differences in
//! the source never affect comparisons.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::identifier_utils::normalize_object_name;
use super::scanner::{split_top_level_commas, MatchSpans};
use crate::model::InsertRow;

static INSERT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)insert\s+into\s+([`"\[\]\w\.]+)\s*(\([^\)]*\))?\s*values\s*(?P<groups>\([^\)]*?\)(?:\s*,\s*\([^\)]*?\))*)\s*;?"#,
    )
    .unwrap()
});

static VALUE_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*?)\)").unwrap());

/// Extract INSERT rows grouped by normalized table name, in source order.
pub fn parse_inserts(text: &str) -> BTreeMap<String, Vec<InsertRow>> {
    let mut inserts: BTreeMap<String, Vec<InsertRow>> = BTreeMap::new();

    for span in MatchSpans::new(&INSERT_RE, text) {
        let Some(caps) = INSERT_RE.captures_at(text, span.start) else {
            continue;
        };

        let table = normalize_object_name(&caps[1]);
        let columns = caps.get(2).map(|m| column_names(m.as_str())).unwrap_or_default();
        let Some(groups) = caps.name("groups") else {
            continue;
        };

        let rows = inserts.entry(table.clone()).or_default();
        for group in VALUE_GROUP_RE.captures_iter(groups.as_str()) {
            let values = split_top_level_commas(group[1].trim())
                .into_iter()
                .map(|v| v.trim().to_string())
                .collect();
            rows.push(InsertRow::new(table.clone(), columns.clone(), values));
        }
    }

    inserts
}

/// Column names from a `(a, b, c)` list; quoting is kept as written
fn column_names(list: &str) -> Vec<String> {
    let compact: String = list
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
        .collect();
    compact
        .split(',')
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
