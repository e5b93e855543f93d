//! Procedure, function, view and trigger extraction
//!
//! Routines are kept as opaque text; only the statement boundary and the
//! object name are recognized.
//!
//! ```sql
//! CREATE OR ALTER PROCEDURE [dbo].[usp_GetUsers] AS BEGIN ... END
//! CREATE OR REPLACE FUNCTION get_total(p_id NUMBER) RETURN NUMBER IS BEGIN ... END;
//! CREATE VIEW dbo.ActiveUsers AS SELECT ...;
//! CREATE TRIGGER trg_audit ON Users AFTER INSERT AS BEGIN ... END
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::identifier_utils::strip_quote_chars;
use super::scanner::MatchSpans;
use super::segmenter::{find_statement_end, strip_trailing_separator};
use super::ParseOptions;
use crate::model::{ObjectKey, Routine, RoutineKind};

static PROCEDURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)create\s+(or\s+(?:replace|alter)\s+)?(procedure|proc)\s+").unwrap()
});
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)create\s+(or\s+(?:replace|alter)\s+)?function\s+").unwrap()
});
static VIEW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)create\s+(or\s+(?:replace|alter)\s+)?view\s+").unwrap());
static TRIGGER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)create\s+(or\s+(?:replace|alter)\s+)?trigger\s+").unwrap()
});

static PROCEDURE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| name_regex("proc(?:edure)?"));
static FUNCTION_NAME_RE: LazyLock<Regex> = LazyLock::new(|| name_regex("function"));
static VIEW_NAME_RE: LazyLock<Regex> = LazyLock::new(|| name_regex("view"));
static TRIGGER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| name_regex("trigger"));

/// Words after which the fallback scan expects the object name
static KIND_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)procedure|proc|function|view|trigger").unwrap());

fn name_regex(kind: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)create\s+(?:or\s+(?:replace|alter)\s+)?(?:{})\s+(?:if\s+not\s+exists\s+)?([\w\."`\[\]]+)"#,
        kind
    ))
    .unwrap()
}

fn create_regex(kind: RoutineKind) -> &'static Regex {
    match kind {
        RoutineKind::Procedure => &PROCEDURE_RE,
        RoutineKind::Function => &FUNCTION_RE,
        RoutineKind::View => &VIEW_RE,
        RoutineKind::Trigger => &TRIGGER_RE,
    }
}

fn name_pattern(kind: RoutineKind) -> &'static Regex {
    match kind {
        RoutineKind::Procedure => &PROCEDURE_NAME_RE,
        RoutineKind::Function => &FUNCTION_NAME_RE,
        RoutineKind::View => &VIEW_NAME_RE,
        RoutineKind::Trigger => &TRIGGER_NAME_RE,
    }
}

/// Extract every routine of every kind, procedures first.
///
/// `next_unnamed` supplies sequence numbers for routines whose name cannot
/// be recovered; it is advanced once per such routine.
pub fn parse_routines(text: &str, options: &ParseOptions, next_unnamed: &mut usize) -> Vec<Routine> {
    let mut routines = Vec::new();

    for kind in RoutineKind::ALL {
        // Each match resumes right after the CREATE keyword, so a CREATE
        // nested inside an earlier body is reported as well.
        for found in MatchSpans::new(create_regex(kind), text) {
            let end = find_statement_end(text, found.start, kind.into(), options.quotes);
            let raw = strip_trailing_separator(&text[found.start..end]);

            let key = match extract_routine_name(raw, kind) {
                Some(name) => ObjectKey::Named(name),
                None => {
                    let key = ObjectKey::Unnamed(*next_unnamed);
                    *next_unnamed += 1;
                    debug!(%kind, offset = found.start, "no name found, stored as {}", key);
                    key
                }
            };

            routines.push(Routine {
                key,
                kind,
                raw: raw.to_string(),
            });
        }
    }

    routines
}

/// Name of the routine declared by `statement`, schema prefix and quoting removed
pub fn extract_routine_name(statement: &str, kind: RoutineKind) -> Option<String> {
    if let Some(caps) = name_pattern(kind).captures(statement) {
        let name = last_segment(&strip_quote_chars(&caps[1]));
        if !name.is_empty() {
            return Some(name);
        }
    }

    // Fallback: the word after the first one mentioning a routine keyword
    let words: Vec<&str> = statement.split_whitespace().collect();
    let position = words.iter().position(|w| KIND_WORD_RE.is_match(w))?;
    let candidate = words.get(position + 1)?;
    let name = last_segment(&candidate.replace(['"', '`', '[', ']', '(', ')'], ""));
    (!name.is_empty()).then_some(name)
}

fn last_segment(name: &str) -> String {
    name.rsplit('.').next().unwrap_or_default().to_string()
}
