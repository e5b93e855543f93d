//! Cross-dialect type synonyms
//!
//! The table is intentionally small. A pair missing from it is reported as a
//! difference, which at worst emits an unnecessary type change.

/// How one side of a synonym pair matches a normalized type token
#[derive(Debug, Clone, Copy)]
enum TypePattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl TypePattern {
    fn matches(self, token: &str) -> bool {
        match self {
            TypePattern::Exact(name) => token == name,
            TypePattern::Prefix(prefix) => token.starts_with(prefix),
        }
    }
}

use TypePattern::{Exact, Prefix};

/// Synonym pairs; each pair is tried in both directions
const EQUIVALENT_TYPES: &[(TypePattern, TypePattern)] = &[
    (Prefix("VARCHAR"), Prefix("VARCHAR2")),
    (Prefix("NVARCHAR"), Prefix("NVARCHAR2")),
    (Exact("INT"), Exact("NUMBER")),
    (Exact("INTEGER"), Exact("INT")),
    (Exact("BIGINT"), Prefix("NUMBER")),
    (Exact("DATE"), Prefix("TIMESTAMP")),
    (Exact("DATETIME"), Prefix("TIMESTAMP")),
    (Exact("DATETIME2"), Prefix("TIMESTAMP")),
    (Exact("BIT"), Exact("BOOLEAN")),
    (Exact("TEXT"), Prefix("CLOB")),
    (Exact("IMAGE"), Prefix("BLOB")),
    (Exact("VARCHAR(MAX)"), Exact("CLOB")),
    (Exact("NVARCHAR(MAX)"), Exact("NCLOB")),
    (Exact("VARBINARY(MAX)"), Exact("BLOB")),
];

/// Whitespace removed and upper-cased
fn normalize_type(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Whether two column type tokens denote the same storage across dialects.
///
/// An empty token on either side is never equivalent to anything.
pub fn types_equivalent(a: &str, b: &str) -> bool {
    let a = normalize_type(a);
    let b = normalize_type(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    EQUIVALENT_TYPES.iter().any(|&(left, right)| {
        (left.matches(&a) && right.matches(&b)) || (right.matches(&a) && left.matches(&b))
    })
}
