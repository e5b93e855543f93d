//! SQL dialect families and script classification
//!
//! Two families are supported: an Oracle-like PL/SQL dialect and a
//! T-SQL-like SQL Server dialect. Classification is purely token based;
//! nothing is parsed.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::SqlSyncError;

/// Tokens characteristic of Oracle scripts (matched against lower-cased text)
const ORACLE_MARKERS: &[&str] = &[
    "varchar2", "number(", "sysdate", "dual", "nvarchar2", "rownum", "to_char(", "nvl(",
    "decode(",
];

/// Tokens characteristic of SQL Server scripts (matched against lower-cased text)
const SQLSERVER_MARKERS: &[&str] = &[
    "identity",
    "varchar(max)",
    "getdate()",
    "nvarchar(",
    "select top",
    "isnull(",
    "dbo.",
    "nolock",
    "with (nolock)",
];

/// A line holding nothing but `go` (detection only; no trailing terminator)
static GO_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*go\s*$").unwrap());

/// A supported SQL dialect family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Oracle-like PL/SQL
    Oracle,
    /// Transact-SQL (SQL Server)
    #[default]
    SqlServer,
}

impl Dialect {
    /// Lower-case tag used on the command line
    pub fn tag(self) -> &'static str {
        match self {
            Dialect::Oracle => "oracle",
            Dialect::SqlServer => "sqlserver",
        }
    }

    /// Line that ends a statement group in generated scripts
    pub fn batch_separator(self) -> &'static str {
        match self {
            Dialect::Oracle => "/",
            Dialect::SqlServer => "GO",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag().to_uppercase())
    }
}

impl FromStr for Dialect {
    type Err = SqlSyncError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "oracle" | "plsql" => Ok(Dialect::Oracle),
            "sqlserver" | "mssql" | "tsql" => Ok(Dialect::SqlServer),
            _ => Err(SqlSyncError::UnknownDialect {
                name: name.to_string(),
            }),
        }
    }
}

/// Classify a script by its characteristic tokens.
///
/// Oracle markers are checked first, so a script carrying markers of both
/// families is reported as Oracle. Without any marker, a `GO` line means
/// SQL Server and `CREATE OR REPLACE` means Oracle; anything else
/// (including empty input) defaults to SQL Server.
pub fn detect_dialect(sql: &str) -> Dialect {
    let lower = sql.to_lowercase();

    if ORACLE_MARKERS.iter().any(|m| lower.contains(m)) {
        return Dialect::Oracle;
    }
    if SQLSERVER_MARKERS.iter().any(|m| lower.contains(m)) {
        return Dialect::SqlServer;
    }
    if GO_LINE_RE.is_match(&lower) {
        return Dialect::SqlServer;
    }
    if lower.contains("create or replace") {
        return Dialect::Oracle;
    }
    Dialect::SqlServer
}
