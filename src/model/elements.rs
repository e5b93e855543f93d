//! Schema model element types

use std::fmt;

use crate::util::normalize_whitespace;

/// Identity of a routine within one parsed schema.
///
/// `Unnamed` is assigned when no name could be extracted; its sequence key
/// is stable for a given input but never matches anything in another schema.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKey {
    Named(String),
    Unnamed(usize),
}

impl ObjectKey {
    pub fn name(&self) -> Option<&str> {
        match self {
            ObjectKey::Named(name) => Some(name),
            ObjectKey::Unnamed(_) => None,
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKey::Named(name) => write!(f, "{}", name),
            ObjectKey::Unnamed(seq) => write!(f, "<unnamed #{}>", seq),
        }
    }
}

impl From<&str> for ObjectKey {
    fn from(name: &str) -> Self {
        ObjectKey::Named(name.to_string())
    }
}

/// Table element
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    /// Columns in declaration order; a repeated name replaces the earlier entry
    pub columns: Vec<Column>,
    pub constraints: Vec<Constraint>,
    /// Full CREATE TABLE statement as found in the script
    pub raw: String,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Column element
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Upper-cased type token, e.g. `VARCHAR(50)` or `NUMBER(10,2)`
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub identity: bool,
    pub default_value: Option<String>,
    /// Column definition text without the trailing comma
    pub raw: String,
}

/// Kind of a table-level constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
    Index,
    Unknown,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConstraintKind::PrimaryKey => "PRIMARY KEY",
            ConstraintKind::ForeignKey => "FOREIGN KEY",
            ConstraintKind::Unique => "UNIQUE",
            ConstraintKind::Check => "CHECK",
            ConstraintKind::Index => "INDEX",
            ConstraintKind::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

/// Table-level constraint element
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub references: Option<ForeignKeyReference>,
    pub raw: String,
}

/// Target of a FOREIGN KEY constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyReference {
    pub table: String,
    pub columns: Vec<String>,
}

/// Index element
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub name: String,
    pub is_unique: bool,
    pub is_clustered: bool,
    pub is_nonclustered: bool,
    /// Table named after the first bare `ON`
    pub table: Option<String>,
    /// Key columns with ASC/DESC stripped
    pub columns: Vec<String>,
    pub raw: String,
}

impl Index {
    /// Short description such as `UNIQUE NONCLUSTERED on Users`
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.is_unique {
            parts.push("UNIQUE".to_string());
        }
        if self.is_clustered {
            parts.push("CLUSTERED".to_string());
        }
        if self.is_nonclustered {
            parts.push("NONCLUSTERED".to_string());
        }
        if let Some(table) = &self.table {
            parts.push(format!("on {}", table));
        }
        parts.join(" ")
    }
}

/// Kind of a routine-like object stored as opaque text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutineKind {
    Procedure,
    Function,
    View,
    Trigger,
}

impl RoutineKind {
    pub const ALL: [RoutineKind; 4] = [
        RoutineKind::Procedure,
        RoutineKind::Function,
        RoutineKind::View,
        RoutineKind::Trigger,
    ];

    /// SQL keyword used in CREATE/DROP statements
    pub fn keyword(self) -> &'static str {
        match self {
            RoutineKind::Procedure => "PROCEDURE",
            RoutineKind::Function => "FUNCTION",
            RoutineKind::View => "VIEW",
            RoutineKind::Trigger => "TRIGGER",
        }
    }

    /// Object type code accepted by SQL Server's `OBJECT_ID`
    pub fn sqlserver_type_code(self) -> &'static str {
        match self {
            RoutineKind::Procedure => "P",
            RoutineKind::Function => "FN",
            RoutineKind::View => "V",
            RoutineKind::Trigger => "TR",
        }
    }
}

impl fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Procedure, function, view or trigger
#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub key: ObjectKey,
    pub kind: RoutineKind,
    /// Statement text with any trailing batch separator removed
    pub raw: String,
}

/// One row of literal INSERT data
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRow {
    pub table: String,
    /// Explicit column list, empty when the statement had none
    pub columns: Vec<String>,
    pub values: Vec<String>,
    /// Re-serialized single-row statement, e.g. `INSERT INTO T (a, b) VALUES (1, 2);`
    pub raw: String,
}

impl InsertRow {
    pub fn new(table: String, columns: Vec<String>, values: Vec<String>) -> Self {
        let column_list = if columns.is_empty() {
            String::new()
        } else {
            format!(" ({})", columns.join(", "))
        };
        let raw = format!(
            "INSERT INTO {}{} VALUES ({});",
            table,
            column_list,
            values.join(", ")
        );
        Self {
            table,
            columns,
            values,
            raw,
        }
    }

    /// Whitespace-collapsed, lower-cased form used for row matching
    pub fn canonical(&self) -> String {
        normalize_whitespace(&self.raw)
    }
}
