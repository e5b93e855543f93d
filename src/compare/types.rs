//! Core types for schema comparison

use std::fmt;

use crate::model::{ObjectKey, RoutineKind};

/// Outcome of comparing one entity against the other schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffStatus {
    Same,
    Different,
    /// Absent on the other side (or, for unnamed routines, never matchable)
    Missing,
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiffStatus::Same => "same",
            DiffStatus::Different => "different",
            DiffStatus::Missing => "missing",
        };
        write!(f, "{}", label)
    }
}

/// The entity a diff is asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTarget<'a> {
    Table(&'a str),
    Column { table: &'a str, column: &'a str },
    /// All INSERT rows of one table
    Insert(&'a str),
    Index(&'a str),
    Procedure(&'a ObjectKey),
    Function(&'a ObjectKey),
    View(&'a ObjectKey),
    Trigger(&'a ObjectKey),
}

impl<'a> DiffTarget<'a> {
    pub fn routine(kind: RoutineKind, key: &'a ObjectKey) -> Self {
        match kind {
            RoutineKind::Procedure => DiffTarget::Procedure(key),
            RoutineKind::Function => DiffTarget::Function(key),
            RoutineKind::View => DiffTarget::View(key),
            RoutineKind::Trigger => DiffTarget::Trigger(key),
        }
    }
}

/// Report category, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Tables,
    Columns,
    Indexes,
    Procedures,
    Functions,
    Views,
    Triggers,
    Inserts,
}

impl Category {
    pub fn for_routine(kind: RoutineKind) -> Self {
        match kind {
            RoutineKind::Procedure => Category::Procedures,
            RoutineKind::Function => Category::Functions,
            RoutineKind::View => Category::Views,
            RoutineKind::Trigger => Category::Triggers,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Tables => "Tables",
            Category::Columns => "Columns",
            Category::Indexes => "Indexes",
            Category::Procedures => "Procedures",
            Category::Functions => "Functions",
            Category::Views => "Views",
            Category::Triggers => "Triggers",
            Category::Inserts => "Inserts",
        };
        write!(f, "{}", label)
    }
}

/// One entity in the report with its status as seen from each schema.
///
/// A side is `None` when the entity does not exist in that schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityComparison {
    pub name: String,
    pub from_a: Option<DiffStatus>,
    pub from_b: Option<DiffStatus>,
}

impl EntityComparison {
    pub fn is_same(&self) -> bool {
        self.from_a == Some(DiffStatus::Same) && self.from_b == Some(DiffStatus::Same)
    }
}

/// Entities of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub category: Category,
    pub entries: Vec<EntityComparison>,
}

/// Result of comparing two schemas category by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareReport {
    pub sections: Vec<ReportSection>,
}

impl CompareReport {
    pub fn has_differences(&self) -> bool {
        self.sections
            .iter()
            .flat_map(|s| &s.entries)
            .any(|e| !e.is_same())
    }

    pub fn section(&self, category: Category) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// Status pair for a named entity in `category`
    pub fn entry(&self, category: Category, name: &str) -> Option<&EntityComparison> {
        self.section(category)?.entries.iter().find(|e| e.name == name)
    }
}
