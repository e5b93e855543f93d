//! Schema model representation

use std::collections::BTreeMap;
use std::fmt;

use super::{Index, InsertRow, ObjectKey, Routine, RoutineKind, Table};

/// The structural model of one SQL script.
///
/// Built once by [`crate::parser::parse`]; read-only afterwards. Maps are
/// ordered by name so every traversal is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    tables: BTreeMap<String, Table>,
    indexes: BTreeMap<String, Index>,
    procedures: BTreeMap<ObjectKey, Routine>,
    functions: BTreeMap<ObjectKey, Routine>,
    views: BTreeMap<ObjectKey, Routine>,
    triggers: BTreeMap<ObjectKey, Routine>,
    inserts: BTreeMap<String, Vec<InsertRow>>,
}

impl Schema {
    pub(crate) fn new(
        tables: BTreeMap<String, Table>,
        indexes: BTreeMap<String, Index>,
        routines: Vec<Routine>,
        inserts: BTreeMap<String, Vec<InsertRow>>,
    ) -> Self {
        let mut schema = Self {
            tables,
            indexes,
            inserts,
            ..Self::default()
        };
        for routine in routines {
            schema
                .routines_mut(routine.kind)
                .insert(routine.key.clone(), routine);
        }
        schema
    }

    fn routines_mut(&mut self, kind: RoutineKind) -> &mut BTreeMap<ObjectKey, Routine> {
        match kind {
            RoutineKind::Procedure => &mut self.procedures,
            RoutineKind::Function => &mut self.functions,
            RoutineKind::View => &mut self.views,
            RoutineKind::Trigger => &mut self.triggers,
        }
    }

    pub fn tables(&self) -> &BTreeMap<String, Table> {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn indexes(&self) -> &BTreeMap<String, Index> {
        &self.indexes
    }

    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.get(name)
    }

    pub fn routines(&self, kind: RoutineKind) -> &BTreeMap<ObjectKey, Routine> {
        match kind {
            RoutineKind::Procedure => &self.procedures,
            RoutineKind::Function => &self.functions,
            RoutineKind::View => &self.views,
            RoutineKind::Trigger => &self.triggers,
        }
    }

    pub fn routine(&self, kind: RoutineKind, key: &ObjectKey) -> Option<&Routine> {
        self.routines(kind).get(key)
    }

    pub fn inserts(&self) -> &BTreeMap<String, Vec<InsertRow>> {
        &self.inserts
    }

    /// Rows for `table`, `None` when the script has no INSERT for it
    pub fn insert_rows(&self, table: &str) -> Option<&[InsertRow]> {
        self.inserts.get(table).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.summary().total_objects() == 0
    }

    pub fn summary(&self) -> SchemaSummary {
        SchemaSummary {
            tables: self.tables.len(),
            procedures: self.procedures.len(),
            functions: self.functions.len(),
            views: self.views.len(),
            triggers: self.triggers.len(),
            indexes: self.indexes.len(),
            insert_rows: self.inserts.values().map(Vec::len).sum(),
        }
    }
}

/// Object counts for one schema
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemaSummary {
    pub tables: usize,
    pub procedures: usize,
    pub functions: usize,
    pub views: usize,
    pub triggers: usize,
    pub indexes: usize,
    pub insert_rows: usize,
}

impl SchemaSummary {
    pub fn total_objects(&self) -> usize {
        self.tables
            + self.procedures
            + self.functions
            + self.views
            + self.triggers
            + self.indexes
            + self.insert_rows
    }
}

impl fmt::Display for SchemaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tables · {} procs · {} funcs · {} views · {} triggers · {} indexes · {} inserts",
            self.tables,
            self.procedures,
            self.functions,
            self.views,
            self.triggers,
            self.indexes,
            self.insert_rows
        )
    }
}
