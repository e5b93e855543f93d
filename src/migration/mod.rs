//! Migration script generation
//!
//! The script brings schema B (the target) in line with schema A (the
//! source). It is written in B's dialect and is only ever text: nothing is
//! executed or validated. Sections always appear in the same order:
//!
//! 1. tables of A missing from B
//! 2. added and retyped columns of shared tables
//! 3. indexes
//! 4. procedures
//! 5. functions
//! 6. views
//! 7. triggers
//! 8. INSERT data

mod syntax;

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::compare::{diff, DiffStatus, DiffTarget};
use crate::dialect::Dialect;
use crate::model::{RoutineKind, Schema};

pub use syntax::{add_column, alter_column_type, column_definition, drop_index, drop_routine};

const RULE: &str = "-- ============================================================";

/// Tallies of what the script does, per section group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    pub tables_created: usize,
    pub columns_changed: usize,
    /// Indexes created or recreated
    pub indexes_changed: usize,
    pub indexes_dropped: usize,
    /// Routines created or replaced
    pub routines_changed: usize,
    pub routines_dropped: usize,
    pub insert_rows: usize,
}

impl MigrationSummary {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for MigrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tables created, {} columns changed, {} indexes changed, {} indexes dropped, \
             {} routines changed, {} routines dropped, {} rows to insert",
            self.tables_created,
            self.columns_changed,
            self.indexes_changed,
            self.indexes_dropped,
            self.routines_changed,
            self.routines_dropped,
            self.insert_rows
        )
    }
}

/// Generated script text together with its tallies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    pub text: String,
    pub summary: MigrationSummary,
}

/// Generate the A → B migration script as text.
///
/// Output depends only on the arguments, so the same inputs always give
/// the same script.
pub fn generate_migration(
    a: &Schema,
    b: &Schema,
    dialect_a: Dialect,
    dialect_b: Dialect,
) -> String {
    generate_migration_script(a, b, dialect_a, dialect_b, None).text
}

/// Generate the script and its summary; `generated_at` adds a timestamp line
/// to the header.
pub fn generate_migration_script(
    a: &Schema,
    b: &Schema,
    dialect_a: Dialect,
    dialect_b: Dialect,
    generated_at: Option<DateTime<Utc>>,
) -> MigrationScript {
    let mut writer = ScriptWriter::new(a, b, dialect_b);

    writer.header(dialect_a, generated_at);
    writer.create_tables();
    writer.alter_columns();
    writer.sync_indexes();
    for (number, kind) in (4..).zip(RoutineKind::ALL) {
        writer.sync_routines(number, kind);
    }
    writer.sync_data();
    writer.footer();

    MigrationScript {
        text: writer.lines.join("\n") + "\n",
        summary: writer.summary,
    }
}

/// Accumulates script lines for one A → B pair
struct ScriptWriter<'s> {
    a: &'s Schema,
    b: &'s Schema,
    target: Dialect,
    lines: Vec<String>,
    summary: MigrationSummary,
}

impl<'s> ScriptWriter<'s> {
    fn new(a: &'s Schema, b: &'s Schema, target: Dialect) -> Self {
        Self {
            a,
            b,
            target,
            lines: Vec::new(),
            summary: MigrationSummary::default(),
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn separator(&mut self) {
        self.push(self.target.batch_separator());
    }

    fn blank(&mut self) {
        self.push("");
    }

    fn banner(&mut self, title: &str) {
        self.push(RULE);
        self.push(format!("-- {}", title));
        self.push(RULE);
        self.blank();
    }

    fn header(&mut self, source: Dialect, generated_at: Option<DateTime<Utc>>) {
        self.push(RULE);
        self.push("-- MIGRATION SCRIPT: A --> B");
        self.push(RULE);
        if let Some(timestamp) = generated_at {
            self.push(format!(
                "-- Generated: {}",
                timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
        self.push(format!("-- Source dialect (A): {}", source));
        self.push(format!("-- Target dialect (B): {}", self.target));
        self.push(RULE);
        self.blank();
    }

    fn create_tables(&mut self) {
        self.banner("SECTION 1: CREATE MISSING TABLES");
        let (a, b) = (self.a, self.b);

        for (name, table) in a.tables() {
            if diff(DiffTarget::Table(name), a, b) != DiffStatus::Missing {
                continue;
            }
            self.push(format!("-- Create table: {}", name));
            self.push(table.raw.as_str());
            self.separator();
            self.blank();
            self.summary.tables_created += 1;
        }

        if self.summary.tables_created == 0 {
            self.push("-- No new tables to create");
            self.blank();
        }
    }

    fn alter_columns(&mut self) {
        self.banner("SECTION 2: ALTER EXISTING TABLES (COLUMNS)");
        let (a, b) = (self.a, self.b);

        for (name, table) in a.tables() {
            let Some(target_table) = b.table(name) else {
                continue;
            };
            for column in &table.columns {
                let status = diff(
                    DiffTarget::Column {
                        table: name,
                        column: &column.name,
                    },
                    a,
                    b,
                );
                match status {
                    DiffStatus::Same => continue,
                    DiffStatus::Missing => {
                        self.push(format!("-- Add column {} to table {}", column.name, name));
                        self.push(add_column(self.target, name, column));
                    }
                    DiffStatus::Different => {
                        let old_type = target_table
                            .column(&column.name)
                            .map_or("", |c| c.data_type.as_str());
                        self.push(format!(
                            "-- Change type of column {} in {}: {} -> {}",
                            column.name, name, old_type, column.data_type
                        ));
                        self.push(alter_column_type(self.target, name, column));
                    }
                }
                self.separator();
                self.blank();
                self.summary.columns_changed += 1;
            }
        }

        if self.summary.columns_changed == 0 {
            self.push("-- No columns to add or modify");
            self.blank();
        }
    }

    fn sync_indexes(&mut self) {
        self.banner("SECTION 3: INDEXES");
        let (a, b) = (self.a, self.b);

        for (name, index) in a.indexes() {
            match diff(DiffTarget::Index(name), a, b) {
                DiffStatus::Same => continue,
                DiffStatus::Missing => {
                    self.push(format!("-- Create missing index: {}", name));
                }
                DiffStatus::Different => {
                    self.push(format!("-- Recreate changed index: {}", name));
                    self.push(drop_index(self.target, name, index.table.as_deref()));
                    self.separator();
                }
            }
            self.push(index.raw.as_str());
            self.separator();
            self.blank();
            self.summary.indexes_changed += 1;
        }

        for (name, index) in b.indexes() {
            if a.index(name).is_some() {
                continue;
            }
            self.push(format!("-- Drop obsolete index: {}", name));
            self.push(drop_index(self.target, name, index.table.as_deref()));
            self.separator();
            self.blank();
            self.summary.indexes_dropped += 1;
        }

        if self.summary.indexes_changed == 0 && self.summary.indexes_dropped == 0 {
            self.push("-- No index changes");
            self.blank();
        }
    }

    fn sync_routines(&mut self, number: usize, kind: RoutineKind) {
        let title = match kind {
            RoutineKind::Procedure => "STORED PROCEDURES",
            RoutineKind::Function => "FUNCTIONS",
            RoutineKind::View => "VIEWS",
            RoutineKind::Trigger => "TRIGGERS",
        };
        self.banner(&format!("SECTION {}: {}", number, title));
        let (a, b) = (self.a, self.b);

        let keyword = kind.keyword();
        let mut changes = 0;

        for (key, routine) in a.routines(kind) {
            match diff(DiffTarget::routine(kind, key), a, b) {
                DiffStatus::Same => continue,
                DiffStatus::Missing => {
                    self.push(format!("-- Create {}: {}", keyword, key));
                }
                DiffStatus::Different => {
                    self.push(format!("-- Replace changed {}: {}", keyword, key));
                    // Only named keys can compare as different
                    let name = key.name().unwrap_or_default();
                    for line in drop_routine(self.target, kind, name) {
                        self.push(line);
                    }
                }
            }
            self.push(routine.raw.as_str());
            self.separator();
            self.blank();
            changes += 1;
            self.summary.routines_changed += 1;
        }

        for key in b.routines(kind).keys() {
            match key.name() {
                Some(name) if a.routine(kind, key).is_none() => {
                    self.push(format!("-- Drop obsolete {}: {}", keyword, name));
                    for line in drop_routine(self.target, kind, name) {
                        self.push(line);
                    }
                    self.summary.routines_dropped += 1;
                }
                Some(_) => continue,
                None => {
                    self.push(format!(
                        "-- {} {} in target has no recoverable name; not dropped",
                        keyword, key
                    ));
                }
            }
            self.blank();
            changes += 1;
        }

        if changes == 0 {
            self.push(format!("-- No {} changes", keyword));
            self.blank();
        }
    }

    fn sync_data(&mut self) {
        self.banner("SECTION 8: DATA (INSERTS)");
        let (a, b) = (self.a, self.b);

        for (table, rows) in a.inserts() {
            let pending: Vec<&str> = match b.insert_rows(table) {
                None => {
                    self.push(format!("-- Insert rows into table {}", table));
                    rows.iter().map(|r| r.raw.as_str()).collect()
                }
                Some(existing) => {
                    let existing: HashSet<String> =
                        existing.iter().map(|r| r.canonical()).collect();
                    let missing: Vec<&str> = rows
                        .iter()
                        .filter(|r| !existing.contains(&r.canonical()))
                        .map(|r| r.raw.as_str())
                        .collect();
                    if missing.is_empty() {
                        continue;
                    }
                    self.push(format!("-- Insert missing rows into table {}", table));
                    missing
                }
            };

            self.summary.insert_rows += pending.len();
            for raw in pending {
                self.push(raw);
            }
            self.separator();
            self.blank();
        }

        if self.summary.insert_rows == 0 {
            self.push("-- No new data to insert");
            self.blank();
        }
    }

    fn footer(&mut self) {
        let summary = self.summary;
        self.push(RULE);
        self.push("-- END OF MIGRATION SCRIPT");
        self.push(RULE);
        self.push(format!("-- Tables created: {}", summary.tables_created));
        self.push(format!("-- Columns added/modified: {}", summary.columns_changed));
        self.push(format!(
            "-- Indexes processed: {} ({} dropped)",
            summary.indexes_changed, summary.indexes_dropped
        ));
        self.push(format!(
            "-- Routines processed: {} ({} dropped)",
            summary.routines_changed, summary.routines_dropped
        ));
        self.push(format!("-- Rows to insert: {}", summary.insert_rows));
        self.push(RULE);
    }
}
