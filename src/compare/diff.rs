//! Per-entity diffing between two schemas

use std::collections::{BTreeSet, HashSet};

use crate::model::{ObjectKey, RoutineKind, Schema};
use crate::util::normalize_whitespace;

use super::equivalence::types_equivalent;
use super::types::{Category, CompareReport, DiffStatus, DiffTarget, EntityComparison, ReportSection};

/// Status of `target` in `this` schema relative to `other`.
///
/// The check is one-directional: a table is `Different` when one of *its*
/// columns is absent or retyped in `other`; columns that only `other` has
/// are not considered. An entity absent from `this` is also `Missing`.
pub fn diff(target: DiffTarget<'_>, this: &Schema, other: &Schema) -> DiffStatus {
    match target {
        DiffTarget::Table(name) => diff_table(name, this, other),
        DiffTarget::Column { table, column } => diff_column(table, column, this, other),
        DiffTarget::Insert(table) => diff_inserts(table, this, other),
        DiffTarget::Index(name) => match (this.index(name), other.index(name)) {
            (Some(a), Some(b)) => compare_text(&a.raw, &b.raw),
            _ => DiffStatus::Missing,
        },
        DiffTarget::Procedure(key) => diff_routine(RoutineKind::Procedure, key, this, other),
        DiffTarget::Function(key) => diff_routine(RoutineKind::Function, key, this, other),
        DiffTarget::View(key) => diff_routine(RoutineKind::View, key, this, other),
        DiffTarget::Trigger(key) => diff_routine(RoutineKind::Trigger, key, this, other),
    }
}

fn diff_table(name: &str, this: &Schema, other: &Schema) -> DiffStatus {
    let (Some(table), Some(other_table)) = (this.table(name), other.table(name)) else {
        return DiffStatus::Missing;
    };
    let changed = table.columns.iter().any(|column| {
        other_table
            .column(&column.name)
            .map_or(true, |theirs| !types_equivalent(&column.data_type, &theirs.data_type))
    });
    if changed {
        DiffStatus::Different
    } else {
        DiffStatus::Same
    }
}

fn diff_column(table: &str, column: &str, this: &Schema, other: &Schema) -> DiffStatus {
    let ours = this.table(table).and_then(|t| t.column(column));
    let theirs = other.table(table).and_then(|t| t.column(column));
    match (ours, theirs) {
        (Some(a), Some(b)) if types_equivalent(&a.data_type, &b.data_type) => DiffStatus::Same,
        (Some(_), Some(_)) => DiffStatus::Different,
        _ => DiffStatus::Missing,
    }
}

/// Set membership on canonical row text; order and multiplicity are ignored
fn diff_inserts(table: &str, this: &Schema, other: &Schema) -> DiffStatus {
    let (Some(rows), Some(other_rows)) = (this.insert_rows(table), other.insert_rows(table)) else {
        return DiffStatus::Missing;
    };
    let theirs: HashSet<String> = other_rows.iter().map(|r| r.canonical()).collect();
    if rows.iter().all(|r| theirs.contains(&r.canonical())) {
        DiffStatus::Same
    } else {
        DiffStatus::Different
    }
}

fn diff_routine(kind: RoutineKind, key: &ObjectKey, this: &Schema, other: &Schema) -> DiffStatus {
    if key.name().is_none() {
        return DiffStatus::Missing;
    }
    match (this.routine(kind, key), other.routine(kind, key)) {
        (Some(a), Some(b)) => compare_text(&a.raw, &b.raw),
        _ => DiffStatus::Missing,
    }
}

/// Textual equality after whitespace collapse and case folding
fn compare_text(a: &str, b: &str) -> DiffStatus {
    if normalize_whitespace(a) == normalize_whitespace(b) {
        DiffStatus::Same
    } else {
        DiffStatus::Different
    }
}

/// Compare every entity of both schemas.
///
/// Each category lists the sorted union of names; unnamed routines are
/// listed per side after the named ones since they can never pair up.
pub fn compare_schemas(a: &Schema, b: &Schema) -> CompareReport {
    let mut sections = Vec::new();

    let tables = union(a.tables().keys(), b.tables().keys());
    sections.push(section(Category::Tables, &tables, a, b, DiffTarget::Table));

    let mut columns = Vec::new();
    for &table in &tables {
        let names: BTreeSet<&str> = [a.table(table), b.table(table)]
            .into_iter()
            .flatten()
            .flat_map(|t| t.columns.iter().map(|c| c.name.as_str()))
            .collect();
        for column in names {
            let target = DiffTarget::Column { table, column };
            columns.push(entity(format!("{}.{}", table, column), target, a, b));
        }
    }
    sections.push(ReportSection {
        category: Category::Columns,
        entries: columns,
    });

    let indexes = union(a.indexes().keys(), b.indexes().keys());
    sections.push(section(Category::Indexes, &indexes, a, b, DiffTarget::Index));

    for kind in RoutineKind::ALL {
        sections.push(routine_section(kind, a, b));
    }

    let inserts = union(a.inserts().keys(), b.inserts().keys());
    sections.push(section(Category::Inserts, &inserts, a, b, DiffTarget::Insert));

    CompareReport { sections }
}

fn union<'s>(
    a: impl Iterator<Item = &'s String>,
    b: impl Iterator<Item = &'s String>,
) -> BTreeSet<&'s str> {
    a.chain(b).map(String::as_str).collect()
}

/// Whether `target` exists in `schema`
fn exists(target: DiffTarget<'_>, schema: &Schema) -> bool {
    match target {
        DiffTarget::Table(name) => schema.table(name).is_some(),
        DiffTarget::Column { table, column } => {
            schema.table(table).and_then(|t| t.column(column)).is_some()
        }
        DiffTarget::Insert(table) => schema.insert_rows(table).is_some(),
        DiffTarget::Index(name) => schema.index(name).is_some(),
        DiffTarget::Procedure(key) => schema.routine(RoutineKind::Procedure, key).is_some(),
        DiffTarget::Function(key) => schema.routine(RoutineKind::Function, key).is_some(),
        DiffTarget::View(key) => schema.routine(RoutineKind::View, key).is_some(),
        DiffTarget::Trigger(key) => schema.routine(RoutineKind::Trigger, key).is_some(),
    }
}

fn entity(name: String, target: DiffTarget<'_>, a: &Schema, b: &Schema) -> EntityComparison {
    EntityComparison {
        name,
        from_a: exists(target, a).then(|| diff(target, a, b)),
        from_b: exists(target, b).then(|| diff(target, b, a)),
    }
}

fn section<'n>(
    category: Category,
    names: &BTreeSet<&'n str>,
    a: &Schema,
    b: &Schema,
    target: impl Fn(&'n str) -> DiffTarget<'n>,
) -> ReportSection {
    ReportSection {
        category,
        entries: names
            .iter()
            .map(|&name| entity(name.to_string(), target(name), a, b))
            .collect(),
    }
}

fn routine_section(kind: RoutineKind, a: &Schema, b: &Schema) -> ReportSection {
    let named: BTreeSet<&ObjectKey> = a
        .routines(kind)
        .keys()
        .chain(b.routines(kind).keys())
        .filter(|key| key.name().is_some())
        .collect();

    let mut entries: Vec<EntityComparison> = named
        .into_iter()
        .map(|key| entity(key.to_string(), DiffTarget::routine(kind, key), a, b))
        .collect();

    for key in a.routines(kind).keys().filter(|k| k.name().is_none()) {
        entries.push(EntityComparison {
            name: key.to_string(),
            from_a: Some(DiffStatus::Missing),
            from_b: None,
        });
    }
    for key in b.routines(kind).keys().filter(|k| k.name().is_none()) {
        entries.push(EntityComparison {
            name: key.to_string(),
            from_a: None,
            from_b: Some(DiffStatus::Missing),
        });
    }

    ReportSection {
        category: Category::for_routine(kind),
        entries,
    }
}
