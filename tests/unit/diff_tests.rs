//! Per-entity diff tests

use rust_sqlsync::compare::{types_equivalent, Category};
use rust_sqlsync::model::{ObjectKey, RoutineKind};
use rust_sqlsync::{compare_schemas, diff, parse, DiffStatus, DiffTarget};

// ============================================================================
// Tables and Columns
// ============================================================================

#[test]
fn test_table_with_extra_column_is_different() {
    let a = parse("CREATE TABLE T (Id INT, Name VARCHAR(50));");
    let b = parse("CREATE TABLE T (Id INT);");

    assert_eq!(diff(DiffTarget::Table("T"), &a, &b), DiffStatus::Different);
    // Extra columns on the asking side's counterpart are not considered
    assert_eq!(diff(DiffTarget::Table("T"), &b, &a), DiffStatus::Same);

    let name = DiffTarget::Column {
        table: "T",
        column: "Name",
    };
    assert_eq!(diff(name, &a, &b), DiffStatus::Missing);
    assert_eq!(diff(name, &b, &a), DiffStatus::Missing);
}

#[test]
fn test_cross_dialect_synonyms_are_same() {
    let a = parse("CREATE TABLE emp (id NUMBER, name VARCHAR2(50), created TIMESTAMP(6), notes CLOB);");
    let b = parse("CREATE TABLE [emp] ([id] INT, [name] VARCHAR(50), [created] DATETIME2, [notes] TEXT)\nGO");

    assert_eq!(diff(DiffTarget::Table("emp"), &a, &b), DiffStatus::Same);
    assert_eq!(diff(DiffTarget::Table("emp"), &b, &a), DiffStatus::Same);
}

#[test]
fn test_money_is_not_a_number_synonym() {
    assert!(!types_equivalent("MONEY", "NUMBER(19,4)"));

    let a = parse("CREATE TABLE P (price MONEY);");
    let b = parse("CREATE TABLE P (price NUMBER(19,4));");
    let price = DiffTarget::Column {
        table: "P",
        column: "price",
    };
    assert_eq!(diff(price, &a, &b), DiffStatus::Different);
    assert_eq!(diff(price, &b, &a), DiffStatus::Different);
}

#[test]
fn test_absent_table_is_missing_from_both_sides() {
    let a = parse("CREATE TABLE T (Id INT);");
    let empty = parse("");
    assert_eq!(diff(DiffTarget::Table("T"), &a, &empty), DiffStatus::Missing);
    assert_eq!(diff(DiffTarget::Table("T"), &empty, &a), DiffStatus::Missing);
    assert_eq!(diff(DiffTarget::Table("Nope"), &a, &a), DiffStatus::Missing);
}

// ============================================================================
// Inserts, Indexes and Routines
// ============================================================================

#[test]
fn test_insert_whitespace_differences_are_same() {
    let a = parse("INSERT INTO T (a, b) VALUES (1, 'x');");
    let b = parse("INSERT INTO T (a,b)\n    VALUES (1,    'x');");
    assert_eq!(diff(DiffTarget::Insert("T"), &a, &b), DiffStatus::Same);
}

#[test]
fn test_insert_subset_is_one_directional() {
    let a = parse("INSERT INTO T VALUES (1);\nINSERT INTO T VALUES (2);");
    let b = parse("INSERT INTO T VALUES (2);");
    assert_eq!(diff(DiffTarget::Insert("T"), &a, &b), DiffStatus::Different);
    assert_eq!(diff(DiffTarget::Insert("T"), &b, &a), DiffStatus::Same);
}

#[test]
fn test_index_text_comparison_ignores_layout_and_case() {
    let a = parse("CREATE INDEX ix ON t (a);");
    let b = parse("create   index ix\non t (a);");
    let c = parse("CREATE INDEX ix ON t (a, b);");
    assert_eq!(diff(DiffTarget::Index("ix"), &a, &b), DiffStatus::Same);
    assert_eq!(diff(DiffTarget::Index("ix"), &a, &c), DiffStatus::Different);
}

#[test]
fn test_routine_comparison() {
    let a = parse("CREATE VIEW v AS SELECT a FROM t;");
    let b = parse("CREATE  VIEW v AS\n  SELECT a FROM t;");
    let c = parse("CREATE VIEW v AS SELECT b FROM t;");
    let key = ObjectKey::from("v");

    assert_eq!(diff(DiffTarget::View(&key), &a, &b), DiffStatus::Same);
    assert_eq!(diff(DiffTarget::View(&key), &a, &c), DiffStatus::Different);
    assert_eq!(
        diff(DiffTarget::routine(RoutineKind::Procedure, &key), &a, &c),
        DiffStatus::Missing
    );
}

#[test]
fn test_unnamed_routine_never_matches() {
    let sql = "CREATE PROCEDURE\nGO\n";
    let a = parse(sql);
    let b = parse(sql);
    let key = a
        .routines(RoutineKind::Procedure)
        .keys()
        .next()
        .cloned()
        .unwrap();
    assert_eq!(key.name(), None);
    assert_eq!(diff(DiffTarget::Procedure(&key), &a, &b), DiffStatus::Missing);
}

// ============================================================================
// Whole-Schema Comparison
// ============================================================================

#[test]
fn test_self_comparison_has_no_differences() {
    let sql = "CREATE TABLE T (Id INT, Name VARCHAR(50));\n\
               CREATE INDEX ix ON T (Name);\n\
               CREATE VIEW v AS SELECT Id FROM T;\n\
               INSERT INTO T (Id, Name) VALUES (1, 'a');";
    let schema = parse(sql);
    let report = compare_schemas(&schema, &schema);
    assert!(!report.has_differences());
    assert_eq!(report.sections.len(), 8);
}

#[test]
fn test_report_entries_per_side() {
    let a = parse("CREATE TABLE T (Id INT, Name VARCHAR(50));\nCREATE TABLE OnlyA (x INT);");
    let b = parse("CREATE TABLE T (Id INT);\nCREATE TABLE OnlyB (y INT);");
    let report = compare_schemas(&a, &b);

    let t = report.entry(Category::Tables, "T").unwrap();
    assert_eq!(t.from_a, Some(DiffStatus::Different));
    assert_eq!(t.from_b, Some(DiffStatus::Same));

    let only_a = report.entry(Category::Tables, "OnlyA").unwrap();
    assert_eq!(only_a.from_a, Some(DiffStatus::Missing));
    assert_eq!(only_a.from_b, None);

    let only_b = report.entry(Category::Tables, "OnlyB").unwrap();
    assert_eq!(only_b.from_a, None);
    assert_eq!(only_b.from_b, Some(DiffStatus::Missing));

    let name = report.entry(Category::Columns, "T.Name").unwrap();
    assert_eq!(name.from_a, Some(DiffStatus::Missing));
    assert_eq!(name.from_b, None);

    let tables: Vec<&str> = report
        .section(Category::Tables)
        .unwrap()
        .entries
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(tables, vec!["OnlyA", "OnlyB", "T"]);
}

#[test]
fn test_repeated_comparison_gives_identical_statuses() {
    let fixtures = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let a = parse(&std::fs::read_to_string(fixtures.join("oracle_hr.sql")).unwrap());
    let b = parse(&std::fs::read_to_string(fixtures.join("sqlserver_hr.sql")).unwrap());

    let first = compare_schemas(&a, &b);
    let second = compare_schemas(&a, &b);
    assert!(first.has_differences());
    assert_eq!(first, second);

    for name in a.tables().keys() {
        let target = DiffTarget::Table(name.as_str());
        assert_eq!(diff(target, &a, &b), diff(target, &a, &b));
        assert_eq!(diff(target, &b, &a), diff(target, &b, &a));
    }
}
