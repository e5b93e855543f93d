//! Procedure, function, view and trigger extraction tests

use rust_sqlsync::model::{ObjectKey, RoutineKind};
use rust_sqlsync::parse;
use rust_sqlsync::parser::extract_routine_name;

fn named(name: &str) -> ObjectKey {
    ObjectKey::from(name)
}

// ============================================================================
// SQL Server Routines
// ============================================================================

#[test]
fn test_tsql_procedure_with_nested_blocks() {
    let sql = r#"
CREATE PROCEDURE [dbo].[usp_Archive]
    @Days INT
AS
BEGIN
    SET NOCOUNT ON;
    IF @Days > 30
    BEGIN
        DELETE FROM dbo.Log WHERE LoggedAt < DATEADD(day, -@Days, GETDATE());
    END
    SELECT CASE WHEN @Days > 90 THEN 'old' ELSE 'recent' END AS Age;
END
GO
CREATE PROCEDURE dbo.usp_Next AS SELECT 1
GO
"#;
    let schema = parse(sql);
    let procedures = schema.routines(RoutineKind::Procedure);
    assert_eq!(procedures.len(), 2);

    let archive = &procedures[&named("usp_Archive")];
    assert!(archive.raw.starts_with("CREATE PROCEDURE [dbo].[usp_Archive]"));
    assert!(archive.raw.ends_with("AS Age;\nEND"), "raw: {}", archive.raw);

    let next = &procedures[&named("usp_Next")];
    assert_eq!(next.raw, "CREATE PROCEDURE dbo.usp_Next AS SELECT 1");
}

#[test]
fn test_create_or_alter_and_trigger() {
    let sql = "CREATE OR ALTER PROC dbo.p AS SELECT 1\nGO\n\
               CREATE TRIGGER trg_audit ON dbo.Users AFTER INSERT AS\nBEGIN\n  SELECT 2\nEND\nGO\n";
    let schema = parse(sql);
    assert!(schema.routine(RoutineKind::Procedure, &named("p")).is_some());

    let trigger = schema
        .routine(RoutineKind::Trigger, &named("trg_audit"))
        .expect("trigger should be parsed");
    assert!(trigger.raw.ends_with("END"));
}

#[test]
fn test_view_ends_at_terminator() {
    let schema = parse("CREATE VIEW dbo.ActiveUsers AS SELECT * FROM Users WHERE Active = 1;\nSELECT 2;");
    let view = schema.routine(RoutineKind::View, &named("ActiveUsers")).unwrap();
    assert_eq!(view.raw, "CREATE VIEW dbo.ActiveUsers AS SELECT * FROM Users WHERE Active = 1;");
}

// ============================================================================
// Oracle Routines
// ============================================================================

#[test]
fn test_plsql_procedure_with_control_flow() {
    let sql = r#"
CREATE OR REPLACE PROCEDURE hr.adjust (p_id IN NUMBER) IS
BEGIN
    IF p_id > 0 THEN
        FOR r IN (SELECT emp_id FROM hr.employees) LOOP
            UPDATE hr.employees SET salary = salary + 1 WHERE emp_id = r.emp_id;
        END LOOP;
    END IF;
END;
/
CREATE OR REPLACE FUNCTION hr.one RETURN NUMBER IS
BEGIN
    RETURN 1;
END;
/
"#;
    let schema = parse(sql);
    let adjust = schema.routine(RoutineKind::Procedure, &named("adjust")).unwrap();
    assert!(adjust.raw.contains("END LOOP;"));
    assert!(adjust.raw.ends_with("END IF;\nEND;"), "raw: {}", adjust.raw);

    let one = schema.routine(RoutineKind::Function, &named("one")).unwrap();
    assert!(one.raw.ends_with("RETURN 1;\nEND;"));
}

#[test]
fn test_endif_suffix_is_not_a_block_end() {
    let sql = "CREATE PROCEDURE p AS BEGIN SELECT endif_flag FROM t; END; SELECT 9;";
    let schema = parse(sql);
    let p = schema.routine(RoutineKind::Procedure, &named("p")).unwrap();
    assert_eq!(p.raw, "CREATE PROCEDURE p AS BEGIN SELECT endif_flag FROM t; END;");
}

// ============================================================================
// Naming
// ============================================================================

#[test]
fn test_extract_routine_name_forms() {
    assert_eq!(
        extract_routine_name("CREATE FUNCTION [dbo].[fn_Total](@id INT)", RoutineKind::Function),
        Some("fn_Total".to_string())
    );
    assert_eq!(
        extract_routine_name("create or replace view \"HR\".\"V_EMP\" as select 1", RoutineKind::View),
        Some("V_EMP".to_string())
    );
}

#[test]
fn test_unnamed_routines_get_distinct_keys() {
    let sql = "CREATE PROCEDURE\nGO\nCREATE PROCEDURE\nGO\n";
    let schema = parse(sql);
    let keys: Vec<&ObjectKey> = schema.routines(RoutineKind::Procedure).keys().collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.iter().all(|k| k.name().is_none()));
    assert_ne!(keys[0], keys[1]);
}
