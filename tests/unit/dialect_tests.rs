//! Dialect detection tests

use rust_sqlsync::{detect_dialect, Dialect};

#[test]
fn test_oracle_script() {
    let sql = "CREATE TABLE emp (id NUMBER(10), name VARCHAR2(50), hired DATE DEFAULT SYSDATE);";
    assert_eq!(detect_dialect(sql), Dialect::Oracle);
}

#[test]
fn test_sqlserver_script() {
    let sql = "CREATE TABLE [dbo].[emp] ([id] INT IDENTITY(1,1), [name] NVARCHAR(50))\nGO";
    assert_eq!(detect_dialect(sql), Dialect::SqlServer);
}

#[test]
fn test_markers_are_case_insensitive() {
    assert_eq!(detect_dialect("select NVL(a, 0) from t"), Dialect::Oracle);
    assert_eq!(detect_dialect("SELECT * FROM t WITH (NOLOCK)"), Dialect::SqlServer);
}

#[test]
fn test_go_line_without_markers() {
    assert_eq!(detect_dialect("CREATE TABLE t (a INT)\n  go  \n"), Dialect::SqlServer);
}

#[test]
fn test_plain_sql_defaults_to_sqlserver() {
    assert_eq!(detect_dialect("CREATE TABLE t (a INT);"), Dialect::SqlServer);
    assert_eq!(detect_dialect(""), Dialect::SqlServer);
}

#[test]
fn test_dialect_names() {
    assert_eq!("tsql".parse::<Dialect>().unwrap(), Dialect::SqlServer);
    assert_eq!("PLSQL".parse::<Dialect>().unwrap(), Dialect::Oracle);
    assert_eq!(Dialect::Oracle.to_string(), "ORACLE");
    assert_eq!(Dialect::Oracle.batch_separator(), "/");
    assert_eq!(Dialect::SqlServer.batch_separator(), "GO");

    let err = "db2".parse::<Dialect>().unwrap_err();
    assert!(err.to_string().contains("db2"));
}
