//! CREATE INDEX parsing tests

use rust_sqlsync::parse;
use rust_sqlsync::parser::parse_index_statement;

#[test]
fn test_parse_nonclustered_index() {
    let sql = r#"
CREATE NONCLUSTERED INDEX [IX_Table_Column]
ON [dbo].[SomeTable] ([Column1], [Column2] DESC)
INCLUDE ([Column3]);
"#;
    let schema = parse(sql);
    let index = schema.index("IX_Table_Column").expect("index should be parsed");

    assert_eq!(index.table.as_deref(), Some("SomeTable"));
    assert_eq!(index.columns, vec!["Column1", "Column2"]);
    assert!(index.is_nonclustered);
    assert!(!index.is_clustered);
    assert!(index.raw.contains("INCLUDE ([Column3]);"));
}

#[test]
fn test_parse_oracle_unique_index() {
    let sql = "CREATE UNIQUE INDEX hr.ux_emp_email ON hr.employees (email) TABLESPACE users;";
    let schema = parse(sql);
    let index = schema.index("ux_emp_email").unwrap();

    assert!(index.is_unique);
    assert_eq!(index.table.as_deref(), Some("employees"));
    assert_eq!(index.columns, vec!["email"]);
    assert_eq!(index.describe(), "UNIQUE on employees");
}

#[test]
fn test_clustered_flag() {
    let index = parse_index_statement("CREATE CLUSTERED INDEX CIX ON dbo.Log (LoggedAt)").unwrap();
    assert!(index.is_clustered);
    assert!(!index.is_nonclustered);
}

#[test]
fn test_indexes_keyed_by_name() {
    let sql = "CREATE INDEX ix_a ON t (a);\nCREATE INDEX ix_b ON t (b);\nCREATE INDEX ix_a ON t (a, b);";
    let schema = parse(sql);
    assert_eq!(schema.indexes().len(), 2);
    assert_eq!(schema.index("ix_a").unwrap().columns, vec!["a", "b"]);
}

#[test]
fn test_index_without_name_is_skipped() {
    assert!(parse_index_statement("CREATE INDEX (a) ON t").is_none());
    assert!(parse("CREATE INDEX (a) ON t;").indexes().is_empty());
}
