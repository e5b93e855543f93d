//! INSERT ... VALUES extraction tests

use rust_sqlsync::parse;
use rust_sqlsync::parser::parse_inserts;

#[test]
fn test_rows_grouped_by_table() {
    let sql = "INSERT INTO dbo.Users (Id, Name) VALUES (1, 'Ann');\n\
               INSERT INTO [dbo].[Roles] VALUES (1, 'admin');\n\
               INSERT INTO Users (Id, Name) VALUES (2, 'Bob');";
    let schema = parse(sql);

    let users = schema.insert_rows("Users").unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].raw, "INSERT INTO Users (Id, Name) VALUES (2, 'Bob');");

    let roles = schema.insert_rows("Roles").unwrap();
    assert!(roles[0].columns.is_empty());
    assert_eq!(roles[0].raw, "INSERT INTO Roles VALUES (1, 'admin');");
    assert!(schema.insert_rows("Missing").is_none());
}

#[test]
fn test_multi_row_values_across_lines() {
    let sql = "INSERT INTO t (a, b)\nVALUES\n  (1, 'x'),\n  (2, 'y'),\n  (3, 'z');";
    let rows = &parse_inserts(sql)["t"];
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].values, vec!["3", "'z'"]);
}

#[test]
fn test_layout_does_not_change_rows() {
    let a = parse_inserts("INSERT INTO t (a,b) VALUES (1,'x');");
    let b = parse_inserts("insert   into [t] ( a , b )\n values (1,   'x')");
    assert_eq!(a["t"][0].canonical(), b["t"][0].canonical());
}

#[test]
fn test_literal_with_parenthesis_cuts_group() {
    // Value groups end at the first ')' even inside a literal
    let rows = &parse_inserts("INSERT INTO T VALUES ('a)b', 2);")["T"];
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].values, vec!["'a"]);
}

#[test]
fn test_insert_select_is_ignored() {
    assert!(parse_inserts("INSERT INTO t (a) SELECT a FROM s;").is_empty());
}
