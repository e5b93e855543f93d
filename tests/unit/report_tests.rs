//! Comparison report printer tests

use rust_sqlsync::compare::write_report;
use rust_sqlsync::{compare_schemas, parse};

fn render(a: &str, b: &str, only_differences: bool) -> String {
    let report = compare_schemas(&parse(a), &parse(b));
    let mut out = Vec::new();
    write_report(&mut out, &report, only_differences).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_report_lists_every_category() {
    let text = render("CREATE TABLE T (Id INT);", "CREATE TABLE T (Id INT);", false);
    for category in [
        "Tables", "Columns", "Indexes", "Procedures", "Functions", "Views", "Triggers", "Inserts",
    ] {
        assert!(text.contains(&format!("--- {} (", category)), "missing {}", category);
    }
    assert!(text.ends_with("Summary: schemas are equivalent\n"));
}

#[test]
fn test_report_marks_differences() {
    let text = render(
        "CREATE TABLE T (Id INT, Name VARCHAR(50));",
        "CREATE TABLE T (Id INT);\nCREATE TABLE U (x INT);",
        false,
    );
    let table_line = text.lines().find(|l| l.contains(" T ")).unwrap();
    assert!(table_line.starts_with('*'));
    assert!(table_line.contains("A: different"));
    assert!(table_line.contains("B: same"));

    let only_b = text.lines().find(|l| l.contains(" U ")).unwrap();
    assert!(only_b.starts_with('!'));
    assert!(only_b.contains("A: -"));
    assert!(text.contains("Summary: 4 entities differ"));
}

#[test]
fn test_differences_only_hides_identical_entities() {
    let text = render(
        "CREATE TABLE T (Id INT);\nCREATE TABLE V (y INT);",
        "CREATE TABLE T (Id INT);",
        true,
    );
    assert!(!text.lines().any(|l| l.contains(" T ")));
    assert!(text.lines().any(|l| l.contains(" V ")));
    assert!(text.contains("  (none)"));
}
