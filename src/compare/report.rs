//! Human-readable comparison report printer

use std::io::{self, Write};

use super::types::{CompareReport, DiffStatus, EntityComparison};

fn side(status: Option<DiffStatus>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "-".to_string(),
    }
}

fn marker(entry: &EntityComparison) -> char {
    if entry.is_same() {
        ' '
    } else if entry.from_a.is_none() || entry.from_b.is_none() {
        '!'
    } else {
        '*'
    }
}

/// Write the report: one block per category, one line per entity with the
/// status seen from A and from B. With `only_differences`, identical
/// entities are left out.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &CompareReport,
    only_differences: bool,
) -> io::Result<()> {
    writeln!(out, "=== Schema Comparison Report ===")?;
    writeln!(out)?;

    let mut differing = 0;
    for section in &report.sections {
        let entries: Vec<&EntityComparison> = section
            .entries
            .iter()
            .filter(|e| !only_differences || !e.is_same())
            .collect();

        writeln!(out, "--- {} ({}) ---", section.category, section.entries.len())?;
        if entries.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for entry in entries {
            if !entry.is_same() {
                differing += 1;
            }
            writeln!(
                out,
                "{} {:<40} A: {:<10} B: {}",
                marker(entry),
                entry.name,
                side(entry.from_a),
                side(entry.from_b)
            )?;
        }
        writeln!(out)?;
    }

    if report.has_differences() {
        writeln!(out, "Summary: {} entities differ", differing)?;
    } else {
        writeln!(out, "Summary: schemas are equivalent")?;
    }
    Ok(())
}

/// Print the comparison report to stdout.
pub fn print_report(report: &CompareReport, only_differences: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, only_differences)
}
