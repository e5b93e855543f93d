//! Compare two schemas and report differences
//!
//! Comparison is asymmetric: every status answers "does the *other* schema
//! have this entity, and is it the same?" from the side being asked.

mod diff;
mod equivalence;
pub mod report;
pub mod types;

pub use diff::{compare_schemas, diff};
pub use equivalence::types_equivalent;
pub use report::{print_report, write_report};
pub use types::{Category, CompareReport, DiffStatus, DiffTarget, EntityComparison, ReportSection};
