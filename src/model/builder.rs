//! Build the schema model from one script

use tracing::debug;

use crate::parser::{
    parse_indexes, parse_inserts, parse_routines, parse_tables, strip_comments, ParseOptions,
};

use super::Schema;

/// Build a schema from raw script text.
///
/// Comments are removed once up front; every extractor then scans the same
/// comment-free text independently.
pub fn build_schema(sql: &str, options: &ParseOptions) -> Schema {
    let text = strip_comments(sql, options.hash_line_comments);

    let tables = parse_tables(&text, options);
    let indexes = parse_indexes(&text, options);
    // Unnamed routines are numbered in the order they are found
    let mut next_unnamed = 0;
    let routines = parse_routines(&text, options, &mut next_unnamed);
    let inserts = parse_inserts(&text);

    let schema = Schema::new(tables, indexes, routines, inserts);
    debug!(summary = %schema.summary(), unnamed = next_unnamed, "built schema");
    schema
}
