//! Heuristic SQL script parsing
//!
//! Nothing here is a grammar. Object boundaries are found with quote- and
//! paren-aware scanning, then each statement is picked apart with patterns.
//! Malformed statements are skipped, never reported as errors.

mod block;
mod column_parser;
mod constraint_parser;
mod identifier_utils;
mod index_parser;
mod insert_parser;
mod routine_parser;
mod scanner;
mod segmenter;
mod table_parser;

pub use block::match_block_end;
pub use column_parser::{extract_default, extract_type, parse_column_definition};
pub use constraint_parser::{is_table_constraint, parse_constraint};
pub use identifier_utils::{normalize_object_name, parse_column_list, strip_quote_chars};
pub use index_parser::{parse_index_statement, parse_indexes};
pub use insert_parser::parse_inserts;
pub use routine_parser::{extract_routine_name, parse_routines};
pub use scanner::{
    find_terminator, match_paren, split_top_level_commas, strip_comments, MatchSpans, QuotePolicy,
};
pub use segmenter::{
    find_batch_separator, find_statement_end, strip_trailing_separator,
    StatementKind,
};
pub use table_parser::parse_tables;

use crate::model::{build_schema, Schema};

/// Knobs for the scanners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Quote escaping used when matching parentheses, blocks and terminators
    pub quotes: QuotePolicy,
    /// Treat `#` as the start of a line comment
    pub hash_line_comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            quotes: QuotePolicy::default(),
            hash_line_comments: true,
        }
    }
}

/// Parse a script with default options.
pub fn parse(sql: &str) -> Schema {
    parse_with_options(sql, &ParseOptions::default())
}

pub fn parse_with_options(sql: &str, options: &ParseOptions) -> Schema {
    build_schema(sql, options)
}
