//! Schema model building

mod builder;
mod elements;
mod schema;

pub use builder::build_schema;
pub use elements::*;
pub use schema::{Schema, SchemaSummary};
