//! rust-sqlsync: compare Oracle and SQL Server schema scripts
//!
//! This library parses two SQL scripts into schema models, diffs them
//! across dialects, and generates a migration script that brings the
//! second schema in line with the first.

pub mod compare;
pub mod dialect;
pub mod error;
pub mod migration;
pub mod model;
pub mod parser;
pub mod source;
pub mod util;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

pub use compare::{compare_schemas, diff, CompareReport, DiffStatus, DiffTarget};
pub use dialect::{detect_dialect, Dialect};
pub use error::SqlSyncError;
pub use migration::{generate_migration, generate_migration_script, MigrationScript, MigrationSummary};
pub use model::{Schema, SchemaSummary};
pub use parser::{parse, parse_with_options, ParseOptions, QuotePolicy};

/// File name used when no output path is given
pub const DEFAULT_OUTPUT_FILE: &str = "sync_from_A_to_B.sql";

/// Options for generating a migration script
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Script describing the desired schema (A)
    pub source_path: PathBuf,
    /// Script describing the schema to migrate (B)
    pub target_path: PathBuf,
    /// Output path for the migration script (defaults next to the target script)
    pub output_path: Option<PathBuf>,
    /// Dialect of A; detected from the script when unset
    pub source_dialect: Option<Dialect>,
    /// Dialect of B; detected from the script when unset
    pub target_dialect: Option<Dialect>,
    pub parse_options: ParseOptions,
    /// Enable verbose output
    pub verbose: bool,
}

/// A parsed script and the dialect it is treated as
#[derive(Debug, Clone)]
pub struct LoadedScript {
    pub path: PathBuf,
    pub dialect: Dialect,
    pub schema: Schema,
}

/// Result of a successful sync run
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub output_path: PathBuf,
    pub source_dialect: Dialect,
    pub target_dialect: Dialect,
    pub summary: MigrationSummary,
}

/// Read and parse one script, detecting its dialect unless one is given.
pub fn load_script(
    path: &Path,
    dialect: Option<Dialect>,
    options: &ParseOptions,
) -> Result<LoadedScript> {
    let sql = source::read_sql_file(path)?;
    let dialect = dialect.unwrap_or_else(|| detect_dialect(&sql));
    let schema = parse_with_options(&sql, options);
    Ok(LoadedScript {
        path: path.to_path_buf(),
        dialect,
        schema,
    })
}

/// Default output location: next to the target script
pub fn default_output_path(target_path: &Path) -> PathBuf {
    target_path
        .parent()
        .unwrap_or(Path::new("."))
        .join(DEFAULT_OUTPUT_FILE)
}

/// Generate the A → B migration script and write it to disk
pub fn sync_scripts(options: SyncOptions) -> Result<SyncOutcome> {
    if options.verbose {
        info!("Reading source script: {}", options.source_path.display());
    }

    // Step 1: Parse both scripts
    let source = load_script(
        &options.source_path,
        options.source_dialect,
        &options.parse_options,
    )?;
    let target = load_script(
        &options.target_path,
        options.target_dialect,
        &options.parse_options,
    )?;

    if options.verbose {
        info!("A ({}): {}", source.dialect, source.schema.summary());
        info!("B ({}): {}", target.dialect, target.schema.summary());
    }

    // Step 2: Generate the script
    let script = generate_migration_script(
        &source.schema,
        &target.schema,
        source.dialect,
        target.dialect,
        Some(chrono::Utc::now()),
    );

    // Step 3: Write it out
    let output_path = options
        .output_path
        .unwrap_or_else(|| default_output_path(&options.target_path));
    std::fs::write(&output_path, &script.text).map_err(|err| SqlSyncError::ScriptWriteError {
        path: output_path.clone(),
        source: err,
    })?;

    if options.verbose {
        info!("Wrote migration script: {}", output_path.display());
    }

    Ok(SyncOutcome {
        output_path,
        source_dialect: source.dialect,
        target_dialect: target.dialect,
        summary: script.summary,
    })
}

/// Parse two scripts and compare them entity by entity
pub fn compare_files(
    source_path: &Path,
    target_path: &Path,
    options: &ParseOptions,
) -> Result<CompareReport> {
    let source = load_script(source_path, None, options)?;
    let target = load_script(target_path, None, options)?;
    info!(
        "Comparing {} ({}) with {} ({})",
        source.path.display(),
        source.dialect,
        target.path.display(),
        target.dialect
    );
    Ok(compare_schemas(&source.schema, &target.schema))
}

/// Parse one script for a dialect and object summary
pub fn inspect_file(path: &Path, options: &ParseOptions) -> Result<LoadedScript> {
    load_script(path, None, options)
}
