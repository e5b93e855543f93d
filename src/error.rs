//! Error types for rust-sqlsync
//!
//! Only the file-handling shell can fail; parsing, diffing and script
//! generation degrade to empty results instead of returning errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading scripts or writing the migration
#[derive(Error, Debug)]
pub enum SqlSyncError {
    #[error("Failed to read SQL file: {path}")]
    SqlFileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQL file is neither UTF-8 nor Windows-1252: {path}")]
    SqlFileEncodingError { path: PathBuf },

    #[error("Failed to write migration script to {path}")]
    ScriptWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown dialect: {name} (expected 'oracle' or 'sqlserver')")]
    UnknownDialect { name: String },
}
