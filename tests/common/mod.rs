//! Common test utilities for rust-sqlsync tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use rust_sqlsync::{ParseOptions, SyncOptions, SyncOutcome};

/// Path to a file under tests/fixtures
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Test context with temporary directory for isolated test execution
pub struct TestContext {
    /// Kept to prevent temp directory cleanup until TestContext is dropped
    _temp_dir: TempDir,
    pub dir: PathBuf,
    pub source_path: PathBuf,
    pub target_path: PathBuf,
}

impl TestContext {
    /// Copy two fixture scripts into a fresh temp directory as `a.sql` and `b.sql`
    pub fn with_fixtures(source: &str, target: &str) -> Self {
        let source_sql = fs::read(fixture_path(source)).expect("Failed to read source fixture");
        let target_sql = fs::read(fixture_path(target)).expect("Failed to read target fixture");
        Self::with_bytes(&source_sql, &target_sql)
    }

    /// Write two inline scripts into a fresh temp directory
    pub fn with_scripts(source: &str, target: &str) -> Self {
        Self::with_bytes(source.as_bytes(), target.as_bytes())
    }

    pub fn with_bytes(source: &[u8], target: &[u8]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().to_path_buf();

        let source_path = dir.join("a.sql");
        let target_path = dir.join("b.sql");
        fs::write(&source_path, source).expect("Failed to write source script");
        fs::write(&target_path, target).expect("Failed to write target script");

        Self {
            _temp_dir: temp_dir,
            dir,
            source_path,
            target_path,
        }
    }

    /// Default options for syncing this context's scripts
    pub fn options(&self) -> SyncOptions {
        SyncOptions {
            source_path: self.source_path.clone(),
            target_path: self.target_path.clone(),
            output_path: None,
            source_dialect: None,
            target_dialect: None,
            parse_options: ParseOptions::default(),
            verbose: false,
        }
    }

    /// Run a sync, panicking if it fails
    pub fn sync_successfully(&self) -> SyncOutcome {
        rust_sqlsync::sync_scripts(self.options()).expect("Sync failed")
    }

    /// Run a sync and return the written script text
    pub fn sync_to_string(&self) -> String {
        let outcome = self.sync_successfully();
        read_script(&outcome.output_path)
    }
}

pub fn read_script(path: &Path) -> String {
    fs::read_to_string(path).expect("Failed to read generated script")
}

/// Lines of `script` that are neither blank nor comments
pub fn statement_lines(script: &str) -> Vec<&str> {
    script
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with("--"))
        .collect()
}
