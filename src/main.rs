use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use rust_sqlsync::compare::print_report;
use rust_sqlsync::{compare_files, inspect_file, sync_scripts, Dialect, ParseOptions, QuotePolicy, SyncOptions};

#[derive(Parser)]
#[command(name = "rust-sqlsync")]
#[command(author, version, about = "Compare Oracle and SQL Server schema scripts and generate a migration")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Treat every quote as a delimiter (no backslash escapes)
    #[arg(long, global = true)]
    standard_quotes: bool,

    /// Do not treat '#' as the start of a line comment
    #[arg(long, global = true)]
    no_hash_comments: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a script that migrates the target schema to the source schema
    Sync {
        /// Script with the desired schema (A)
        #[arg(short, long)]
        source: PathBuf,

        /// Script with the schema to migrate (B)
        #[arg(short, long)]
        target: PathBuf,

        /// Output path for the script (defaults to sync_from_A_to_B.sql next to the target)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dialect of the source script (oracle, sqlserver); detected when omitted
        #[arg(long)]
        source_dialect: Option<Dialect>,

        /// Dialect of the target script (oracle, sqlserver); detected when omitted
        #[arg(long)]
        target_dialect: Option<Dialect>,
    },

    /// Print the per-entity comparison of two scripts
    Compare {
        /// Script with the desired schema (A)
        #[arg(short, long)]
        source: PathBuf,

        /// Script with the schema to migrate (B)
        #[arg(short, long)]
        target: PathBuf,

        /// Only list entities that differ
        #[arg(long)]
        differences_only: bool,
    },

    /// Print the detected dialect and object counts of one script
    Inspect {
        /// SQL script to inspect
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let parse_options = ParseOptions {
        quotes: if cli.standard_quotes {
            QuotePolicy::Standard
        } else {
            QuotePolicy::BackslashEscapes
        },
        hash_line_comments: !cli.no_hash_comments,
    };

    match cli.command {
        Commands::Sync {
            source,
            target,
            output,
            source_dialect,
            target_dialect,
        } => {
            let options = SyncOptions {
                source_path: source,
                target_path: target,
                output_path: output,
                source_dialect,
                target_dialect,
                parse_options,
                verbose: cli.verbose,
            };

            let outcome = sync_scripts(options)?;
            info!(
                "{} -> {}: {}",
                outcome.source_dialect, outcome.target_dialect, outcome.summary
            );
            info!("Migration script written to {}", outcome.output_path.display());
        }

        Commands::Compare {
            source,
            target,
            differences_only,
        } => {
            let report = compare_files(&source, &target, &parse_options)?;
            print_report(&report, differences_only)?;
        }

        Commands::Inspect { path } => {
            let script = inspect_file(&path, &parse_options)?;
            println!("{}", script.path.display());
            println!("  dialect: {}", script.dialect);
            println!("  objects: {}", script.schema.summary());
            for (name, index) in script.schema.indexes() {
                println!("  index {}: {}", name, index.describe());
            }
        }
    }

    Ok(())
}
