//! Changes CLI - Merge per-version changelog files into one aggregate

use changes_lib::aggregate::{self, AggregateOptions, AggregateOutcome, WriteOutcome};
use changes_lib::version::VersionRange;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "changes")]
#[command(
    about = "Merge per-version CHANGES-<version>.md files into one ordered aggregate",
    long_about = None
)]
struct Cli {
    /// Directory holding the changelog files (input and output)
    #[arg(short = 'd', long = "directory", value_name = "DIR", default_value = "./CHANGES")]
    directory: PathBuf,

    /// Inclusive lower bound for versions to keep
    #[arg(long = "start-version", visible_alias = "sv", value_name = "VERSION")]
    start_version: Option<String>,

    /// Inclusive upper bound for versions to keep
    #[arg(long = "end-version", visible_alias = "ev", value_name = "VERSION")]
    end_version: Option<String>,

    /// Ignore any existing aggregate and rebuild from individual files
    #[arg(short = 'b', long = "build-from-files")]
    build_from_files: bool,

    /// Compute and report without writing the aggregate
    #[arg(long = "dry-run", visible_alias = "dr")]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long)]
    json: bool,
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    // Determine base filter from RUST_LOG or verbosity flags.
    // Default (verbose=0) shows INFO so the run's diagnostics are visible.
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "info".to_string(),
            1 => "info,changes_lib=debug".to_string(),
            _ => "debug,changes_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        // JSON output for structured log processing
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Human-readable console output to stderr
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(verbose >= 1)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn print_summary(outcome: &AggregateOutcome) {
    let span = format!(
        "{} → {}",
        outcome.min_version.as_deref().unwrap_or("?"),
        outcome.max_version.as_deref().unwrap_or("?")
    );

    match &outcome.write {
        WriteOutcome::Written => {
            if let Some(path) = &outcome.output_path {
                println!(
                    "  ✓ Wrote {} entries ({}) to {}",
                    outcome.entry_count,
                    span,
                    path.display()
                );
            }
        }
        WriteOutcome::DryRun => {
            if let Some(path) = &outcome.output_path {
                println!(
                    "  ✓ Dry-run: {} entries ({}) would be written to {}",
                    outcome.entry_count,
                    span,
                    path.display()
                );
            }
        }
        WriteOutcome::Empty => {
            println!("  ⚠ No changelog entries to aggregate; nothing written");
        }
        WriteOutcome::Failed(err) => {
            if let Some(path) = &outcome.output_path {
                eprintln!("  ✗ Failed to write {}: {}", path.display(), err);
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    tracing::debug!("Changes CLI starting");

    let range = match VersionRange::from_bounds(
        cli.start_version.as_deref(),
        cli.end_version.as_deref(),
    ) {
        Ok(range) => range,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let options = AggregateOptions {
        directory: cli.directory,
        range,
        build_from_files: cli.build_from_files,
        dry_run: cli.dry_run,
    };

    match aggregate::run(&options).await {
        Ok(outcome) => print_summary(&outcome),
        Err(e) => {
            eprintln!("Aggregation failed: {}", e);
            std::process::exit(1);
        }
    }
}
