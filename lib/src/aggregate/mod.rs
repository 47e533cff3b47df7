//! Changelog aggregation pipeline.
//!
//! Merges the per-version `CHANGES-<version>.md` files in a directory into a
//! single ordered `ALL_CHANGES--<min>-to--<max>.md` document. The pipeline
//! is linear: locate a prior aggregate, parse it, overlay individual files,
//! filter by version range, sort, render, name, write. Each stage lives in
//! its own module and degrades per-file problems instead of failing the run;
//! the only fatal error is an unusable output directory.

pub mod filter;
pub mod locate;
pub mod output;
pub mod parse;
pub mod render;
pub mod scan;
pub mod types;

pub use types::{AggregateError, AggregateOutcome, ChangeSet, WriteOutcome};

use crate::version::VersionRange;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Options controlling one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Directory read from and written to.
    pub directory: PathBuf,
    /// Inclusive version range to keep; inactive when both bounds are unset.
    pub range: VersionRange,
    /// Ignore any existing aggregate and rebuild from individual files only.
    pub build_from_files: bool,
    /// Compute and report without writing anything.
    pub dry_run: bool,
}

/// Run the full aggregation pipeline.
///
/// In the default merge mode the most recent prior aggregate seeds the
/// change set, so versions that only exist in the aggregate survive;
/// individual files then overwrite or extend those entries. Build-from-files
/// mode skips the prior aggregate entirely and picks a `-copy-N` filename
/// variant when the computed name already exists. An empty result, before or
/// after filtering, produces no file and is not an error.
///
/// ## Errors
///
/// Returns [`AggregateError::DirectoryCreation`] when the output directory
/// cannot be created. Every per-file problem is logged and skipped instead.
#[instrument(skip(options), fields(directory = ?options.directory))]
pub async fn run(options: &AggregateOptions) -> Result<AggregateOutcome, AggregateError> {
    let dir = &options.directory;

    let mut set = ChangeSet::new();
    let mut prior_aggregate = None;

    if options.build_from_files {
        info!("Build-from-files mode: ignoring any existing aggregate");
    } else {
        prior_aggregate = locate::locate_prior_aggregate(dir);
        if let Some(path) = &prior_aggregate {
            set = parse::parse_prior_aggregate(path).await;
        }
    }

    let files_merged = scan::scan_individual_files(dir, &mut set).await;

    if set.is_empty() {
        info!("No changelog entries found in {:?}; nothing to write", dir);
        return Ok(empty_outcome(prior_aggregate, files_merged));
    }

    let set = filter::apply_range(set, &options.range);
    if set.is_empty() {
        info!("No entries remain after version filtering; nothing to write");
        return Ok(empty_outcome(prior_aggregate, files_merged));
    }

    let order = render::sort_versions(&set);
    let document = render::render_document(&set, &order);

    let Some((min_version, max_version)) = order.first().zip(order.last()) else {
        return Ok(empty_outcome(prior_aggregate, files_merged));
    };

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| AggregateError::DirectoryCreation {
            path: dir.clone(),
            source,
        })?;

    let mut filename = output::aggregate_filename(min_version, max_version);
    if options.build_from_files {
        filename = output::resolve_collision(dir, &filename);
    }
    let output_path = dir.join(&filename);

    let write = if options.dry_run {
        info!(
            "Dry-run: would write {} entries to {:?}",
            set.len(),
            output_path
        );
        WriteOutcome::DryRun
    } else {
        output::write_aggregate(&output_path, &document).await
    };

    Ok(AggregateOutcome {
        prior_aggregate,
        files_merged,
        entry_count: set.len(),
        min_version: Some(min_version.clone()),
        max_version: Some(max_version.clone()),
        output_path: Some(output_path),
        write,
    })
}

fn empty_outcome(prior_aggregate: Option<PathBuf>, files_merged: usize) -> AggregateOutcome {
    AggregateOutcome {
        prior_aggregate,
        files_merged,
        entry_count: 0,
        min_version: None,
        max_version: None,
        output_path: None,
        write: WriteOutcome::Empty,
    }
}
