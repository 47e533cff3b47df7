//! Core types and naming conventions for changelog aggregation.
//!
//! The file and header names here are exact and case-sensitive; both the
//! renderer and the parser rely on them, so an aggregate written by this
//! tool can be read back on the next run.

use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Filename prefix for aggregate files.
pub const AGGREGATE_PREFIX: &str = "ALL_CHANGES--";

/// Infix between the start and end version in an aggregate filename.
pub const AGGREGATE_INFIX: &str = "-to--";

/// Filename prefix for individual changelog files.
pub const INDIVIDUAL_PREFIX: &str = "CHANGES-";

/// Extension shared by all changelog files.
pub const MARKDOWN_EXT: &str = ".md";

/// Separator between entries inside an aggregate document.
pub const ENTRY_SEPARATOR: &str = "\n---\n";

/// Header line naming an entry inside an aggregate document.
///
/// ## Examples
///
/// ```
/// use changes_lib::aggregate::types::entry_header;
///
/// assert_eq!(entry_header("1.2.3"), "# CHANGES-1.2.3.md");
/// ```
pub fn entry_header(version: &str) -> String {
    format!("# {}{}{}", INDIVIDUAL_PREFIX, version, MARKDOWN_EXT)
}

/// Errors that abort an aggregation run.
///
/// Per-file problems never appear here; they are logged and degraded. The
/// only fatal condition is an unusable output location.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    DirectoryCreation {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// In-memory map of version string to trimmed changelog content.
///
/// Keys are unique; inserting an existing version replaces its content
/// (last writer wins). The map has no intrinsic order; ordering is derived
/// at render time by [`sort_versions`](crate::aggregate::render::sort_versions).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChangeSet {
    entries: HashMap<String, String>,
}

impl ChangeSet {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, trimming its content. Replaces any prior content
    /// stored under the same version.
    ///
    /// ## Examples
    ///
    /// ```
    /// use changes_lib::aggregate::types::ChangeSet;
    ///
    /// let mut set = ChangeSet::new();
    /// set.insert("1.0.0", "old\n");
    /// set.insert("1.0.0", "new");
    /// assert_eq!(set.get("1.0.0"), Some("new"));
    /// ```
    pub fn insert(&mut self, version: impl Into<String>, content: &str) {
        self.entries.insert(version.into(), content.trim().to_string());
    }

    /// Look up the content stored for a version.
    pub fn get(&self, version: &str) -> Option<&str> {
        self.entries.get(version).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate version keys in arbitrary order.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keep only entries whose version satisfies the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|version, _| keep(version));
    }
}

/// Final disposition of the output file for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// The aggregate document was written to disk.
    Written,
    /// Dry-run: the target was computed but nothing was written.
    DryRun,
    /// No entries survived the pipeline; no file is produced.
    Empty,
    /// The write was attempted and failed; the error text is retained.
    Failed(String),
}

/// Summary of one aggregation run, suitable for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateOutcome {
    /// Prior aggregate file that seeded the map, if any.
    pub prior_aggregate: Option<PathBuf>,
    /// Number of individual files merged into the map.
    pub files_merged: usize,
    /// Entries remaining after filtering.
    pub entry_count: usize,
    /// Smallest version in the output ordering.
    pub min_version: Option<String>,
    /// Largest version in the output ordering.
    pub max_version: Option<String>,
    /// Computed output path, when the pipeline produced one.
    pub output_path: Option<PathBuf>,
    /// What happened to the output file.
    pub write: WriteOutcome,
}
