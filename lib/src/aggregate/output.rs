//! Output naming and writing for the aggregate document.

use super::types::{AGGREGATE_INFIX, AGGREGATE_PREFIX, MARKDOWN_EXT, WriteOutcome};
use std::path::Path;
use tracing::{error, info};

/// Compute the aggregate filename for a version span.
///
/// ## Examples
///
/// ```
/// use changes_lib::aggregate::output::aggregate_filename;
///
/// assert_eq!(
///     aggregate_filename("1.0.0", "2.0.0"),
///     "ALL_CHANGES--1.0.0-to--2.0.0.md"
/// );
/// ```
pub fn aggregate_filename(min: &str, max: &str) -> String {
    format!(
        "{}{}{}{}{}",
        AGGREGATE_PREFIX, min, AGGREGATE_INFIX, max, MARKDOWN_EXT
    )
}

/// Pick a non-clobbering variant of `filename` inside `dir`.
///
/// Used in build-from-files mode: when the computed name already exists, an
/// incrementing `-copy-N` marker keeps the new build from overwriting a
/// distinct earlier aggregate or a manually created file.
pub fn resolve_collision(dir: &Path, filename: &str) -> String {
    if !dir.join(filename).exists() {
        return filename.to_string();
    }

    let stem = filename.strip_suffix(MARKDOWN_EXT).unwrap_or(filename);
    let mut n = 1;
    loop {
        let candidate = format!("{}-copy-{}{}", stem, n, MARKDOWN_EXT);
        if !dir.join(&candidate).exists() {
            info!("Target {} already exists; writing {} instead", filename, candidate);
            return candidate;
        }
        n += 1;
    }
}

/// Write the rendered document to `path` with a trailing newline.
///
/// A failed write is logged and reported in the outcome; it does not abort
/// the run.
pub async fn write_aggregate(path: &Path, document: &str) -> WriteOutcome {
    let mut blob = String::with_capacity(document.len() + 1);
    blob.push_str(document);
    blob.push('\n');

    match tokio::fs::write(path, blob).await {
        Ok(()) => {
            info!("Wrote aggregate {:?}", path);
            WriteOutcome::Written
        }
        Err(err) => {
            error!("Failed to write aggregate {:?}: {}", path, err);
            WriteOutcome::Failed(err.to_string())
        }
    }
}
