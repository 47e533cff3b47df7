//! Scanning a directory for individual changelog files.

use super::types::ChangeSet;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Matches `CHANGES-<version>.md`, capturing the version token.
static INDIVIDUAL_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CHANGES-(.*)\.md$").expect("hard-coded pattern"));

/// Merge every `CHANGES-<version>.md` file under `dir` into `set`.
///
/// Contents are trimmed and inserted with overwrite-on-conflict semantics,
/// so individual files take precedence over entries seeded from a prior
/// aggregate. A file whose version token is empty is skipped with a warning;
/// a file that cannot be read is logged and skipped while the remaining
/// files continue. Returns the number of files merged.
pub async fn scan_individual_files(dir: &Path, set: &mut ChangeSet) -> usize {
    if !dir.exists() {
        info!("Changelog directory {:?} does not exist; nothing to scan", dir);
        return 0;
    }

    let mut merged = 0;

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                error!("Failed to read directory entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let Some(caps) = INDIVIDUAL_FILENAME.captures(&name) else {
            debug!("Ignoring non-changelog file: {}", name);
            continue;
        };
        let version = caps[1].to_string();
        if version.is_empty() {
            warn!("Cannot extract a version from {}; skipping", name);
            continue;
        }

        match tokio::fs::read_to_string(entry.path()).await {
            Ok(content) => {
                debug!("Merging {} as version {}", name, version);
                set.insert(version, &content);
                merged += 1;
            }
            Err(err) => {
                error!("Failed to read {:?}: {}", entry.path(), err);
            }
        }
    }

    info!("Merged {} individual changelog files from {:?}", merged, dir);
    merged
}
