//! Locating the most recent prior aggregate file in a directory.

use crate::version::{coerce, is_version_token};
use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, error, info};
use walkdir::WalkDir;

/// Matches `ALL_CHANGES--<min>-to--<max>.md`, capturing both version tokens
/// and any trailing `-copy-N` disambiguation marker.
static AGGREGATE_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ALL_CHANGES--(.+)-to--(.+?)(-copy-\d+)?\.md$").expect("hard-coded pattern")
});

struct Candidate {
    path: PathBuf,
    end: Version,
    end_raw: String,
}

/// Find the prior aggregate file to update, if any.
///
/// Candidates are files whose name matches the aggregate pattern with a
/// syntactically valid end-version token; `-copy-N` variants and names with
/// trailing non-version text never match. Among candidates the one with the
/// maximum coerced end version wins; when two coerce equal, the textually
/// shorter raw token is preferred on the assumption that the shorter name is
/// the release rather than a pre-release or build-tagged variant.
///
/// Returns `None`, with an informational note, when the directory does not
/// exist or holds no candidate. Directory read errors are logged and treated
/// the same way.
pub fn locate_prior_aggregate(dir: &Path) -> Option<PathBuf> {
    if !dir.exists() {
        info!("Changelog directory {:?} does not exist; starting empty", dir);
        return None;
    }

    let mut best: Option<Candidate> = None;

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
        let Some(caps) = AGGREGATE_FILENAME.captures(&name) else {
            continue;
        };
        if caps.get(3).is_some() {
            debug!("Skipping copy-marked aggregate: {}", name);
            continue;
        }

        let end_raw = &caps[2];
        if !is_version_token(end_raw) {
            debug!("Skipping aggregate with malformed end version: {}", name);
            continue;
        }
        let Some(end) = coerce(end_raw) else {
            debug!("Skipping aggregate with uncoercible end version: {}", name);
            continue;
        };

        let better = match &best {
            None => true,
            Some(current) => match end.cmp(&current.end) {
                Ordering::Greater => true,
                Ordering::Less => false,
                // Equal coerced versions: the shorter raw token is assumed
                // to be the release rather than a tagged variant.
                Ordering::Equal => end_raw.len() < current.end_raw.len(),
            },
        };
        if better {
            best = Some(Candidate {
                path: entry.path().to_path_buf(),
                end,
                end_raw: end_raw.to_string(),
            });
        }
    }

    match best {
        Some(candidate) => {
            info!("Updating prior aggregate {:?}", candidate.path);
            Some(candidate.path)
        }
        None => {
            info!("No prior aggregate found in {:?}", dir);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "content").unwrap();
    }

    #[test]
    fn test_locate_missing_directory() {
        assert!(locate_prior_aggregate(Path::new("/nonexistent/changes")).is_none());
    }

    #[test]
    fn test_locate_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert!(locate_prior_aggregate(temp.path()).is_none());
    }

    #[test]
    fn test_locate_single_aggregate() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "ALL_CHANGES--1.0.0-to--2.0.0.md");
        touch(temp.path(), "CHANGES-1.0.0.md");

        let found = locate_prior_aggregate(temp.path()).unwrap();
        assert_eq!(
            found.file_name().unwrap().to_string_lossy(),
            "ALL_CHANGES--1.0.0-to--2.0.0.md"
        );
    }

    #[test]
    fn test_locate_prefers_maximum_end_version() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "ALL_CHANGES--1.0.0-to--1.5.0.md");
        touch(temp.path(), "ALL_CHANGES--1.0.0-to--2.1.0.md");
        touch(temp.path(), "ALL_CHANGES--1.0.0-to--2.0.0.md");

        let found = locate_prior_aggregate(temp.path()).unwrap();
        assert_eq!(
            found.file_name().unwrap().to_string_lossy(),
            "ALL_CHANGES--1.0.0-to--2.1.0.md"
        );
    }

    #[test]
    fn test_locate_tie_prefers_shorter_raw_token() {
        let temp = TempDir::new().unwrap();
        // Both end versions coerce to 2.0.0; the bare release should win.
        touch(temp.path(), "ALL_CHANGES--1.0.0-to--2.0.0-beta.1.md");
        touch(temp.path(), "ALL_CHANGES--1.0.0-to--2.0.0.md");

        let found = locate_prior_aggregate(temp.path()).unwrap();
        assert_eq!(
            found.file_name().unwrap().to_string_lossy(),
            "ALL_CHANGES--1.0.0-to--2.0.0.md"
        );
    }

    #[test]
    fn test_locate_skips_copy_variants() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "ALL_CHANGES--1.0.0-to--2.0.0-copy-1.md");
        touch(temp.path(), "ALL_CHANGES--1.0.0-to--2.0.0-copy-2.md");
        assert!(locate_prior_aggregate(temp.path()).is_none());
    }

    #[test]
    fn test_locate_skips_trailing_non_version_text() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "ALL_CHANGES--1.0.0-to--2.0.0.backup.md");
        assert!(locate_prior_aggregate(temp.path()).is_none());
    }

    #[test]
    fn test_locate_ignores_individual_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "CHANGES-1.0.0.md");
        touch(temp.path(), "CHANGES-2.0.0.md");
        assert!(locate_prior_aggregate(temp.path()).is_none());
    }
}
