//! Parsing a prior aggregate document back into a change set.

use super::types::{ChangeSet, ENTRY_SEPARATOR};
use regex::Regex;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, error, info};

/// Matches an entry header line: `# CHANGES-<version>.md`.
static ENTRY_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^# CHANGES-(.+)\.md$").expect("hard-coded pattern"));

/// Read and parse a prior aggregate file.
///
/// A missing file yields an empty set with an informational note; any other
/// read error is logged and likewise treated as "no prior content". Parsing
/// itself cannot fail.
pub async fn parse_prior_aggregate(path: &Path) -> ChangeSet {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            let set = parse_aggregate_content(&content);
            info!("Loaded {} entries from prior aggregate {:?}", set.len(), path);
            set
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!("Prior aggregate {:?} is missing; starting empty", path);
            ChangeSet::new()
        }
        Err(err) => {
            error!("Failed to read prior aggregate {:?}: {}", path, err);
            ChangeSet::new()
        }
    }
}

/// Split aggregate content into entries.
///
/// Blocks are delimited by the fixed separator; a block contributes an entry
/// only when its first line is a recognized entry header, with the rest of
/// the block as the entry's trimmed content. Anything before the first
/// recognized header is discarded.
///
/// ## Examples
///
/// ```
/// use changes_lib::aggregate::parse::parse_aggregate_content;
///
/// let doc = "# CHANGES-1.0.0.md\n\nFix A\n---\n# CHANGES-1.1.0.md\n\nFix B";
/// let set = parse_aggregate_content(doc);
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.get("1.0.0"), Some("Fix A"));
/// assert_eq!(set.get("1.1.0"), Some("Fix B"));
/// ```
pub fn parse_aggregate_content(content: &str) -> ChangeSet {
    let mut set = ChangeSet::new();

    for raw_block in content.split(ENTRY_SEPARATOR) {
        let block = raw_block.trim();
        let (first_line, body) = match block.split_once('\n') {
            Some((first, rest)) => (first, rest),
            None => (block, ""),
        };

        match ENTRY_HEADER.captures(first_line.trim_end()) {
            Some(caps) => set.insert(&caps[1], body),
            None => debug!("Discarding aggregate block without an entry header"),
        }
    }

    set
}
