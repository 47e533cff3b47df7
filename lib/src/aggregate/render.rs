//! Ordering and rendering of the aggregate document.

use super::types::{ChangeSet, ENTRY_SEPARATOR, entry_header};
use crate::version::compare;

/// Produce the ascending version order for a change set.
///
/// Coercible versions sort by semver ordering; a coercible version always
/// precedes an uncoercible one; uncoercible versions fall back to
/// lexicographic order. Textually distinct versions that coerce equal are
/// tie-broken lexicographically, so the result is deterministic regardless
/// of map iteration order.
///
/// ## Examples
///
/// ```
/// use changes_lib::aggregate::render::sort_versions;
/// use changes_lib::aggregate::types::ChangeSet;
///
/// let mut set = ChangeSet::new();
/// set.insert("2.0.0-beta", "c");
/// set.insert("1.0.0", "a");
/// set.insert("1.2.0", "b");
///
/// assert_eq!(sort_versions(&set), vec!["1.0.0", "1.2.0", "2.0.0-beta"]);
/// ```
pub fn sort_versions(set: &ChangeSet) -> Vec<String> {
    let mut versions: Vec<String> = set.versions().map(str::to_string).collect();
    versions.sort_by(|a, b| compare(a, b));
    versions
}

/// Render the aggregate document for the given version order.
///
/// Each entry is a header line, a blank line, and the trimmed content;
/// entries are joined by the fixed separator with no trailing separator.
///
/// ## Examples
///
/// ```
/// use changes_lib::aggregate::render::{render_document, sort_versions};
/// use changes_lib::aggregate::types::ChangeSet;
///
/// let mut set = ChangeSet::new();
/// set.insert("1.0.0", "Fix A");
/// set.insert("1.1.0", "Fix B");
///
/// let order = sort_versions(&set);
/// assert_eq!(
///     render_document(&set, &order),
///     "# CHANGES-1.0.0.md\n\nFix A\n---\n# CHANGES-1.1.0.md\n\nFix B"
/// );
/// ```
pub fn render_document(set: &ChangeSet, order: &[String]) -> String {
    let blocks: Vec<String> = order
        .iter()
        .filter_map(|version| {
            set.get(version)
                .map(|content| format!("{}\n\n{}", entry_header(version), content))
        })
        .collect();
    blocks.join(ENTRY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::parse::parse_aggregate_content;

    #[test]
    fn test_sort_ascending_semver() {
        let mut set = ChangeSet::new();
        set.insert("2.0.0", "");
        set.insert("1.10.0", "");
        set.insert("1.2.0", "");

        assert_eq!(sort_versions(&set), vec!["1.2.0", "1.10.0", "2.0.0"]);
    }

    #[test]
    fn test_sort_prerelease_by_coerced_value() {
        let mut set = ChangeSet::new();
        set.insert("1.0.0", "");
        set.insert("2.0.0-beta", "");
        set.insert("1.2.0", "");

        assert_eq!(sort_versions(&set), vec!["1.0.0", "1.2.0", "2.0.0-beta"]);
    }

    #[test]
    fn test_sort_uncoercible_last_in_string_order() {
        let mut set = ChangeSet::new();
        set.insert("zeta", "");
        set.insert("alpha", "");
        set.insert("1.0.0", "");

        assert_eq!(sort_versions(&set), vec!["1.0.0", "alpha", "zeta"]);
    }

    #[test]
    fn test_render_single_entry_has_no_separator() {
        let mut set = ChangeSet::new();
        set.insert("1.0.0", "Fix A");

        let order = sort_versions(&set);
        assert_eq!(render_document(&set, &order), "# CHANGES-1.0.0.md\n\nFix A");
    }

    #[test]
    fn test_render_joins_with_separator() {
        let mut set = ChangeSet::new();
        set.insert("1.0.0", "Fix A");
        set.insert("1.1.0", "Fix B");

        let order = sort_versions(&set);
        let doc = render_document(&set, &order);
        assert_eq!(doc, "# CHANGES-1.0.0.md\n\nFix A\n---\n# CHANGES-1.1.0.md\n\nFix B");
        assert!(!doc.ends_with("---"));
    }

    #[test]
    fn test_render_parse_round_trip() {
        let mut set = ChangeSet::new();
        set.insert("1.0.0", "- Fix A\n- Fix B");
        set.insert("1.1.0", "Fix C");
        set.insert("2.0.0-beta.1", "Preview build");

        let order = sort_versions(&set);
        let doc = render_document(&set, &order);
        let parsed = parse_aggregate_content(&doc);
        assert_eq!(parsed, set);
    }
}
