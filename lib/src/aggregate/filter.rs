//! Version-range filtering of the change set.

use super::types::ChangeSet;
use crate::version::{VersionRange, coerce};
use tracing::{debug, info};

/// Retain only entries whose coerced version lies inside the range.
///
/// A no-op when no bound is set. While a filter is active, entries whose
/// version cannot be coerced are dropped without a warning.
///
/// ## Examples
///
/// ```
/// use changes_lib::aggregate::filter::apply_range;
/// use changes_lib::aggregate::types::ChangeSet;
/// use changes_lib::version::VersionRange;
///
/// let mut set = ChangeSet::new();
/// set.insert("1.0.0", "Fix A");
/// set.insert("1.1.0", "Fix B");
///
/// let range = VersionRange::from_bounds(Some("1.1.0"), None).unwrap();
/// let filtered = apply_range(set, &range);
/// assert_eq!(filtered.len(), 1);
/// assert!(filtered.get("1.1.0").is_some());
/// ```
pub fn apply_range(mut set: ChangeSet, range: &VersionRange) -> ChangeSet {
    if !range.is_active() {
        return set;
    }

    let before = set.len();
    set.retain(|version| match coerce(version) {
        Some(v) => range.contains(&v),
        None => {
            debug!("Dropping uncoercible version {:?} under active filter", version);
            false
        }
    });
    info!("Version filter kept {} of {} entries", set.len(), before);
    set
}
