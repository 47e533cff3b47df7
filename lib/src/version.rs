//! Version coercion and comparison, built on the `semver` crate.
//!
//! Changelog filenames carry loosely formatted version tokens ("1.5",
//! "v2.0.0", "2.0.0-beta.1"). Rather than reimplement version parsing, this
//! module coerces such tokens into a normalized [`semver::Version`] release
//! triple and derives all ordering and range checks from `semver`'s
//! comparison. Pre-release and build suffixes are dropped during coercion,
//! so "2.0.0-beta.1" compares equal to the "2.0.0" release it precedes.

use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::sync::LazyLock;
use thiserror::Error;

/// Matches the leading `major[.minor[.patch]]` digit run inside a token.
static VERSION_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("hard-coded pattern"));

/// Matches a string that is a version token in its entirety: an optional
/// leading `v`, one to three dot-separated numeric components, and an
/// optional pre-release/build suffix. Used to reject filenames where extra
/// text trails the version (e.g. backup markers).
static VERSION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[vV]?\d+(?:\.\d+){0,2}(?:[-+][0-9A-Za-z.+-]*)?$").expect("hard-coded pattern")
});

/// Errors raised when interpreting user-supplied version bounds.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The supplied string holds no recognizable version.
    #[error("not a coercible version: {0}")]
    Uncoercible(String),
}

/// Coerce a loosely formatted version token into a normalized release version.
///
/// Coercion takes the first `major[.minor[.patch]]` digit run in the string
/// and pads missing components with zero; anything after it (pre-release,
/// build metadata) is discarded. Returns `None` when no digit run is present
/// or a component does not fit in a `u64`.
///
/// ## Examples
///
/// ```
/// use changes_lib::version::coerce;
///
/// assert_eq!(coerce("1.5").unwrap().to_string(), "1.5.0");
/// assert_eq!(coerce("v2.0.0-beta.1").unwrap().to_string(), "2.0.0");
/// assert!(coerce("not-a-version").is_none());
/// ```
pub fn coerce(raw: &str) -> Option<Version> {
    let caps = VERSION_DIGITS.captures(raw)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let patch = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    Some(Version::new(major, minor, patch))
}

/// True when the whole string reads as a single version token rather than a
/// version embedded in longer text.
///
/// ## Examples
///
/// ```
/// use changes_lib::version::is_version_token;
///
/// assert!(is_version_token("1.0"));
/// assert!(is_version_token("2.0.0-beta.1"));
/// assert!(!is_version_token("2.0.0.backup"));
/// ```
pub fn is_version_token(raw: &str) -> bool {
    VERSION_TOKEN.is_match(raw)
}

/// Compare two raw version strings for ascending changelog order.
///
/// When both coerce, `semver` ordering decides; textually distinct tokens
/// that coerce to the same release are tie-broken lexicographically so the
/// ordering stays total and deterministic. A coercible version always sorts
/// before an uncoercible one; two uncoercible strings fall back to plain
/// string comparison.
///
/// ## Examples
///
/// ```
/// use changes_lib::version::compare;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare("1.2.0", "2.0.0-beta"), Ordering::Less);
/// assert_eq!(compare("3.0.0", "not-a-version"), Ordering::Less);
/// ```
pub fn compare(a: &str, b: &str) -> Ordering {
    match (coerce(a), coerce(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Inclusive version range used to filter changelog entries.
///
/// Either bound may be absent. Containment is checked against the coerced
/// release triple, so pre-release tokens are compared inclusively against
/// the bounds instead of being excluded the way `semver::VersionReq` would.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionRange {
    min: Option<Version>,
    max: Option<Version>,
}

impl VersionRange {
    /// Build a range from raw bound strings as supplied on the command line.
    ///
    /// ## Errors
    ///
    /// Returns [`VersionError::Uncoercible`] when a supplied bound holds no
    /// recognizable version.
    ///
    /// ## Examples
    ///
    /// ```
    /// use changes_lib::version::VersionRange;
    ///
    /// let range = VersionRange::from_bounds(Some("1.1"), None).unwrap();
    /// assert!(range.is_active());
    /// assert!(VersionRange::from_bounds(Some("garbage"), None).is_err());
    /// ```
    pub fn from_bounds(min: Option<&str>, max: Option<&str>) -> Result<Self, VersionError> {
        Ok(Self {
            min: Self::coerce_bound(min)?,
            max: Self::coerce_bound(max)?,
        })
    }

    fn coerce_bound(raw: Option<&str>) -> Result<Option<Version>, VersionError> {
        match raw {
            None => Ok(None),
            Some(s) => match coerce(s) {
                Some(v) => Ok(Some(v)),
                None => Err(VersionError::Uncoercible(s.to_string())),
            },
        }
    }

    /// True when at least one bound is set.
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Inclusive containment check.
    pub fn contains(&self, version: &Version) -> bool {
        if let Some(min) = &self.min
            && version < min
        {
            return false;
        }
        if let Some(max) = &self.max
            && version > max
        {
            return false;
        }
        true
    }
}
