//! Changelog aggregation for per-version Markdown files.
//!
//! `changes-lib` merges the `CHANGES-<version>.md` files in a directory into
//! a single `ALL_CHANGES--<min>-to--<max>.md` document ordered by semantic
//! version. By default an existing aggregate seeds the merge, so versions
//! without a surviving individual file are preserved; build-from-files mode
//! rebuilds from scratch instead. An optional inclusive version range
//! narrows the output.
//!
//! The [`aggregate`] module holds the pipeline; [`version`] wraps the
//! `semver` crate with the loose coercion changelog filenames need.

pub mod aggregate;
pub mod version;

pub use aggregate::{AggregateError, AggregateOptions, AggregateOutcome, ChangeSet, WriteOutcome};
pub use version::{VersionError, VersionRange};
