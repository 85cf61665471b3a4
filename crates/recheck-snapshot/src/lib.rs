//! Directory snapshot capture for Recheck.
//!
//! A [`Snapshot`] records the name, size, and content digest of every file in
//! a directory at one point in time. Snapshots are built immediately before a
//! comparison and discarded afterwards, or serialized as JSON *manifests* for
//! later integrity checks.
//!
//! Directory entries are governed by an explicit [`DirectoryPolicy`]: by
//! default subdirectories are excluded from capture entirely; with
//! [`DirectoryPolicy::Recurse`] the tree is walked and entry names become
//! `/`-separated relative paths.

pub mod error;
pub mod options;
pub mod snapshot;

pub use error::{SnapshotError, SnapshotResult};
pub use options::{CaptureOptions, DirectoryPolicy};
pub use snapshot::{FileRecord, Snapshot};
