//! Snapshot comparison for Recheck.
//!
//! Compares two directory snapshots by entry name and content digest,
//! partitioning names into added, removed, and modified sets.
//!
//! # Key Types
//!
//! - [`SnapshotDiff`] -- The three disjoint name sets of a comparison
//! - [`diff_snapshots`] -- Pure in-memory comparison of two snapshots
//! - [`compare_dirs`] -- Capture two directories fresh, then diff them
//! - [`check_manifest`] -- Integrity check of a directory against a manifest

pub mod error;
pub mod snapshot_diff;

pub use error::{DiffError, DiffResult};
pub use snapshot_diff::{check_manifest, compare_dirs, diff_snapshots, SnapshotDiff};
