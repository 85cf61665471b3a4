//! Snapshot-level diff: compare two captures and partition entry names.
//!
//! Comparison is by content digest only. Capture timestamps, file sizes, and
//! root paths never influence the result, so re-comparing unchanged state
//! always yields the same diff.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use recheck_snapshot::{CaptureOptions, Snapshot};

use crate::error::DiffResult;

/// The result of comparing two snapshots.
///
/// The three sets strictly partition the changed names: every name appears
/// in at most one set, and names present in both snapshots with equal
/// digests appear in none.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    /// Names present only in the "after" snapshot.
    pub added: BTreeSet<String>,
    /// Names present only in the "before" snapshot.
    pub removed: BTreeSet<String>,
    /// Names present in both snapshots whose digests differ.
    pub modified: BTreeSet<String>,
}

impl SnapshotDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the snapshots were identical.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Total number of changed names.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

/// Compare two snapshots in memory.
///
/// Pure and infallible: both snapshots were already captured, so no I/O
/// happens here.
pub fn diff_snapshots(before: &Snapshot, after: &Snapshot) -> SnapshotDiff {
    let mut diff = SnapshotDiff::new();

    // Removed and modified entries.
    for (name, before_record) in before.iter() {
        match after.get(name) {
            Some(after_record) => {
                if before_record.digest != after_record.digest {
                    diff.modified.insert(name.to_string());
                }
            }
            None => {
                diff.removed.insert(name.to_string());
            }
        }
    }

    // Added entries.
    for (name, _) in after.iter() {
        if before.get(name).is_none() {
            diff.added.insert(name.to_string());
        }
    }

    diff
}

/// Capture both directories fresh, then diff them.
///
/// Fails without any partial result if either capture fails; a diff is only
/// returned when every file in both directories was read successfully.
pub fn compare_dirs(
    before: &Path,
    after: &Path,
    options: &CaptureOptions,
) -> DiffResult<SnapshotDiff> {
    let before_snapshot = Snapshot::capture(before, options)?;
    let after_snapshot = Snapshot::capture(after, options)?;
    let diff = diff_snapshots(&before_snapshot, &after_snapshot);
    debug!(
        added = diff.added.len(),
        removed = diff.removed.len(),
        modified = diff.modified.len(),
        "compared directories"
    );
    Ok(diff)
}

/// Check a directory against a saved manifest.
///
/// The manifest plays the "before" role: entries missing from the directory
/// are `removed`, unexpected files are `added`, digest mismatches are
/// `modified`.
pub fn check_manifest(
    manifest: &Snapshot,
    dir: &Path,
    options: &CaptureOptions,
) -> DiffResult<SnapshotDiff> {
    let current = Snapshot::capture(dir, options)?;
    Ok(diff_snapshots(manifest, &current))
}
