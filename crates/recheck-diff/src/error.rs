//! Error types for the diff crate.

use recheck_snapshot::SnapshotError;

/// Errors that can occur during directory comparison.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Snapshot capture or manifest loading failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
