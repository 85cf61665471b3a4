//! Error types for snapshot capture and persistence.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use recheck_digest::DigestError;

/// Errors that can occur while capturing or persisting snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot root does not exist.
    #[error("directory not found: {0}")]
    NotFound(PathBuf),

    /// The snapshot root exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A listing, metadata lookup, or file read failed.
    ///
    /// Any unreadable entry fails the whole capture; no partial snapshot is
    /// ever returned.
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or writing a manifest file failed.
    #[error("manifest io at {path}: {source}")]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Manifest serialization or deserialization failed.
    #[error("manifest error: {0}")]
    Manifest(String),
}

impl From<DigestError> for SnapshotError {
    fn from(err: DigestError) -> Self {
        match err {
            DigestError::Unreadable { path, source } => Self::Unreadable { path, source },
        }
    }
}

/// Convenience alias for snapshot results.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
