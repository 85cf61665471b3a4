//! Snapshot capture: walk a directory, digest every file, record the result.
//!
//! Capture is all-or-nothing. If any entry cannot be listed, classified, or
//! read, the whole capture fails with the offending path; a snapshot never
//! silently omits files it was asked to record.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use recheck_digest::Digester;
use recheck_types::ContentDigest;

use crate::error::{SnapshotError, SnapshotResult};
use crate::options::{CaptureOptions, DirectoryPolicy};

/// Size and content digest of one captured file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Digest of the file's content.
    pub digest: ContentDigest,
    /// File size in bytes at listing time.
    pub size: u64,
}

/// The digested state of a directory at one point in time.
///
/// Entries are keyed by name: the bare file name for a flat capture, a
/// `/`-separated relative path for a recursive one. Names are the lossy
/// Unicode form of the underlying OS string.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    root: PathBuf,
    captured_at: DateTime<Utc>,
    entries: BTreeMap<String, FileRecord>,
}

impl Snapshot {
    /// Capture a snapshot of `root`.
    pub fn capture(root: &Path, options: &CaptureOptions) -> SnapshotResult<Self> {
        Self::capture_with_progress(root, options, |_, _, _| {})
    }

    /// Capture a snapshot, invoking `observer(done, total, name)` after each
    /// file is digested.
    ///
    /// Files are digested in name order, so observer calls are deterministic
    /// for a given directory state.
    pub fn capture_with_progress(
        root: &Path,
        options: &CaptureOptions,
        mut observer: impl FnMut(usize, usize, &str),
    ) -> SnapshotResult<Self> {
        let meta = fs::metadata(root).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                SnapshotError::NotFound(root.to_path_buf())
            } else {
                SnapshotError::Unreadable {
                    path: root.to_path_buf(),
                    source,
                }
            }
        })?;
        if !meta.is_dir() {
            return Err(SnapshotError::NotADirectory(root.to_path_buf()));
        }

        let listed = match options.directories {
            DirectoryPolicy::Exclude => list_flat(root)?,
            DirectoryPolicy::Recurse => list_recursive(root)?,
        };

        let captured_at = Utc::now();
        let total = listed.len();
        let mut entries = BTreeMap::new();
        for (done, (name, path, size)) in listed.into_iter().enumerate() {
            let digest = Digester::FILE.digest_file(&path)?;
            entries.insert(name.clone(), FileRecord { digest, size });
            observer(done + 1, total, &name);
        }

        debug!(root = %root.display(), files = entries.len(), "captured snapshot");
        Ok(Self {
            root: root.to_path_buf(),
            captured_at,
            entries,
        })
    }

    /// Build a snapshot from pre-computed entries.
    ///
    /// For synthetic manifests; captures of real directories go through
    /// [`Snapshot::capture`].
    pub fn from_entries(root: impl Into<PathBuf>, entries: BTreeMap<String, FileRecord>) -> Self {
        Self {
            root: root.into(),
            captured_at: Utc::now(),
            entries,
        }
    }

    /// The directory this snapshot was captured from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// When the capture ran.
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Number of captured files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no files were captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a file record by entry name.
    pub fn get(&self, name: &str) -> Option<&FileRecord> {
        self.entries.get(name)
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileRecord)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    /// Digest over the sorted `(name, digest, size)` entries.
    ///
    /// Depends only on the captured content set: identical file sets yield
    /// identical manifest digests regardless of capture time or root path.
    pub fn manifest_digest(&self) -> ContentDigest {
        let mut buf = Vec::new();
        for (name, record) in &self.entries {
            buf.extend_from_slice(name.as_bytes());
            buf.push(0);
            buf.extend_from_slice(record.digest.as_bytes());
            buf.extend_from_slice(&record.size.to_le_bytes());
            buf.push(b'\n');
        }
        Digester::MANIFEST.digest_bytes(&buf)
    }

    /// Serialize to a pretty-printed JSON manifest.
    pub fn to_json(&self) -> SnapshotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Manifest(e.to_string()))
    }

    /// Parse a snapshot from a JSON manifest.
    pub fn from_json(json: &str) -> SnapshotResult<Self> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Manifest(e.to_string()))
    }

    /// Write the manifest to a file.
    pub fn save(&self, path: &Path) -> SnapshotResult<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SnapshotError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a manifest from a file.
    pub fn load(path: &Path) -> SnapshotResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| SnapshotError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// List regular files directly under `root`, sorted by name.
///
/// Classification follows `fs::metadata`, so symlinks are resolved: a link
/// to a file is listed as a file, a link to a directory as a directory.
fn list_flat(root: &Path) -> SnapshotResult<Vec<(String, PathBuf, u64)>> {
    let read_dir = fs::read_dir(root).map_err(|source| SnapshotError::Unreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut listed = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| SnapshotError::Unreadable {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let meta = fs::metadata(&path).map_err(|source| SnapshotError::Unreadable {
            path: path.clone(),
            source,
        })?;
        if !meta.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        listed.push((name, path, meta.len()));
    }
    listed.sort();
    Ok(listed)
}

/// List every regular file under `root`, sorted by relative name.
fn list_recursive(root: &Path) -> SnapshotResult<Vec<(String, PathBuf, u64)>> {
    let mut listed = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).min_depth(1) {
        let entry = entry.map_err(|err| walk_error(root, err))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let meta = entry.metadata().map_err(|err| walk_error(root, err))?;
        let name = relative_name(root, entry.path());
        listed.push((name, entry.path().to_path_buf(), meta.len()));
    }
    listed.sort();
    Ok(listed)
}

fn relative_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}

fn walk_error(root: &Path, err: walkdir::Error) -> SnapshotError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("directory walk failed"));
    SnapshotError::Unreadable { path, source }
}
