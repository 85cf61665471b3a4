use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use recheck_types::ContentDigest;

/// Chunk size for streaming reads, in bytes.
///
/// Files are folded into the digest one chunk at a time, so a capture never
/// holds more than this much file content in memory.
pub const CHUNK_SIZE: usize = 8192;

/// Domain-separated BLAKE3 digester.
///
/// Each digester carries a domain tag (e.g., `"recheck-file-v1"`) that is
/// prepended to every digest computation. This prevents cross-type
/// collisions: a file and a manifest with identical bytes produce different
/// digests.
pub struct Digester {
    domain: &'static str,
}

impl Digester {
    /// Digester for file content.
    pub const FILE: Self = Self {
        domain: "recheck-file-v1",
    };
    /// Digester for snapshot manifests.
    pub const MANIFEST: Self = Self {
        domain: "recheck-manifest-v1",
    };

    /// Create a digester with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Digest raw bytes with domain separation.
    pub fn digest_bytes(&self, data: &[u8]) -> ContentDigest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ContentDigest::from_hash(*hasher.finalize().as_bytes())
    }

    /// Digest a reader by consuming it in [`CHUNK_SIZE`] chunks until EOF.
    ///
    /// Yields the same digest as [`digest_bytes`](Self::digest_bytes) over
    /// the concatenated content, for any chunking.
    pub fn digest_reader<R: Read>(&self, mut reader: R) -> io::Result<ContentDigest> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(ContentDigest::from_hash(*hasher.finalize().as_bytes()))
    }

    /// Digest a file's content by streaming it from disk.
    ///
    /// The file handle is released on every exit path. Errors carry the
    /// failing path.
    pub fn digest_file(&self, path: &Path) -> DigestResult<ContentDigest> {
        let file = File::open(path).map_err(|source| DigestError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let digest = self
            .digest_reader(file)
            .map_err(|source| DigestError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), digest = %digest.short_hex(), "digested file");
        Ok(digest)
    }

    /// Verify that a file's content produces the expected digest.
    pub fn verify_file(&self, path: &Path, expected: &ContentDigest) -> DigestResult<bool> {
        Ok(self.digest_file(path)? == *expected)
    }
}

/// Errors from digesting operations.
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    /// The file could not be opened or read.
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DigestError {
    /// The path the failing operation was addressing.
    pub fn path(&self) -> &Path {
        match self {
            Self::Unreadable { path, .. } => path,
        }
    }
}

/// Convenience alias for digest results.
pub type DigestResult<T> = Result<T, DigestError>;

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let data = b"analysis output";
        let d1 = Digester::FILE.digest_bytes(data);
        let d2 = Digester::FILE.digest_bytes(data);
        assert_eq!(d1, d2);
    }

    #[test]
    fn different_domains_produce_different_digests() {
        let data = b"same content";
        let file = Digester::FILE.digest_bytes(data);
        let manifest = Digester::MANIFEST.digest_bytes(data);
        assert_ne!(file, manifest);
    }

    #[test]
    fn tagged_digest_differs_from_raw_hash() {
        let data = b"same content";
        assert_ne!(
            Digester::FILE.digest_bytes(data),
            ContentDigest::from_bytes(data)
        );
    }

    #[test]
    fn custom_domain() {
        let digester = Digester::new("recheck-test-v1");
        assert_ne!(
            digester.digest_bytes(b"data"),
            Digester::FILE.digest_bytes(b"data")
        );
    }

    #[test]
    fn reader_digest_matches_bytes_digest() {
        // Spans multiple chunks with a ragged tail.
        let data: Vec<u8> = (0..CHUNK_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        let from_reader = Digester::FILE.digest_reader(Cursor::new(&data)).unwrap();
        let from_bytes = Digester::FILE.digest_bytes(&data);
        assert_eq!(from_reader, from_bytes);
    }

    #[test]
    fn empty_reader_matches_empty_bytes() {
        let from_reader = Digester::FILE.digest_reader(Cursor::new(&[])).unwrap();
        assert_eq!(from_reader, Digester::FILE.digest_bytes(b""));
    }

    #[test]
    fn digest_file_matches_bytes_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, b"run,score\n1,0.93\n").unwrap();

        let from_file = Digester::FILE.digest_file(&path).unwrap();
        assert_eq!(from_file, Digester::FILE.digest_bytes(b"run,score\n1,0.93\n"));
    }

    #[test]
    fn digest_file_missing_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");

        let err = Digester::FILE.digest_file(&path).unwrap_err();
        assert_eq!(err.path(), path.as_path());
        let DigestError::Unreadable { source, .. } = err;
        assert_eq!(source.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn verify_file_detects_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"original").unwrap();
        let expected = Digester::FILE.digest_file(&path).unwrap();

        assert!(Digester::FILE.verify_file(&path, &expected).unwrap());

        std::fs::write(&path, b"tampered").unwrap();
        assert!(!Digester::FILE.verify_file(&path, &expected).unwrap());
    }
}
