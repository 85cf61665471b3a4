//! Capture options, including the directory-entry policy.

use serde::{Deserialize, Serialize};

/// How directory entries inside the snapshot root are handled.
///
/// The policy is explicit so that callers choose, rather than inherit, what a
/// "file set" means for their review.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectoryPolicy {
    /// Subdirectories are excluded from capture. Only regular files directly
    /// under the root (including symlinks that resolve to files) appear in
    /// the snapshot, and a directory entry can never show up in a diff.
    #[default]
    Exclude,
    /// Walk into subdirectories. Every regular file in the tree is captured;
    /// entry names become `/`-separated paths relative to the root.
    Recurse,
}

/// Options controlling a snapshot capture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Directory-entry handling.
    pub directories: DirectoryPolicy,
}

impl CaptureOptions {
    /// Options that walk into subdirectories.
    pub fn recursive() -> Self {
        Self {
            directories: DirectoryPolicy::Recurse,
        }
    }
}
