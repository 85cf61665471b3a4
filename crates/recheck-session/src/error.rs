//! Error types for session configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or querying a session configuration.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the session file failed.
    #[error("session file io at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The session file is not valid TOML for this configuration.
    #[error("invalid session file: {0}")]
    Parse(String),

    /// The API URL is not an http(s) URL.
    #[error("invalid api url: {0}")]
    InvalidApiUrl(String),

    /// Two profiles share a login.
    #[error("duplicate login: {0}")]
    DuplicateLogin(String),

    /// No profile matches the requested login or role.
    #[error("unknown profile: {0}")]
    UnknownProfile(String),
}

/// Convenience alias for session results.
pub type SessionResult<T> = Result<T, SessionError>;
