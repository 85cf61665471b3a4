use std::fmt;

use serde::{Deserialize, Serialize};

/// Role a participant plays in a review session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Coordinates the review and controls access.
    Editor,
    /// Submits the working set under review.
    Author,
    /// Re-runs the computation and compares results.
    Verifier,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Editor => "editor",
            Self::Author => "author",
            Self::Verifier => "verifier",
        };
        write!(f, "{s}")
    }
}

/// An opaque platform token.
///
/// The value never appears in `Debug` or `Display` output; call
/// [`expose`](ApiToken::expose) where the raw value is genuinely needed
/// (e.g. building a request header).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a raw token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the token is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken(****)")
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken(****)")
    }
}

impl From<String> for ApiToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ApiToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One participant in a review session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Platform login.
    pub login: String,
    /// Role in the review.
    pub role: Role,
    /// Platform token, if one has been issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<ApiToken>,
}

impl Profile {
    /// Create a profile without a token.
    pub fn new(login: impl Into<String>, role: Role) -> Self {
        Self {
            login: login.into(),
            role,
            token: None,
        }
    }

    /// Attach a token.
    pub fn with_token(mut self, token: impl Into<ApiToken>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Returns `true` if a non-empty token is attached.
    pub fn has_token(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_empty())
    }
}
