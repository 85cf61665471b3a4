use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a platform API response status.
///
/// Some endpoints reply `204 No Content` on success (the relinquish call
/// does); a client that treats every bodyless reply as an error mislabels
/// them. The outcome type makes that reply a first-class success so callers
/// match on structure instead of inspecting raw status codes at each site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiOutcome {
    /// A 2xx response carrying a body.
    Success(u16),
    /// `204 No Content`: success without a body.
    AcceptedNoContent,
    /// Any other status.
    Failed(u16),
}

impl ApiOutcome {
    /// Classify a raw HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            204 => Self::AcceptedNoContent,
            200..=299 => Self::Success(status),
            _ => Self::Failed(status),
        }
    }

    /// Returns `true` for both success variants.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// The underlying status code.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success(status) | Self::Failed(status) => *status,
            Self::AcceptedNoContent => 204,
        }
    }
}

impl fmt::Display for ApiOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(status) => write!(f, "success ({status})"),
            Self::AcceptedNoContent => write!(f, "success (204 no content)"),
            Self::Failed(status) => write!(f, "unexpected response {status}"),
        }
    }
}
