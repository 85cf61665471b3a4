use serde::{Deserialize, Serialize};

use recheck_types::RunId;

/// Lifecycle state of the operation a progress event reports on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressState {
    /// Work is waiting to start.
    Queued,
    /// Work is underway.
    Active,
    /// Work finished successfully.
    Success,
    /// Work failed.
    Error,
}

impl std::fmt::Display for ProgressState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::Active => "active",
            Self::Success => "success",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// A single progress report flowing through the bus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// The run this event belongs to.
    pub run: RunId,
    /// Lifecycle state of the reporting operation.
    pub state: ProgressState,
    /// Human-readable description of the current step.
    pub message: String,
    /// Units of work completed so far.
    pub current: u64,
    /// Total units of work, `0` if unknown.
    pub total: u64,
}

impl ProgressEvent {
    /// Build a new progress event.
    pub fn new(
        run: RunId,
        state: ProgressState,
        message: impl Into<String>,
        current: u64,
        total: u64,
    ) -> Self {
        Self {
            run,
            state,
            message: message.into(),
            current,
            total,
        }
    }

    /// Completion percentage, clamped to 0..=100.
    ///
    /// Returns `0` when the total is unknown rather than dividing by zero.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let p = self.current.saturating_mul(100) / self.total;
        p.min(100) as u8
    }
}
