//! Per-part generation errors
//!
//! Each variant's message is prefixed with the part id so that the combined
//! reasons of a total failure read as a diagnostic list.

use std::time::Duration;
use strategist_core::{PartError, PartKey};

/// Why a single part request did not produce content
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// Network-level failure
    #[error("[{part}] request failed: {reason}")]
    Transport { part: PartKey, reason: String },

    /// Endpoint answered with a non-success status
    #[error("[{part}] HTTP error {status}: {body}")]
    Status {
        part: PartKey,
        status: u16,
        body: String,
    },

    /// No answer within the per-part timeout
    #[error("[{part}] no response after {}s", .after.as_secs())]
    Timeout { part: PartKey, after: Duration },

    /// Answer did not match the part's shape
    #[error(transparent)]
    InvalidPayload(#[from] PartError),
}

impl GenerateError {
    /// Part the error belongs to
    #[must_use]
    pub fn part(&self) -> Option<PartKey> {
        match self {
            Self::Transport { part, .. } | Self::Status { part, .. } | Self::Timeout { part, .. } => {
                Some(*part)
            }
            Self::InvalidPayload(e) => e.part(),
        }
    }

    /// Whether the same request might succeed if issued again
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::InvalidPayload(_) => false,
        }
    }
}
