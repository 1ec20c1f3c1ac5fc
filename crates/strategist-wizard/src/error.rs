//! Error types for the wizard
//!
//! Covers:
//! - submissions made at the wrong step
//! - profile validation failures
//! - actions gated on a complete report
//! - aggregation tasks that did not run to settlement
//! - document export failures

use crate::step::WizardStep;
use strategist_core::ProfileError;

/// Main wizard error type
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Submission does not belong to the current step
    #[error("cannot submit {submitted} while at {current}")]
    WrongStep {
        submitted: WizardStep,
        current: WizardStep,
    },

    /// Submitted answers failed validation
    #[error("invalid profile: {0}")]
    Profile(#[from] ProfileError),

    /// Export or booking requested before all parts arrived
    #[error("report incomplete: {missing} of 8 parts missing")]
    ReportIncomplete { missing: usize },

    /// Dashboard action requested with no cycle running
    #[error("no active aggregation cycle")]
    NoActiveCycle,

    /// Aggregation task panicked or was aborted
    #[error("aggregation task failed: {0}")]
    CycleAborted(String),

    /// Document rendering failed
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

/// Document rendering error
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("renderer failed: {0}")]
    Render(String),
}
