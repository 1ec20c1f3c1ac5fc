//! Strategist Core
//!
//! Domain model shared by every other crate in the workspace:
//! - Fixed business taxonomy (industries, goals, platforms, ...)
//! - Profile drafting, validation and finalization
//! - The eight report parts, their content shapes and payload validation
//! - The partial report and its idempotent, order-independent merge
//! - The gamification ledger
//!
//! # Example
//!
//! ```rust,ignore
//! use strategist_core::{PartContent, PartKey, PartialReport};
//!
//! let mut report = PartialReport::new();
//! let body = r#"{"executiveSummary": "Grow through paid search."}"#;
//! let content = PartContent::decode(PartKey::ExecutiveSummary, body)?;
//! report.merge(content);
//! assert!(!report.is_complete());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod language;
pub mod ledger;
pub mod part;
pub mod profile;
pub mod report;
pub mod taxonomy;
pub mod wire;

pub use error::{PartError, ProfileError};
pub use language::Language;
pub use ledger::{Badge, GamificationLedger, DEFAULT_TITLE};
pub use part::{
    BudgetShare, CustomerPersona, GamificationTitle, GoalRecommendation, KpiPoint, KpiProjection,
    PartContent, PartKey, SwotAnalysis, TimelineMilestone,
};
pub use profile::{BasicInfo, Profile, ProfileDraft, UserData};
pub use report::{AggregateFailure, AggregationOutcome, MergeOutcome, PartFailure, PartialReport};
pub use taxonomy::TaxonomyGroup;
pub use wire::PartRequest;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
