//! Strategist onboarding wizard
//!
//! Drives a user from the welcome screen to the generated dashboard:
//! - [`WizardStep`]: the six-step sequence and the badge each submission earns
//! - [`WizardSession`]: profile draft, ledger, language and the current cycle
//! - [`ReportAssembly`]: cycle-tagged partial report with a completion snapshot
//! - [`DashboardRenderer`]: per-region updates for whatever draws the dashboard
//! - [`DocumentExporter`] and [`ConsultationRequest`]: actions gated on a
//!   complete report
//!
//! # Example
//!
//! ```rust,ignore
//! use strategist_wizard::{NullRenderer, WizardConfig, WizardSession};
//!
//! let mut session = WizardSession::with_http(WizardConfig::new(), translator, Box::new(NullRenderer));
//! session.start()?;
//! session.submit_basic_info(info)?;
//! session.submit_goals(goals)?;
//! session.submit_platforms(platforms)?;
//! session.submit_challenges(challenges)?;
//! session.settle().await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod assembly;
pub mod booking;
pub mod config;
pub mod error;
pub mod export;
pub mod render;
pub mod session;
pub mod step;

pub use assembly::{Applied, CompletionSnapshot, ReportAssembly};
pub use booking::ConsultationRequest;
pub use config::{BookingConfig, WizardConfig};
pub use error::{ExportError, WizardError};
pub use export::{document_name, DocumentExporter, ExportContext, ExportedDocument, MarkdownExporter};
pub use render::{regions, DashboardRenderer, NullRenderer, RegionState};
pub use session::{BookingLinks, WizardSession};
pub use step::WizardStep;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
