//! Strategist Server
//!
//! Server side of the part-generation protocol and the `strategist` CLI:
//! - `POST /api/generate-summary`: one part per request, prompt and response
//!   schema chosen by the part identifier
//! - [`ContentModel`] seam with a Gemini REST implementation
//! - TOML + environment configuration; the credential comes from `API_KEY` only
//! - Headless wizard runs against any endpoint ([`run_plan`])

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod model;
pub mod plan;
pub mod prompt;
pub mod routes;

pub use config::{ApiKey, ServerConfig};
pub use error::{ConfigError, ModelError, ServeError, ServerError};
pub use model::{ContentModel, GeminiClient};
pub use plan::{run_plan, ConsoleRenderer, PlanError, PlanOptions, PlanProfile, PlanSummary};
pub use prompt::PartPrompt;
pub use routes::{router, serve, serve_on, AppState, GENERATE_PATH};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
