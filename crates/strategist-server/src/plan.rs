//! Headless wizard run
//!
//! Walks a [`WizardSession`] through every step with the answers from a
//! profile file, waits for the aggregation cycle to settle and, when the
//! report is complete, writes the exported document.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strategist_aggregation::AggregationConfig;
use strategist_core::{
    AggregateFailure, AggregationOutcome, BasicInfo, Language, PartContent, PartKey,
};
use strategist_i18n::{Catalog, I18nError};
use strategist_wizard::{
    DashboardRenderer, ExportError, MarkdownExporter, WizardConfig, WizardError, WizardSession,
};
use tracing::info;

/// Wizard answers, as read from a TOML profile file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanProfile {
    pub name: String,
    pub email: String,
    pub industry: String,
    pub sub_industry: String,
    pub company_size: String,
    pub goals: Vec<String>,
    pub platforms: Vec<String>,
    pub challenges: Vec<String>,
}

impl PlanProfile {
    /// # Errors
    /// `PlanError::Profile` on invalid TOML or missing fields.
    pub fn from_toml(text: &str, origin: &str) -> Result<Self, PlanError> {
        toml::from_str(text).map_err(|e| PlanError::Profile {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// # Errors
    /// Unreadable file or invalid contents.
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| PlanError::Read {
            path: origin.clone(),
            source,
        })?;
        Self::from_toml(&text, &origin)
    }

    fn basic_info(&self) -> BasicInfo {
        BasicInfo {
            name: self.name.clone(),
            email: self.email.clone(),
            industry: self.industry.clone(),
            sub_industry: self.sub_industry.clone(),
            company_size: self.company_size.clone(),
        }
    }
}

/// Headless run failure
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("failed to read profile {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile {path}: {reason}")]
    Profile { path: String, reason: String },

    #[error(transparent)]
    I18n(#[from] I18nError),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// How to run the wizard
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub language: Language,
    pub aggregation: AggregationConfig,
    /// Directory for the exported document; nothing is written when unset
    pub out_dir: Option<PathBuf>,
}

/// Result of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    pub outcome: AggregationOutcome,
    pub arrived: Vec<PartKey>,
    pub points: u32,
    pub title: String,
    /// Path of the written document, if the report completed and a directory was given
    pub document: Option<PathBuf>,
}

/// Drive the wizard to the dashboard and wait for the cycle to settle
///
/// # Errors
/// A rejected answer, a cycle that could not be joined, or an export write failure.
/// Part failures are not errors; they show up in [`PlanSummary::outcome`].
pub async fn run_plan(
    profile: &PlanProfile,
    options: &PlanOptions,
    renderer: Box<dyn DashboardRenderer>,
) -> Result<PlanSummary, PlanError> {
    let catalog = Arc::new(Catalog::bundled()?);
    let config = WizardConfig::new()
        .with_language(options.language)
        .with_aggregation(options.aggregation.clone());
    let mut session = WizardSession::with_http(config, catalog.clone(), renderer);

    session.start()?;
    session.submit_basic_info(profile.basic_info())?;
    session.submit_goals(profile.goals.clone())?;
    session.submit_platforms(profile.platforms.clone())?;
    session.submit_challenges(profile.challenges.clone())?;

    let report = session.settle().await?;
    let outcome = session.outcome().unwrap_or(AggregationOutcome::Pending);

    let document = match (&outcome, &options.out_dir) {
        (AggregationOutcome::Complete, Some(dir)) => {
            let exported = session.export(&MarkdownExporter::new(catalog))?;
            let path = exported.write_to(dir)?;
            info!("Wrote {}", path.display());
            Some(path)
        }
        _ => None,
    };

    Ok(PlanSummary {
        outcome,
        arrived: report.arrived,
        points: session.ledger().points(),
        title: session.ledger().title().to_string(),
        document,
    })
}

/// Prints dashboard updates to stdout
#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    ready: usize,
}

impl DashboardRenderer for ConsoleRenderer {
    fn cycle_started(&mut self) {
        self.ready = 0;
        println!("Generating your strategy ({} parts)...", PartKey::COUNT);
    }

    fn region_ready(&mut self, part: PartKey, content: &PartContent) {
        self.ready += 1;
        let detail = match content {
            PartContent::ExecutiveSummary(text) => text.clone(),
            PartContent::Gamification(g) => format!("{} {}", g.badge_icon, g.title),
            other => other.to_wire().to_string(),
        };
        println!("[{}/{}] {part}: {detail}", self.ready, PartKey::COUNT);
    }

    fn actions_enabled(&mut self) {
        println!("All parts ready; export and booking are available.");
    }

    fn all_failed(&mut self, failure: &AggregateFailure) {
        eprintln!("Could not generate your strategy: {failure}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"
name = "Ada Lovelace"
email = "ada@example.com"
industry = "tech"
sub_industry = "saas"
company_size = "startup"
goals = ["leads", "awareness"]
platforms = ["google"]
challenges = ["budget"]
"#;

    #[test]
    fn parses_profile_file() {
        let profile = PlanProfile::from_toml(PROFILE, "inline").unwrap();
        assert_eq!(profile.goals, vec!["leads", "awareness"]);
        assert_eq!(profile.basic_info().sub_industry, "saas");
    }

    #[test]
    fn missing_answers_are_rejected() {
        let err = PlanProfile::from_toml("name = \"Ada\"\n", "inline").unwrap_err();
        assert!(matches!(err, PlanError::Profile { .. }));
    }
}
