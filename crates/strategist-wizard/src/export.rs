//! Document export
//!
//! [`DocumentExporter`] turns a completed report into a downloadable
//! document. [`MarkdownExporter`] is the bundled implementation; anything that
//! rasterises the dashboard plugs in behind the same trait.

use crate::assembly::CompletionSnapshot;
use crate::error::ExportError;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strategist_core::{GamificationLedger, Language, PartialReport, Profile};
use strategist_i18n::Translator;

/// Everything an exporter may read
#[derive(Debug, Clone, Copy)]
pub struct ExportContext<'a> {
    pub profile: &'a Profile,
    pub ledger: &'a GamificationLedger,
    pub snapshot: &'a CompletionSnapshot,
    pub language: Language,
}

/// Rendered document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    /// Write into `dir` under the document's file name
    ///
    /// # Errors
    /// `ExportError::Io` if the file cannot be written.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes).map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }
}

/// Renders a completed report
pub trait DocumentExporter: Send + Sync {
    /// Render the snapshot
    ///
    /// # Errors
    /// Implementation specific.
    fn export(&self, context: &ExportContext<'_>) -> Result<ExportedDocument, ExportError>;
}

/// `Strategic-Plan-<name>.<extension>` with path separators replaced
#[must_use]
pub fn document_name(name: &str, extension: &str) -> String {
    let safe: String = name
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("Strategic-Plan-{safe}.{extension}")
}

/// Markdown rendering of the report, with headings in the session language
pub struct MarkdownExporter {
    translator: Arc<dyn Translator>,
}

impl std::fmt::Debug for MarkdownExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownExporter").finish_non_exhaustive()
    }
}

impl MarkdownExporter {
    #[must_use]
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    fn render(&self, context: &ExportContext<'_>) -> Result<String, std::fmt::Error> {
        let lang = context.language;
        let t = |key: &str| self.translator.translate(lang, key, &[]);
        let report: &PartialReport = &context.snapshot.report;
        let mut out = String::new();

        writeln!(
            out,
            "# {}\n",
            self.translator
                .translate(lang, "summary.title", &[("name", context.profile.name())])
        )?;

        let ledger = context.ledger;
        writeln!(out, "**{}**: {}  ", t("summary.gamification"), ledger.title())?;
        writeln!(out, "**{}**: {}  ", t("summary.points"), ledger.points())?;
        let badges: Vec<&str> = ledger.badges().iter().map(|b| b.name()).collect();
        writeln!(out, "**{}**: {}\n", t("summary.badges"), badges.join(", "))?;

        if let Some(summary) = report.executive_summary() {
            writeln!(out, "## {}\n\n{summary}\n", t("summary.executiveSummary"))?;
        }

        if let Some(goals) = report.goal_recommendations() {
            writeln!(out, "## {}\n", t("summary.goalRecommendations"))?;
            for goal in goals {
                writeln!(out, "### {}\n", goal.goal)?;
                for rec in &goal.recommendations {
                    writeln!(out, "- {rec}")?;
                }
                out.push('\n');
            }
        }

        if let Some(swot) = report.swot_analysis() {
            writeln!(out, "## {}\n", t("summary.swotAnalysis"))?;
            for (key, items) in [
                ("summary.strengths", &swot.strengths),
                ("summary.weaknesses", &swot.weaknesses),
                ("summary.opportunities", &swot.opportunities),
                ("summary.threats", &swot.threats),
            ] {
                writeln!(out, "### {}\n", t(key))?;
                for item in items {
                    writeln!(out, "- {item}")?;
                }
                out.push('\n');
            }
        }

        if let Some(persona) = report.customer_persona() {
            writeln!(out, "## {}: {}\n", t("summary.customerPersona"), persona.name)?;
            writeln!(out, "**{}**: {}\n", t("summary.demographics"), persona.demographics)?;
            writeln!(out, "### {}\n", t("summary.personaGoals"))?;
            for goal in &persona.goals {
                writeln!(out, "- {goal}")?;
            }
            writeln!(out, "\n### {}\n", t("summary.painPoints"))?;
            for pain in &persona.pain_points {
                writeln!(out, "- {pain}")?;
            }
            out.push('\n');
        }

        if let Some(timeline) = report.timeline() {
            writeln!(out, "## {}\n", t("summary.timeline"))?;
            for milestone in timeline {
                writeln!(out, "### {}: {}\n", milestone.quarter, milestone.focus)?;
                for action in &milestone.key_actions {
                    writeln!(out, "- {action}")?;
                }
                out.push('\n');
            }
        }

        if let Some(kpis) = report.kpi_projections() {
            writeln!(out, "## {}\n", t("summary.kpiProjections"))?;
            for kpi in kpis {
                let months: Vec<&str> = kpi.data.iter().map(|p| p.month.as_str()).collect();
                let values: Vec<String> = kpi.data.iter().map(|p| p.value.to_string()).collect();
                writeln!(out, "### {}\n", kpi.name)?;
                writeln!(out, "| {} |", months.join(" | "))?;
                writeln!(out, "|{}", "---|".repeat(months.len()))?;
                writeln!(out, "| {} |\n", values.join(" | "))?;
            }
        }

        if let Some(budget) = report.budget_allocation() {
            writeln!(out, "## {}\n", t("summary.budget"))?;
            for share in budget {
                writeln!(out, "- {}: {}%", share.channel, share.percentage)?;
            }
            out.push('\n');
        }

        if let Some(title) = report.gamification() {
            writeln!(out, "---\n\n{} {}", title.badge_icon, title.title)?;
        }

        Ok(out)
    }
}

impl DocumentExporter for MarkdownExporter {
    fn export(&self, context: &ExportContext<'_>) -> Result<ExportedDocument, ExportError> {
        let text = self
            .render(context)
            .map_err(|e| ExportError::Render(e.to_string()))?;
        Ok(ExportedDocument {
            file_name: document_name(context.profile.name(), "md"),
            media_type: "text/markdown",
            bytes: text.into_bytes(),
        })
    }
}
