//! Testing utilities for Strategist workspace
//!
//! Shared fixtures and a scripted part generator.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use strategist_aggregation::{GenerateError, GenerationRequest, PartGenerator};
use strategist_core::{
    BasicInfo, BudgetShare, CustomerPersona, GamificationTitle, GoalRecommendation, KpiPoint,
    KpiProjection, Language, PartContent, PartKey, Profile, ProfileDraft, SwotAnalysis,
    TimelineMilestone, UserData,
};

pub fn sample_basic_info() -> BasicInfo {
    BasicInfo {
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        industry: "tech".into(),
        sub_industry: "saas".into(),
        company_size: "startup".into(),
    }
}

fn keys(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Draft with every step filled
pub fn draft_with(goals: &[&str], challenges: &[&str], platforms: &[&str]) -> ProfileDraft {
    ProfileDraft {
        basic: sample_basic_info(),
        goals: keys(goals),
        challenges: keys(challenges),
        platforms: keys(platforms),
    }
}

/// Four goals, one challenge: not a master strategist
pub fn sample_profile() -> Profile {
    draft_with(
        &["awareness", "leads", "conversion", "engagement"],
        &["budget"],
        &["linkedin", "google"],
    )
    .finalize()
    .unwrap()
}

/// Three goals, three challenges: earns the compound badge
pub fn master_profile() -> Profile {
    draft_with(
        &["awareness", "leads", "sales"],
        &["budget", "competition", "talent"],
        &["instagram"],
    )
    .finalize()
    .unwrap()
}

/// Profile with raw keys in place of display text
pub fn sample_user_data() -> UserData {
    sample_profile().to_user_data(|_, key| key.to_string())
}

pub fn sample_request() -> GenerationRequest {
    GenerationRequest::new(sample_user_data(), Language::En)
}

/// Valid content for one part
pub fn sample_content(part: PartKey) -> PartContent {
    match part {
        PartKey::ExecutiveSummary => {
            PartContent::ExecutiveSummary("Lead with search, retain with email.".into())
        }
        PartKey::GoalRecommendations => PartContent::GoalRecommendations(vec![GoalRecommendation {
            goal: "Lead Generation".into(),
            recommendations: vec![
                "Gate the pricing guide".into(),
                "Run a webinar series".into(),
            ],
        }]),
        PartKey::SwotAnalysis => PartContent::SwotAnalysis(SwotAnalysis {
            strengths: vec!["Fast team".into()],
            weaknesses: vec!["Thin budget".into()],
            opportunities: vec!["New region".into()],
            threats: vec!["Incumbents".into()],
        }),
        PartKey::CustomerPersona => PartContent::CustomerPersona(CustomerPersona {
            name: "Ops Omar".into(),
            demographics: "35-44, operations lead".into(),
            goals: vec!["Fewer tools".into()],
            pain_points: vec!["Manual reporting".into()],
        }),
        PartKey::Timeline => PartContent::Timeline(
            ["Q1", "Q2", "Q3", "Q4"]
                .into_iter()
                .map(|quarter| TimelineMilestone {
                    quarter: quarter.into(),
                    focus: "Foundations".into(),
                    key_actions: vec!["Audit tracking".into()],
                })
                .collect(),
        ),
        PartKey::KpiProjections => PartContent::KpiProjections(vec![KpiProjection {
            name: "Qualified leads".into(),
            data: vec![
                KpiPoint {
                    month: "Jan".into(),
                    value: 40.0,
                },
                KpiPoint {
                    month: "Feb".into(),
                    value: 55.0,
                },
            ],
        }]),
        PartKey::BudgetAllocation => PartContent::BudgetAllocation(vec![
            BudgetShare {
                channel: "Search".into(),
                percentage: 60.0,
            },
            BudgetShare {
                channel: "LinkedIn".into(),
                percentage: 40.0,
            },
        ]),
        PartKey::Gamification => PartContent::Gamification(GamificationTitle {
            title: "Pipeline Pilot".into(),
            badge_icon: "🧭".into(),
        }),
    }
}

/// Valid content for all eight parts, in request order
pub fn full_content_set() -> Vec<PartContent> {
    PartKey::ALL.into_iter().map(sample_content).collect()
}

/// Endpoint response body for one part
pub fn sample_body(part: PartKey) -> String {
    sample_content(part).to_wire().to_string()
}

/// Scripted answer for one part
#[derive(Debug, Clone)]
pub enum Script {
    /// Return this body
    Body(String),
    /// Fail with this error
    Fail(GenerateError),
    /// Never answer
    Hang,
}

#[derive(Debug, Clone)]
struct Entry {
    delay: Duration,
    script: Script,
}

/// [`PartGenerator`] answering from a per-part script
///
/// Unscripted parts answer immediately with [`sample_body`].
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    entries: HashMap<PartKey, Entry>,
    calls: Mutex<Vec<PartKey>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every part fails with an HTTP 500
    pub fn all_failing() -> Self {
        PartKey::ALL
            .into_iter()
            .fold(Self::new(), |g, part| g.fail_status(part, 500))
    }

    pub fn script(mut self, part: PartKey, delay: Duration, script: Script) -> Self {
        self.entries.insert(part, Entry { delay, script });
        self
    }

    pub fn respond_after(self, part: PartKey, delay: Duration) -> Self {
        self.script(part, delay, Script::Body(sample_body(part)))
    }

    pub fn body(self, part: PartKey, body: impl Into<String>) -> Self {
        self.script(part, Duration::ZERO, Script::Body(body.into()))
    }

    pub fn fail_status(self, part: PartKey, status: u16) -> Self {
        self.script(
            part,
            Duration::ZERO,
            Script::Fail(GenerateError::Status {
                part,
                status,
                body: format!(r#"{{"error":"Failed to generate plan part '{part}'."}}"#),
            }),
        )
    }

    pub fn hang(self, part: PartKey) -> Self {
        self.script(part, Duration::ZERO, Script::Hang)
    }

    /// Parts requested so far, in call order
    pub fn calls(&self) -> Vec<PartKey> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PartGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _request: &GenerationRequest,
        part: PartKey,
    ) -> Result<String, GenerateError> {
        self.calls.lock().push(part);

        let Some(entry) = self.entries.get(&part).cloned() else {
            return Ok(sample_body(part));
        };

        if !entry.delay.is_zero() {
            tokio::time::sleep(entry.delay).await;
        }

        match entry.script {
            Script::Body(body) => Ok(body),
            Script::Fail(err) => Err(err),
            Script::Hang => std::future::pending().await,
        }
    }
}
