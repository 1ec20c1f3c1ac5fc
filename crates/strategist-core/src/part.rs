//! Report parts
//!
//! The strategy report is split into eight independently generated parts.
//! Each part has its own content shape; on the wire a part arrives as a JSON
//! object with a single top-level field named after the part, e.g.
//! `{"swotAnalysis": {"strengths": [...], ...}}`.
//!
//! [`PartContent::decode`] is the only way to turn an endpoint payload into
//! content, so anything that reaches the report has passed shape validation.

use crate::error::PartError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Identifier of one of the eight report parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartKey {
    ExecutiveSummary,
    GoalRecommendations,
    SwotAnalysis,
    CustomerPersona,
    Timeline,
    KpiProjections,
    BudgetAllocation,
    Gamification,
}

impl PartKey {
    /// Number of parts in a full report
    pub const COUNT: usize = 8;

    /// Every part, in request order
    pub const ALL: [PartKey; Self::COUNT] = [
        PartKey::ExecutiveSummary,
        PartKey::GoalRecommendations,
        PartKey::SwotAnalysis,
        PartKey::CustomerPersona,
        PartKey::Timeline,
        PartKey::KpiProjections,
        PartKey::BudgetAllocation,
        PartKey::Gamification,
    ];

    /// Identifier used in requests and as the payload's top-level field
    #[inline]
    #[must_use]
    pub fn wire_id(self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "executiveSummary",
            Self::GoalRecommendations => "goalRecommendations",
            Self::SwotAnalysis => "swotAnalysis",
            Self::CustomerPersona => "customerPersona",
            Self::Timeline => "timeline",
            Self::KpiProjections => "kpiProjections",
            Self::BudgetAllocation => "budgetAllocation",
            Self::Gamification => "gamification",
        }
    }

    /// Kebab-case name used for dashboard regions and metric labels
    #[inline]
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "executive-summary",
            Self::GoalRecommendations => "goal-recommendations",
            Self::SwotAnalysis => "swot-analysis",
            Self::CustomerPersona => "customer-persona",
            Self::Timeline => "timeline",
            Self::KpiProjections => "kpi-projections",
            Self::BudgetAllocation => "budget-allocation",
            Self::Gamification => "gamification",
        }
    }
}

impl Display for PartKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_id())
    }
}

impl FromStr for PartKey {
    type Err = PartError;

    /// Accepts either the wire id or the slug
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.wire_id() == s || k.slug() == s)
            .ok_or_else(|| PartError::UnknownPart(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecommendation {
    pub goal: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPersona {
    pub name: String,
    pub demographics: String,
    pub goals: Vec<String>,
    pub pain_points: Vec<String>,
}

/// One quarter of the 12-month roadmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMilestone {
    pub quarter: String,
    pub focus: String,
    pub key_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiPoint {
    pub month: String,
    pub value: f64,
}

/// Projected trend of one KPI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiProjection {
    pub name: String,
    pub data: Vec<KpiPoint>,
}

/// Share of the marketing budget for one channel, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetShare {
    pub channel: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationTitle {
    pub title: String,
    pub badge_icon: String,
}

/// Validated content of one part
#[derive(Debug, Clone, PartialEq)]
pub enum PartContent {
    ExecutiveSummary(String),
    GoalRecommendations(Vec<GoalRecommendation>),
    SwotAnalysis(SwotAnalysis),
    CustomerPersona(CustomerPersona),
    Timeline(Vec<TimelineMilestone>),
    KpiProjections(Vec<KpiProjection>),
    BudgetAllocation(Vec<BudgetShare>),
    Gamification(GamificationTitle),
}

impl PartContent {
    /// Part this content belongs to
    #[must_use]
    pub fn key(&self) -> PartKey {
        match self {
            Self::ExecutiveSummary(_) => PartKey::ExecutiveSummary,
            Self::GoalRecommendations(_) => PartKey::GoalRecommendations,
            Self::SwotAnalysis(_) => PartKey::SwotAnalysis,
            Self::CustomerPersona(_) => PartKey::CustomerPersona,
            Self::Timeline(_) => PartKey::Timeline,
            Self::KpiProjections(_) => PartKey::KpiProjections,
            Self::BudgetAllocation(_) => PartKey::BudgetAllocation,
            Self::Gamification(_) => PartKey::Gamification,
        }
    }

    /// Decode and validate an endpoint response body for `key`
    ///
    /// # Errors
    /// - `PartError::MalformedJson` if the body is not JSON
    /// - `PartError::MissingField` if the part's field is absent
    /// - `PartError::ShapeMismatch` if the field does not fit the part's shape
    pub fn decode(key: PartKey, body: &str) -> Result<Self, PartError> {
        let value: Value = serde_json::from_str(body).map_err(|e| PartError::MalformedJson {
            part: key,
            reason: e.to_string(),
        })?;
        Self::from_value(key, value)
    }

    /// Validate an already-parsed payload for `key`
    ///
    /// # Errors
    /// Same as [`PartContent::decode`], minus JSON syntax errors.
    pub fn from_value(key: PartKey, value: Value) -> Result<Self, PartError> {
        let Value::Object(mut object) = value else {
            return Err(PartError::ShapeMismatch {
                part: key,
                reason: "payload is not a JSON object".to_string(),
            });
        };
        let field = object
            .remove(key.wire_id())
            .ok_or(PartError::MissingField { part: key })?;

        let content = match key {
            PartKey::ExecutiveSummary => Self::ExecutiveSummary(shape(key, field)?),
            PartKey::GoalRecommendations => Self::GoalRecommendations(shape(key, field)?),
            PartKey::SwotAnalysis => Self::SwotAnalysis(shape(key, field)?),
            PartKey::CustomerPersona => Self::CustomerPersona(shape(key, field)?),
            PartKey::Timeline => Self::Timeline(shape(key, field)?),
            PartKey::KpiProjections => Self::KpiProjections(shape(key, field)?),
            PartKey::BudgetAllocation => Self::BudgetAllocation(shape(key, field)?),
            PartKey::Gamification => Self::Gamification(shape(key, field)?),
        };
        content.check_text()?;
        Ok(content)
    }

    /// Encode as an endpoint response body (`{"<wireId>": ...}`)
    #[must_use]
    pub fn to_wire(&self) -> Value {
        let field = match self {
            Self::ExecutiveSummary(v) => serde_json::to_value(v),
            Self::GoalRecommendations(v) => serde_json::to_value(v),
            Self::SwotAnalysis(v) => serde_json::to_value(v),
            Self::CustomerPersona(v) => serde_json::to_value(v),
            Self::Timeline(v) => serde_json::to_value(v),
            Self::KpiProjections(v) => serde_json::to_value(v),
            Self::BudgetAllocation(v) => serde_json::to_value(v),
            Self::Gamification(v) => serde_json::to_value(v),
        }
        // plain data structs with string keys always serialize
        .unwrap_or(Value::Null);

        let mut object = serde_json::Map::new();
        object.insert(self.key().wire_id().to_string(), field);
        Value::Object(object)
    }

    /// Free-text parts must not be blank
    fn check_text(&self) -> Result<(), PartError> {
        let blank = match self {
            Self::ExecutiveSummary(text) => text.trim().is_empty(),
            Self::Gamification(g) => g.title.trim().is_empty(),
            _ => false,
        };
        if blank {
            return Err(PartError::ShapeMismatch {
                part: self.key(),
                reason: "text is empty".to_string(),
            });
        }
        Ok(())
    }
}

fn shape<T: serde::de::DeserializeOwned>(key: PartKey, field: Value) -> Result<T, PartError> {
    serde_json::from_value(field).map_err(|e| PartError::ShapeMismatch {
        part: key,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_parts_are_distinct() {
        let mut ids: Vec<_> = PartKey::ALL.iter().map(|k| k.wire_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), PartKey::COUNT);
    }

    #[test]
    fn parse_wire_id_and_slug() {
        assert_eq!(
            "kpiProjections".parse::<PartKey>().unwrap(),
            PartKey::KpiProjections
        );
        assert_eq!(
            "budget-allocation".parse::<PartKey>().unwrap(),
            PartKey::BudgetAllocation
        );
        assert!(matches!(
            "focusAreas".parse::<PartKey>(),
            Err(PartError::UnknownPart(_))
        ));
    }

    #[test]
    fn serde_matches_wire_id() {
        for key in PartKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.wire_id()));
        }
    }

    #[test]
    fn decode_swot() {
        let body = json!({
            "swotAnalysis": {
                "strengths": ["agile team"],
                "weaknesses": ["small budget"],
                "opportunities": ["regional growth"],
                "threats": ["incumbents"]
            }
        })
        .to_string();

        let content = PartContent::decode(PartKey::SwotAnalysis, &body).unwrap();
        let PartContent::SwotAnalysis(swot) = content else {
            panic!("wrong variant");
        };
        assert_eq!(swot.threats, vec!["incumbents".to_string()]);
    }

    #[test]
    fn decode_ignores_extra_fields() {
        let body = r#"{"executiveSummary": "Focus on search.", "note": 1}"#;
        let content = PartContent::decode(PartKey::ExecutiveSummary, body).unwrap();
        assert_eq!(content.key(), PartKey::ExecutiveSummary);
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let err = PartContent::decode(PartKey::Timeline, "{not json").unwrap_err();
        assert!(matches!(err, PartError::MalformedJson { .. }));
    }

    #[test]
    fn decode_rejects_missing_field() {
        let err = PartContent::decode(PartKey::Timeline, r#"{"timelines": []}"#).unwrap_err();
        assert_eq!(
            err,
            PartError::MissingField {
                part: PartKey::Timeline
            }
        );
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        let body = r#"{"budgetAllocation": [{"channel": "Search", "percentage": "forty"}]}"#;
        let err = PartContent::decode(PartKey::BudgetAllocation, body).unwrap_err();
        assert!(matches!(err, PartError::ShapeMismatch { .. }));

        let err = PartContent::decode(PartKey::Timeline, "[]").unwrap_err();
        assert!(matches!(err, PartError::ShapeMismatch { .. }));
    }

    #[test]
    fn decode_rejects_blank_summary() {
        let err =
            PartContent::decode(PartKey::ExecutiveSummary, r#"{"executiveSummary": "  "}"#)
                .unwrap_err();
        assert!(matches!(err, PartError::ShapeMismatch { .. }));
    }

    #[test]
    fn wire_encoding_decodes_back() {
        let content = PartContent::Gamification(GamificationTitle {
            title: "Growth Hacker".into(),
            badge_icon: "🚀".into(),
        });
        let wire = content.to_wire();
        assert_eq!(wire["gamification"]["badgeIcon"], "🚀");
        let decoded = PartContent::from_value(PartKey::Gamification, wire).unwrap();
        assert_eq!(decoded, content);
    }
}
