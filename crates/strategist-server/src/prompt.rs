//! Prompt and response schema per part
//!
//! Every prompt is the same role introduction and profile block followed by
//! one part-specific instruction. The schema constrains the model to return
//! exactly `{"<wireId>": ...}` in the shape the client validates.

use serde_json::{json, Value};
use strategist_core::{Language, PartKey, UserData};

/// Prompt and schema for one model call
#[derive(Debug, Clone, PartialEq)]
pub struct PartPrompt {
    pub part: PartKey,
    pub text: String,
    pub schema: Value,
}

impl PartPrompt {
    #[must_use]
    pub fn new(user: &UserData, language: Language, part: PartKey) -> Self {
        Self {
            part,
            text: prompt_text(user, language, part),
            schema: response_schema(part),
        }
    }
}

fn instruction(part: PartKey) -> &'static str {
    match part {
        PartKey::ExecutiveSummary => {
            "Generate a brief, high-level executive summary (3-4 sentences)."
        }
        PartKey::GoalRecommendations => {
            "For EACH of the user's goals, provide 3 actionable recommendations."
        }
        PartKey::SwotAnalysis => "Generate a SWOT analysis with 2-3 points for each category.",
        PartKey::CustomerPersona => "Generate a detailed customer persona.",
        PartKey::Timeline => {
            "Generate a 12-month roadmap with 4 quarters, each having 2-3 key actions."
        }
        PartKey::KpiProjections => {
            "Project the most relevant KPI for the next 6 months, showing a realistic upward trend."
        }
        PartKey::BudgetAllocation => {
            "Provide a budget allocation for 3-5 marketing channels. Percentages must sum to 100."
        }
        PartKey::Gamification => {
            "Provide a cool, encouraging gamification title and a single representative emoji for the user."
        }
    }
}

/// Full prompt text for `part`
#[must_use]
pub fn prompt_text(user: &UserData, language: Language, part: PartKey) -> String {
    format!(
        "Act as a world-class digital marketing strategist. Your response MUST be in {}. \
         Return ONLY the requested JSON object.\n\
         Based on this User Data:\n\
         - Industry: {} ({})\n\
         - Company Size: {}\n\
         - Goals: {}\n\
         - Challenges: {}\n\
         - Platforms: {}\n\n{}",
        language.english_name(),
        user.industry,
        user.sub_industry,
        user.company_size,
        user.goals.join(", "),
        user.challenges.join(", "),
        user.platforms.join(", "),
        instruction(part),
    )
}

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn strings() -> Value {
    json!({ "type": "ARRAY", "items": string() })
}

fn object(properties: Value) -> Value {
    json!({ "type": "OBJECT", "properties": properties })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

/// Response schema for `part`, wrapped in its wire field
#[must_use]
pub fn response_schema(part: PartKey) -> Value {
    let number = json!({ "type": "NUMBER" });
    let inner = match part {
        PartKey::ExecutiveSummary => {
            json!({ "type": "STRING", "description": "The executive summary text." })
        }
        PartKey::GoalRecommendations => array_of(object(json!({
            "goal": string(),
            "recommendations": strings(),
        }))),
        PartKey::SwotAnalysis => object(json!({
            "strengths": strings(),
            "weaknesses": strings(),
            "opportunities": strings(),
            "threats": strings(),
        })),
        PartKey::CustomerPersona => object(json!({
            "name": string(),
            "demographics": string(),
            "goals": strings(),
            "painPoints": strings(),
        })),
        PartKey::Timeline => array_of(object(json!({
            "quarter": string(),
            "focus": string(),
            "keyActions": strings(),
        }))),
        PartKey::KpiProjections => array_of(object(json!({
            "name": string(),
            "data": array_of(object(json!({ "month": string(), "value": number }))),
        }))),
        PartKey::BudgetAllocation => array_of(object(json!({
            "channel": string(),
            "percentage": number,
        }))),
        PartKey::Gamification => object(json!({
            "title": string(),
            "badgeIcon": string(),
        })),
    };

    let mut properties = serde_json::Map::new();
    properties.insert(part.wire_id().to_string(), inner);
    object(Value::Object(properties))
}
