//! Generative model client
//!
//! [`ContentModel`] is the seam the endpoint calls; [`GeminiClient`] talks to
//! the Gemini `generateContent` REST API with a JSON response schema.

use crate::config::{ApiKey, ServerConfig};
use crate::error::ModelError;
use crate::prompt::PartPrompt;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Produces the JSON text for one prompt
#[async_trait]
pub trait ContentModel: Send + Sync {
    /// Return the model's JSON text verbatim
    async fn generate(&self, prompt: &PartPrompt) -> Result<String, ModelError>;
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    text: Option<String>,
}

/// Gemini REST client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    url: String,
    api_key: ApiKey,
}

impl GeminiClient {
    /// Client for `config.model` under `config.api_base`
    ///
    /// # Errors
    /// `ModelError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &ServerConfig, api_key: ApiKey) -> Result<Self, ModelError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: format!(
                "{}/models/{}:generateContent",
                config.api_base.trim_end_matches('/'),
                config.model
            ),
            api_key,
        })
    }

    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ContentModel for GeminiClient {
    async fn generate(&self, prompt: &PartPrompt) -> Result<String, ModelError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt.text }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": prompt.schema,
            },
        });

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ModelError::Empty)
    }
}
