//! HTTP part generator
//!
//! Posts `{userData, language, part}` as JSON to the generation endpoint and
//! returns the body of a 2xx answer.

use crate::error::GenerateError;
use crate::generator::{GenerationRequest, PartGenerator};
use async_trait::async_trait;
use strategist_core::PartKey;

/// [`PartGenerator`] backed by the HTTP generation endpoint
#[derive(Debug, Clone)]
pub struct HttpPartGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPartGenerator {
    /// Create a generator with a fresh client
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Create a generator sharing an existing client
    #[inline]
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PartGenerator for HttpPartGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
        part: PartKey,
    ) -> Result<String, GenerateError> {
        let transport = |e: reqwest::Error| GenerateError::Transport {
            part,
            reason: e.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request.for_part(part))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(GenerateError::Status {
                part,
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
