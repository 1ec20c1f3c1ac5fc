//! Content-generation seam
//!
//! Implement [`PartGenerator`] to define how a single part is fetched. The
//! protocol owns decoding and validation, so implementations only return the
//! raw response body.

use crate::error::GenerateError;
use async_trait::async_trait;
use strategist_core::{Language, PartKey, PartRequest, UserData};

/// Inputs shared by every part request of one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Profile with taxonomy keys already translated to display text
    pub user_data: UserData,
    /// Language the content must be written in
    pub language: Language,
}

impl GenerationRequest {
    #[inline]
    #[must_use]
    pub fn new(user_data: UserData, language: Language) -> Self {
        Self {
            user_data,
            language,
        }
    }

    /// Wire body for one part
    #[must_use]
    pub fn for_part(&self, part: PartKey) -> PartRequest {
        PartRequest::new(self.user_data.clone(), self.language, part)
    }
}

/// Fetches the content of one part
#[async_trait]
pub trait PartGenerator: Send + Sync {
    /// Return the raw JSON body generated for `part`
    async fn generate(
        &self,
        request: &GenerationRequest,
        part: PartKey,
    ) -> Result<String, GenerateError>;
}
