//! Client-side aggregation configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default location of the generation endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/api/generate-summary";

/// Default per-part timeout in seconds
pub const DEFAULT_PART_TIMEOUT_SECS: u64 = 60;

/// Aggregation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// URL the part requests are posted to
    pub endpoint_url: String,
    /// Per-part timeout; 0 waits for the transport to give up on its own
    pub part_timeout_secs: u64,
}

impl AggregationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With endpoint URL
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = url.into();
        self
    }

    /// With per-part timeout
    #[inline]
    #[must_use]
    pub fn with_part_timeout_secs(mut self, secs: u64) -> Self {
        self.part_timeout_secs = secs;
        self
    }

    /// Timeout applied to each part request, if any
    #[inline]
    #[must_use]
    pub fn part_timeout(&self) -> Option<Duration> {
        (self.part_timeout_secs > 0).then(|| Duration::from_secs(self.part_timeout_secs))
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT.to_string(),
            part_timeout_secs: DEFAULT_PART_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AggregationConfig::new();
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT);
        assert_eq!(config.part_timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn zero_disables_timeout() {
        let config = AggregationConfig::new().with_part_timeout_secs(0);
        assert_eq!(config.part_timeout(), None);
    }

    #[test]
    fn partial_document_uses_defaults() {
        let config: AggregationConfig = serde_json::from_str(r#"{"part_timeout_secs": 5}"#).unwrap();
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT);
        assert_eq!(config.part_timeout_secs, 5);
    }
}
