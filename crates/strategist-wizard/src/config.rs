//! Wizard configuration

use serde::{Deserialize, Serialize};
use strategist_aggregation::AggregationConfig;
use strategist_core::Language;

/// Where consultation requests are sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub contact_email: String,
    /// International number, digits only
    pub whatsapp_number: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            contact_email: "consulting@example.com".to_string(),
            whatsapp_number: "15550100".to_string(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Initial interface language
    pub language: Language,
    pub aggregation: AggregationConfig,
    pub booking: BookingConfig,
}

impl WizardConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_aggregation(mut self, aggregation: AggregationConfig) -> Self {
        self.aggregation = aggregation;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_booking(mut self, booking: BookingConfig) -> Self {
        self.booking = booking;
        self
    }
}
