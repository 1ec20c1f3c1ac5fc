//! Consultation booking
//!
//! Builds the translated consultation message from the localized profile and
//! the executive summary, and renders it as `mailto:` and WhatsApp links.

use strategist_core::{Language, UserData};
use strategist_i18n::Translator;

/// Translated consultation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationRequest {
    pub subject: String,
    pub body: String,
}

impl ConsultationRequest {
    /// Fill `email.subject` and `email.body`
    #[must_use]
    pub fn build(
        translator: &dyn Translator,
        language: Language,
        user: &UserData,
        summary: &str,
    ) -> Self {
        let goals = user.goals.join(", ");
        let challenges = user.challenges.join(", ");
        let platforms = user.platforms.join(", ");
        let params = [
            ("name", user.name.as_str()),
            ("email", user.email.as_str()),
            ("industry", user.industry.as_str()),
            ("subIndustry", user.sub_industry.as_str()),
            ("companySize", user.company_size.as_str()),
            ("goals", goals.as_str()),
            ("challenges", challenges.as_str()),
            ("platforms", platforms.as_str()),
            ("summary", summary),
        ];

        Self {
            subject: translator.translate(language, "email.subject", &[("name", &user.name)]),
            body: translator.translate(language, "email.body", &params),
        }
    }

    /// `mailto:` link to `address`
    #[must_use]
    pub fn mailto(&self, address: &str) -> String {
        format!(
            "mailto:{address}?subject={}&body={}",
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }

    /// WhatsApp click-to-chat link to `number` (digits only, international form)
    #[must_use]
    pub fn whatsapp(&self, number: &str) -> String {
        format!(
            "https://wa.me/{number}?text={}",
            urlencoding::encode(&self.body)
        )
    }
}
