//! Fixed business taxonomy
//!
//! Every categorical answer in a profile is a key from one of these groups.
//! Display text is resolved through the translation catalogue under
//! `constants.<group>.<key>`.

use std::fmt::{self, Display, Formatter};

/// Taxonomy group a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyGroup {
    Industry,
    SubIndustry,
    CompanySize,
    Goal,
    Challenge,
    Platform,
}

impl TaxonomyGroup {
    /// Catalogue section holding display text for this group
    #[inline]
    #[must_use]
    pub fn catalogue_section(self) -> &'static str {
        match self {
            Self::Industry => "industries",
            Self::SubIndustry => "sub_industries",
            Self::CompanySize => "company_sizes",
            Self::Goal => "goals",
            Self::Challenge => "challenges",
            Self::Platform => "platforms",
        }
    }

    /// Translation key for `key` in this group
    #[must_use]
    pub fn translation_key(self, key: &str) -> String {
        format!("constants.{}.{}", self.catalogue_section(), key)
    }

    /// Whether `key` exists in this group
    #[must_use]
    pub fn contains(self, key: &str) -> bool {
        match self {
            Self::SubIndustry => SUB_INDUSTRIES
                .iter()
                .any(|(_, subs)| subs.contains(&key)),
            group => group.keys().contains(&key),
        }
    }

    /// Keys of a flat group; sub-industries are listed per industry instead
    #[must_use]
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Self::Industry => INDUSTRIES,
            Self::SubIndustry => &[],
            Self::CompanySize => COMPANY_SIZES,
            Self::Goal => GOALS,
            Self::Challenge => CHALLENGES,
            Self::Platform => PLATFORMS,
        }
    }
}

impl Display for TaxonomyGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Industry => "industry",
            Self::SubIndustry => "sub-industry",
            Self::CompanySize => "company size",
            Self::Goal => "goal",
            Self::Challenge => "challenge",
            Self::Platform => "platform",
        })
    }
}

pub const INDUSTRIES: &[&str] = &[
    "tech",
    "ecommerce",
    "healthcare",
    "finance",
    "realestate",
    "education",
    "fashion",
    "food",
];

pub const SUB_INDUSTRIES: &[(&str, &[&str])] = &[
    ("tech", &["saas", "fintech", "ai", "hardware"]),
    (
        "ecommerce",
        &["retail", "marketplace", "subscription", "dropshipping"],
    ),
    (
        "healthcare",
        &["telehealth", "medicaldevices", "pharma", "wellness"],
    ),
    ("finance", &["banking", "investment", "insurance", "crypto"]),
    (
        "realestate",
        &["residential", "commercial", "propertymgmt", "proptech"],
    ),
    (
        "education",
        &["edtech", "onlinecourses", "tutoring", "university"],
    ),
    (
        "fashion",
        &["fastfashion", "luxury", "sustainable", "accessories"],
    ),
    (
        "food",
        &["restaurant", "fooddelivery", "packagedgoods", "healthfood"],
    ),
];

pub const COMPANY_SIZES: &[&str] = &["startup", "smb", "mid-market", "enterprise"];

pub const GOALS: &[&str] = &[
    "awareness",
    "leads",
    "conversion",
    "engagement",
    "sales",
    "traffic",
];

pub const CHALLENGES: &[&str] = &["budget", "competition", "tech", "talent"];

pub const PLATFORMS: &[&str] = &["google", "instagram", "facebook", "tiktok", "linkedin", "x"];

/// Sub-industries offered under `industry`
#[must_use]
pub fn sub_industries_of(industry: &str) -> Option<&'static [&'static str]> {
    SUB_INDUSTRIES
        .iter()
        .find(|(parent, _)| *parent == industry)
        .map(|(_, subs)| *subs)
}
