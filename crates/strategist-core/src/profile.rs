//! Business profile collected by the wizard
//!
//! A [`ProfileDraft`] is filled in step by step (shallow merge per step) and
//! turned into an immutable [`Profile`] by [`ProfileDraft::finalize`] once the
//! last data-collection step is submitted.

use crate::error::ProfileError;
use crate::taxonomy::{sub_industries_of, TaxonomyGroup};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Answers from the basic-info step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub name: String,
    pub email: String,
    pub industry: String,
    pub sub_industry: String,
    pub company_size: String,
}

impl BasicInfo {
    /// Check every field the step requires
    ///
    /// # Errors
    /// - `ProfileError::MissingField` for a blank field
    /// - `ProfileError::InvalidEmail` if the email fails the address pattern
    /// - `ProfileError::UnknownKey` / `SubIndustryMismatch` for taxonomy problems
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::MissingField("name"));
        }
        validate_email(&self.email)?;

        if self.industry.is_empty() {
            return Err(ProfileError::MissingField("industry"));
        }
        let subs = sub_industries_of(&self.industry).ok_or_else(|| ProfileError::UnknownKey {
            group: TaxonomyGroup::Industry,
            key: self.industry.clone(),
        })?;

        if self.sub_industry.is_empty() {
            return Err(ProfileError::MissingField("subIndustry"));
        }
        if !subs.contains(&self.sub_industry.as_str()) {
            if TaxonomyGroup::SubIndustry.contains(&self.sub_industry) {
                return Err(ProfileError::SubIndustryMismatch {
                    industry: self.industry.clone(),
                    sub_industry: self.sub_industry.clone(),
                });
            }
            return Err(ProfileError::UnknownKey {
                group: TaxonomyGroup::SubIndustry,
                key: self.sub_industry.clone(),
            });
        }

        if self.company_size.is_empty() {
            return Err(ProfileError::MissingField("companySize"));
        }
        if !TaxonomyGroup::CompanySize.contains(&self.company_size) {
            return Err(ProfileError::UnknownKey {
                group: TaxonomyGroup::CompanySize,
                key: self.company_size.clone(),
            });
        }

        Ok(())
    }
}

/// Validate an email address the way the basic-info form does
///
/// # Errors
/// `MissingField("email")` when blank, `InvalidEmail` when malformed.
pub fn validate_email(email: &str) -> Result<(), ProfileError> {
    if email.is_empty() {
        return Err(ProfileError::MissingField("email"));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ProfileError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// Validate and de-duplicate a multi-select answer, keeping first-seen order
///
/// # Errors
/// `EmptySelection` for an empty list, `UnknownKey` for a key outside `group`.
pub fn normalize_selection(
    group: TaxonomyGroup,
    keys: impl IntoIterator<Item = String>,
) -> Result<Vec<String>, ProfileError> {
    let mut seen = IndexSet::new();
    for key in keys {
        if !group.contains(&key) {
            return Err(ProfileError::UnknownKey { group, key });
        }
        seen.insert(key);
    }
    if seen.is_empty() {
        return Err(ProfileError::EmptySelection(group));
    }
    Ok(seen.into_iter().collect())
}

/// Profile under construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    pub basic: BasicInfo,
    pub goals: Vec<String>,
    pub challenges: Vec<String>,
    pub platforms: Vec<String>,
}

impl ProfileDraft {
    /// Create an empty draft
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the basic-info step
    ///
    /// # Errors
    /// Propagates [`BasicInfo::validate`]; the draft is untouched on error.
    pub fn apply_basic_info(&mut self, info: BasicInfo) -> Result<(), ProfileError> {
        info.validate()?;
        self.basic = info;
        Ok(())
    }

    /// Merge the goals step
    ///
    /// # Errors
    /// See [`normalize_selection`].
    pub fn apply_goals(&mut self, goals: Vec<String>) -> Result<(), ProfileError> {
        self.goals = normalize_selection(TaxonomyGroup::Goal, goals)?;
        Ok(())
    }

    /// Merge the platforms step
    ///
    /// # Errors
    /// See [`normalize_selection`].
    pub fn apply_platforms(&mut self, platforms: Vec<String>) -> Result<(), ProfileError> {
        self.platforms = normalize_selection(TaxonomyGroup::Platform, platforms)?;
        Ok(())
    }

    /// Merge the challenges step
    ///
    /// # Errors
    /// See [`normalize_selection`].
    pub fn apply_challenges(&mut self, challenges: Vec<String>) -> Result<(), ProfileError> {
        self.challenges = normalize_selection(TaxonomyGroup::Challenge, challenges)?;
        Ok(())
    }

    /// Freeze the draft into a profile
    ///
    /// # Errors
    /// Returns the first validation problem of any step.
    pub fn finalize(&self) -> Result<Profile, ProfileError> {
        self.basic.validate()?;
        Ok(Profile {
            basic: self.basic.clone(),
            goals: normalize_selection(TaxonomyGroup::Goal, self.goals.iter().cloned())?,
            challenges: normalize_selection(
                TaxonomyGroup::Challenge,
                self.challenges.iter().cloned(),
            )?,
            platforms: normalize_selection(
                TaxonomyGroup::Platform,
                self.platforms.iter().cloned(),
            )?,
        })
    }
}

/// Finalized, read-only profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    basic: BasicInfo,
    goals: Vec<String>,
    challenges: Vec<String>,
    platforms: Vec<String>,
}

impl Profile {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.basic.name
    }

    #[inline]
    #[must_use]
    pub fn email(&self) -> &str {
        &self.basic.email
    }

    #[inline]
    #[must_use]
    pub fn industry(&self) -> &str {
        &self.basic.industry
    }

    #[inline]
    #[must_use]
    pub fn sub_industry(&self) -> &str {
        &self.basic.sub_industry
    }

    #[inline]
    #[must_use]
    pub fn company_size(&self) -> &str {
        &self.basic.company_size
    }

    #[inline]
    #[must_use]
    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    #[inline]
    #[must_use]
    pub fn challenges(&self) -> &[String] {
        &self.challenges
    }

    #[inline]
    #[must_use]
    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    /// Whether the profile qualifies for the compound "Master Strategist" badge
    #[inline]
    #[must_use]
    pub fn is_master_strategist(&self) -> bool {
        self.goals.len() >= 3 && self.challenges.len() >= 3
    }

    /// Build the wire payload, resolving each taxonomy key through `label`
    pub fn to_user_data(&self, label: impl Fn(TaxonomyGroup, &str) -> String) -> UserData {
        let labels = |group: TaxonomyGroup, keys: &[String]| -> Vec<String> {
            keys.iter().map(|k| label(group, k)).collect()
        };
        UserData {
            name: self.basic.name.clone(),
            email: self.basic.email.clone(),
            industry: label(TaxonomyGroup::Industry, &self.basic.industry),
            sub_industry: label(TaxonomyGroup::SubIndustry, &self.basic.sub_industry),
            company_size: label(TaxonomyGroup::CompanySize, &self.basic.company_size),
            goals: labels(TaxonomyGroup::Goal, &self.goals),
            challenges: labels(TaxonomyGroup::Challenge, &self.challenges),
            platforms: labels(TaxonomyGroup::Platform, &self.platforms),
        }
    }
}

/// Profile as sent to the generation endpoint, with display text in place of keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub name: String,
    pub email: String,
    pub industry: String,
    pub sub_industry: String,
    pub company_size: String,
    pub goals: Vec<String>,
    pub challenges: Vec<String>,
    pub platforms: Vec<String>,
}
