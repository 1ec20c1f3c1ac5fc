//! Error types for the domain model
//!
//! - [`ProfileError`]: a wizard submission that cannot be accepted
//! - [`PartError`]: a part identifier or payload that cannot be decoded

use crate::part::PartKey;
use crate::taxonomy::TaxonomyGroup;

/// Profile validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// Required field left blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Email does not look like an address
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// Key is not part of the fixed taxonomy
    #[error("unknown {group} key: {key}")]
    UnknownKey { group: TaxonomyGroup, key: String },

    /// Sub-industry selected under the wrong industry
    #[error("sub-industry {sub_industry} does not belong to industry {industry}")]
    SubIndustryMismatch {
        industry: String,
        sub_industry: String,
    },

    /// A multi-select step was submitted with nothing selected
    #[error("at least one {0} must be selected")]
    EmptySelection(TaxonomyGroup),
}

/// Report part decoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartError {
    /// Identifier is not one of the eight parts
    #[error("invalid part requested: {0}")]
    UnknownPart(String),

    /// Payload is not valid JSON
    #[error("[{part}] payload is not valid JSON: {reason}")]
    MalformedJson { part: PartKey, reason: String },

    /// Payload is JSON but lacks the part's top-level field
    #[error("[{part}] payload has no `{part}` field")]
    MissingField { part: PartKey },

    /// Payload field does not match the part's shape
    #[error("[{part}] payload shape mismatch: {reason}")]
    ShapeMismatch { part: PartKey, reason: String },
}

impl PartError {
    /// Part the error refers to, when known
    #[inline]
    #[must_use]
    pub fn part(&self) -> Option<PartKey> {
        match self {
            Self::UnknownPart(_) => None,
            Self::MalformedJson { part, .. }
            | Self::MissingField { part }
            | Self::ShapeMismatch { part, .. } => Some(*part),
        }
    }
}
