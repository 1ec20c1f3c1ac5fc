//! Request body exchanged with the generation endpoint

use crate::error::PartError;
use crate::language::Language;
use crate::part::PartKey;
use crate::profile::UserData;
use serde::{Deserialize, Serialize};

/// `{userData, language, part}` as posted for a single part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartRequest {
    pub user_data: UserData,
    pub language: Language,
    /// Kept as text so an unknown part can be reported by name
    pub part: String,
}

impl PartRequest {
    #[must_use]
    pub fn new(user_data: UserData, language: Language, part: PartKey) -> Self {
        Self {
            user_data,
            language,
            part: part.wire_id().to_string(),
        }
    }

    /// Parsed part identifier
    ///
    /// # Errors
    /// `PartError::UnknownPart` if `part` names none of the eight parts.
    pub fn part_key(&self) -> Result<PartKey, PartError> {
        self.part.parse()
    }
}
