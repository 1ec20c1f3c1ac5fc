//! Strategist translation service
//!
//! - [`Translator`]: `translate(language, key, params) -> String`
//! - [`Catalog`]: nested JSON catalogues per language, with the `en` and `ar`
//!   catalogues bundled into the binary
//! - [`localize_profile`]: replace a profile's taxonomy keys with display text
//!
//! Lookups never fail: a missing key, a non-string leaf or an unloaded
//! language all resolve to the key itself.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use strategist_core::{Language, Profile, UserData};

const BUNDLED_EN: &str = include_str!("../locales/en.json");
const BUNDLED_AR: &str = include_str!("../locales/ar.json");

/// Catalogue loading errors
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("failed to read catalogue {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalogue for {language} is not valid JSON: {reason}")]
    InvalidJson { language: Language, reason: String },

    #[error("catalogue for {0} must be a JSON object")]
    NotAnObject(Language),
}

/// Resolves translation keys to display text
pub trait Translator: Send + Sync {
    /// Look up `key` in `language` and substitute `{name}` placeholders from `params`
    fn translate(&self, language: Language, key: &str, params: &[(&str, &str)]) -> String;
}

/// JSON translation catalogues keyed by language
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    catalogs: HashMap<Language, Value>,
}

impl Catalog {
    /// Catalogue with no languages loaded; every lookup returns the key
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalogue holding the bundled `en` and `ar` translations
    ///
    /// # Errors
    /// Only if a bundled file is corrupt.
    pub fn bundled() -> Result<Self, I18nError> {
        Self::empty()
            .with_json(Language::En, BUNDLED_EN)?
            .with_json(Language::Ar, BUNDLED_AR)
    }

    /// Add or replace one language from JSON text
    ///
    /// # Errors
    /// `InvalidJson` / `NotAnObject` if the text is not a JSON object.
    pub fn with_json(mut self, language: Language, json: &str) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_str(json).map_err(|e| I18nError::InvalidJson {
            language,
            reason: e.to_string(),
        })?;
        if !value.is_object() {
            return Err(I18nError::NotAnObject(language));
        }
        self.catalogs.insert(language, value);
        Ok(self)
    }

    /// Load `<dir>/en.json` and `<dir>/ar.json`, skipping files that do not exist
    ///
    /// # Errors
    /// I/O errors other than not-found, and invalid catalogue contents.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, I18nError> {
        let mut catalog = Self::empty();
        for language in Language::ALL {
            let path = dir.as_ref().join(format!("{}.json", language.code()));
            match std::fs::read_to_string(&path) {
                Ok(text) => catalog = catalog.with_json(language, &text)?,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::warn!("No {} catalogue at {}", language, path.display());
                }
                Err(source) => {
                    return Err(I18nError::Io {
                        path: path.display().to_string(),
                        source,
                    })
                }
            }
        }
        Ok(catalog)
    }

    /// Whether a catalogue is loaded for `language`
    #[inline]
    #[must_use]
    pub fn has_language(&self, language: Language) -> bool {
        self.catalogs.contains_key(&language)
    }

    fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        let mut node = self.catalogs.get(&language)?;
        for segment in key.split('.') {
            node = node.get(segment)?;
        }
        node.as_str()
    }
}

impl Translator for Catalog {
    fn translate(&self, language: Language, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.lookup(language, key) else {
            return key.to_string();
        };
        params
            .iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }
}

/// Wire payload for `profile` with every taxonomy key translated into `language`
pub fn localize_profile(
    translator: &dyn Translator,
    language: Language,
    profile: &Profile,
) -> UserData {
    profile.to_user_data(|group, key| {
        translator.translate(language, &group.translation_key(key), &[])
    })
}
