//! Server configuration
//!
//! Loaded from an optional TOML file, then overridden by `STRATEGIST_*`
//! environment variables. The model credential is not part of the
//! configuration: it is read from `API_KEY` only and never serialized.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Default generative model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default model API base
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the model credential
pub const API_KEY_VAR: &str = "API_KEY";

/// Endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the endpoint listens on
    pub bind_addr: String,
    /// Model name used for every part
    pub model: String,
    /// Base URL of the model API
    pub api_base: String,
    /// Timeout for one model call; 0 disables it
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl ServerConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Parse a TOML document; missing keys take their defaults
    ///
    /// # Errors
    /// `ConfigError::Parse` on invalid TOML or wrong value types.
    pub fn from_toml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// File (if any) plus process environment
    ///
    /// # Errors
    /// Unreadable or invalid file, or an unparsable override.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let origin = path.display().to_string();
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: origin.clone(),
                    source,
                })?;
                Self::from_toml(&text, &origin)?
            }
            None => Self::default(),
        };
        config.with_env(|var| std::env::var(var).ok())
    }

    /// Apply `STRATEGIST_*` overrides from `lookup`
    ///
    /// # Errors
    /// `ConfigError::Env` if the timeout override is not a number.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("STRATEGIST_BIND_ADDR") {
            self.bind_addr = v;
        }
        if let Some(v) = lookup("STRATEGIST_MODEL") {
            self.model = v;
        }
        if let Some(v) = lookup("STRATEGIST_API_BASE") {
            self.api_base = v;
        }
        if let Some(v) = lookup("STRATEGIST_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = v.parse().map_err(|_| ConfigError::Env {
                var: "STRATEGIST_REQUEST_TIMEOUT_SECS",
                value: v,
            })?;
        }
        Ok(self)
    }
}

/// Model credential; never printed
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Non-blank key
    #[must_use]
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        (!key.trim().is_empty()).then_some(Self(key))
    }

    /// Read `API_KEY` from the process environment
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_VAR).ok().and_then(Self::new)
    }

    #[inline]
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn toml_overrides_defaults() {
        let config = ServerConfig::from_toml("model = \"gemini-pro\"\n", "inline").unwrap();
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = \"0.0.0.0:9000\"\nrequest_timeout_secs = 5").unwrap();
        let from_file = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(from_file.request_timeout(), Some(Duration::from_secs(5)));

        let env: HashMap<&str, &str> = [
            ("STRATEGIST_BIND_ADDR", "127.0.0.1:1"),
            ("STRATEGIST_REQUEST_TIMEOUT_SECS", "0"),
        ]
        .into();
        let config = from_file
            .with_env(|k| env.get(k).map(|v| (*v).to_string()))
            .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:1");
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn bad_timeout_override_is_rejected() {
        let err = ServerConfig::new()
            .with_env(|k| (k == "STRATEGIST_REQUEST_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ServerConfig::load(Some(Path::new("/nonexistent/strategist.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn api_key_is_redacted() {
        assert!(ApiKey::new("  ").is_none());
        let key = ApiKey::new("secret-value").unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
        assert_eq!(key.expose(), "secret-value");
    }
}
