//! Error types for the generation endpoint
//!
//! Every failure of the endpoint is answered with a JSON body of the form
//! `{"error": "<message>"}`; the status is 405 for a wrong method and 500
//! otherwise.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Endpoint error, rendered as the response
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// No model credential configured
    #[error("Server configuration error: API key is missing.")]
    MissingApiKey,

    /// Anything that went wrong while producing `part`
    #[error("Failed to generate plan part '{part}'. {reason}")]
    Generation { part: String, reason: String },
}

impl ServerError {
    #[must_use]
    pub fn generation(part: impl Into<String>, reason: impl ToString) -> Self {
        Self::Generation {
            part: part.into(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingApiKey | Self::Generation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Generative model failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Transport(String),

    #[error("model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model response could not be read: {0}")]
    Decode(String),

    #[error("model returned no content")]
    Empty,
}

/// Failure to start serving
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server stopped: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },
}
