//! HTTP surface of the generation endpoint
//!
//! `POST /api/generate-summary` with `{userData, language, part}` answers
//! with the model's JSON text for that part, verbatim. Every other method on
//! the path is a 405.

use crate::config::{ApiKey, ServerConfig};
use crate::error::{ModelError, ServeError, ServerError};
use crate::model::{ContentModel, GeminiClient};
use crate::prompt::PartPrompt;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use strategist_core::{PartKey, PartRequest};
use tokio::net::TcpListener;
use tracing::{error, info};
use uuid::Uuid;

/// Path of the generation route
pub const GENERATE_PATH: &str = "/api/generate-summary";

/// Shared handler state
#[derive(Clone, Default)]
pub struct AppState {
    model: Option<Arc<dyn ContentModel>>,
}

impl AppState {
    #[must_use]
    pub fn new(model: Arc<dyn ContentModel>) -> Self {
        Self { model: Some(model) }
    }

    /// State with no model; every generation request fails with a missing key
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Gemini-backed state, or unconfigured when no key is set
    ///
    /// # Errors
    /// `ModelError::Transport` if the HTTP client cannot be built.
    pub fn from_config(config: &ServerConfig, api_key: Option<ApiKey>) -> Result<Self, ModelError> {
        match api_key {
            Some(key) => {
                let client = GeminiClient::new(config, key)?;
                info!("Using model {} at {}", config.model, client.url());
                Ok(Self::new(Arc::new(client)))
            }
            None => {
                tracing::warn!("API_KEY is not set; generation requests will fail");
                Ok(Self::unconfigured())
            }
        }
    }
}

/// Router with the generation route
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            GENERATE_PATH,
            post(generate_summary).fallback(method_not_allowed),
        )
        .with_state(state)
}

/// Serve `state` on an already bound listener until the process stops
///
/// # Errors
/// I/O errors from the accept loop.
pub async fn serve_on(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{addr}{GENERATE_PATH}");
    }
    axum::serve(listener, router(state)).await
}

/// Bind `config.bind_addr` and serve
///
/// # Errors
/// Bind failure, model client construction failure, or accept loop I/O errors.
pub async fn serve(config: &ServerConfig, api_key: Option<ApiKey>) -> Result<(), ServeError> {
    let state = AppState::from_config(config, api_key)?;
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: config.bind_addr.clone(),
            source,
        })?;
    serve_on(listener, state).await?;
    Ok(())
}

async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

async fn generate_summary(State(state): State<AppState>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();
    match generate(&state, &body).await {
        Ok(text) => {
            info!(%request_id, "Generated part");
            ([(CONTENT_TYPE, "application/json")], text).into_response()
        }
        Err(err) => {
            error!(%request_id, "Generation request failed: {err}");
            err.into_response()
        }
    }
}

async fn generate(state: &AppState, body: &[u8]) -> Result<String, ServerError> {
    let model = state.model.as_ref().ok_or(ServerError::MissingApiKey)?;

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ServerError::generation("unknown", e))?;
    let part_name = value
        .get("part")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    let part: PartKey = part_name.parse().map_err(|_| {
        ServerError::generation(&part_name, format!("Invalid part requested: {part_name}"))
    })?;
    let request: PartRequest =
        serde_json::from_value(value).map_err(|e| ServerError::generation(&part_name, e))?;

    tracing::debug!(%part, language = %request.language, "Prompting model");
    let prompt = PartPrompt::new(&request.user_data, request.language, part);
    model
        .generate(&prompt)
        .await
        .map_err(|e| ServerError::generation(&part_name, e))
}
