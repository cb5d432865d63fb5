//! Secrets routes: `/api/secrets` and `/api/secrets/{*name}`.
//!
//! Each handler validates its input, makes one logical store call, and maps
//! the outcome to JSON. Validation always happens before the store is
//! touched.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use secretdesk_store::SecretSummary;

use crate::error::AppError;
use crate::state::AppState;

/// Build the secrets router.
///
/// Paths:
/// - `GET  /api/secrets`: list names and descriptions
/// - `POST /api/secrets`: create
/// - `GET  /api/secrets/{*name}`: read value
/// - `PUT  /api/secrets/{*name}`: overwrite value
///
/// `/api/secrets/` (empty name) is routed to the read and update handlers so
/// it is rejected as a bad request instead of falling through to a 404.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/secrets", get(list_secrets).post(create_secret))
        .route(
            "/api/secrets/",
            get(get_unnamed_secret).put(update_unnamed_secret),
        )
        .route("/api/secrets/{*name}", get(get_secret).put(update_secret))
}

// ── Request / response types ─────────────────────────────────────────

/// A secret as rendered by the API. Empty fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl From<SecretSummary> for Secret {
    fn from(summary: SecretSummary) -> Self {
        Self {
            name: summary.name,
            value: String::new(),
            description: summary.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSecretRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSecretRequest {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// List every secret's name and description across all store pages.
async fn list_secrets(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Secret>>, AppError> {
    let secrets = state.store.list_all().await?;
    info!(count = secrets.len(), "listed secrets");
    Ok(Json(secrets.into_iter().map(Secret::from).collect()))
}

/// Read a secret's current value.
async fn get_secret(
    State(state): State<Arc<AppState>>,
    raw_name: Result<Path<String>, PathRejection>,
) -> Result<Json<Secret>, AppError> {
    let Path(raw_name) = raw_name?;
    fetch_secret(&state, &raw_name).await
}

/// `GET /api/secrets/` with an empty capture; always a 400.
async fn get_unnamed_secret(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Secret>, AppError> {
    fetch_secret(&state, "").await
}

/// Create a new secret.
async fn create_secret(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let req: CreateSecretRequest = parse_body(&body)?;
    let name = require_field("name", req.name)?;
    let value = require_field("value", req.value)?;
    let description = req.description.filter(|d| !d.is_empty());

    state
        .store
        .create(&name, &value, description.as_deref())
        .await?;

    info!(secret = %name, "secret created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "secret created successfully",
        }),
    ))
}

/// Overwrite a secret's value.
async fn update_secret(
    State(state): State<Arc<AppState>>,
    raw_name: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(raw_name) = raw_name?;
    store_new_value(&state, &raw_name, &body).await
}

/// `PUT /api/secrets/` with an empty capture; always a 400.
async fn update_unnamed_secret(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    store_new_value(&state, "", &body).await
}

// ── Helpers ──────────────────────────────────────────────────────────

async fn fetch_secret(state: &AppState, raw_name: &str) -> Result<Json<Secret>, AppError> {
    let name = secret_name(raw_name)?;
    let value = state.store.get(name).await?;

    info!(secret = %name, "secret read");
    Ok(Json(Secret {
        name: name.to_owned(),
        value,
        description: String::new(),
    }))
}

async fn store_new_value(
    state: &AppState,
    raw_name: &str,
    body: &Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let name = secret_name(raw_name)?;
    let req: UpdateSecretRequest = parse_body(body)?;
    let value = require_field("value", req.value)?;

    state.store.put_value(name, &value).await?;

    info!(secret = %name, "secret updated");
    Ok(Json(MessageResponse {
        message: "secret updated successfully",
    }))
}

/// Strip the single leading `/` a wildcard capture may carry and reject
/// empty names.
pub fn secret_name(raw: &str) -> Result<&str, AppError> {
    let name = strip_leading_slash(raw);
    if name.is_empty() {
        return Err(AppError::BadRequest("secret name is required".to_owned()));
    }
    Ok(name)
}

/// Remove exactly one leading `/`, if present.
#[must_use]
pub fn strip_leading_slash(raw: &str) -> &str {
    raw.strip_prefix('/').unwrap_or(raw)
}

/// Decode a JSON request body regardless of its declared content type.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("invalid request body: {e}")))
}

/// A required string field must be present and non-empty.
fn require_field(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("{field} is required"))),
    }
}
