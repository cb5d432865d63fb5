//! HTTP error types for the `secretdesk` server.
//!
//! Every failure a handler can produce falls into one of three kinds:
//! authentication (401 with a Basic challenge), validation (400), or store
//! (500, carrying the store's message verbatim). Each renders as
//! `{"error": "<message>"}`.

use axum::extract::rejection::PathRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use secretdesk_store::StoreError;

/// Challenge sent with every 401 response.
pub const BASIC_CHALLENGE: &str = r#"Basic realm="Restricted""#;

/// Application-level error returned from HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Credentials were missing, malformed, or did not match.
    #[error("{0}")]
    Unauthorized(String),
    /// Client sent invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// The secret store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(err) => {
                tracing::error!(error = %err, "secret store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let challenge = matches!(self, Self::Unauthorized(_));
        let body = ErrorBody {
            error: self.to_string(),
        };

        let mut response = (status, axum::Json(body)).into_response();
        if challenge {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_CHALLENGE),
            );
        }
        response
    }
}
