//! HTTP Basic authentication gate.
//!
//! Every request routed through the gate is checked against one configured
//! credential pair. There is no session state: the `Authorization` header is
//! re-validated on every request, and a rejected request never reaches a
//! handler.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::config::BasicCredentials;
use crate::error::AppError;

impl BasicCredentials {
    /// Compare a supplied pair against this one.
    ///
    /// Both halves are always compared so the result does not reveal which
    /// one differed.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

/// Extract `(username, password)` from an `Authorization: Basic ...` header.
///
/// Returns `None` if the header is absent, uses another scheme, is not valid
/// base64, is not UTF-8, or lacks the `:` separator.
#[must_use]
pub fn parse_basic_auth(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}

/// Middleware that validates HTTP Basic credentials.
///
/// Missing or unreadable credentials and mismatched credentials both get a
/// 401 with a `WWW-Authenticate` challenge; only the message differs.
pub async fn basic_auth_middleware(
    State(credentials): State<Arc<BasicCredentials>>,
    req: Request,
    next: Next,
) -> Response {
    let Some((username, password)) = parse_basic_auth(req.headers()) else {
        warn!(method = %req.method(), path = %req.uri().path(), "missing basic auth credentials");
        return AppError::Unauthorized("Authorization required".to_owned()).into_response();
    };

    if !credentials.matches(&username, &password) {
        warn!(method = %req.method(), path = %req.uri().path(), "invalid basic auth credentials");
        return AppError::Unauthorized("Invalid credentials".to_owned()).into_response();
    }

    next.run(req).await
}
