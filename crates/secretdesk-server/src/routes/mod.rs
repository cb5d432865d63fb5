//! HTTP route handlers and router assembly for `secretdesk`.

pub mod secrets;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware as axum_mw;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::BasicCredentials;
use crate::middleware::basic_auth_middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
///
/// The auth gate wraps every API route. CORS sits outside it so browser
/// preflight requests are answered without credentials.
pub fn build_router(
    state: Arc<AppState>,
    credentials: BasicCredentials,
    cors_origins: &[String],
) -> Router {
    let api_routes = secrets::router().route_layer(axum_mw::from_fn_with_state(
        Arc::new(credentials),
        basic_auth_middleware,
    ));

    api_routes
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}

/// CORS policy for the browser UI: listed origins only, credentials allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
