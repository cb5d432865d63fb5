//! Shared application state for the `secretdesk` server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds only the secret store handle; handlers
//! keep no state of their own between requests.

use std::sync::Arc;

use secretdesk_store::SecretStore;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The remote secret store (or an in-memory stand-in).
    pub store: Arc<dyn SecretStore>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
