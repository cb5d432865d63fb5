//! Secret store error types.
//!
//! Remote failures keep the service's own message in `reason` so the HTTP
//! layer can pass it through verbatim.

/// Errors that can occur during secret store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to fetch a page of the secret listing.
    #[error("failed to list secrets: {reason}")]
    List { reason: String },

    /// Failed to read a secret value.
    #[error("failed to get secret '{name}': {reason}")]
    Get { name: String, reason: String },

    /// Failed to create a secret.
    #[error("failed to create secret '{name}': {reason}")]
    Create { name: String, reason: String },

    /// Failed to write a new secret value.
    #[error("failed to update secret '{name}': {reason}")]
    PutValue { name: String, reason: String },

    /// The named secret does not exist.
    #[error("secret '{name}' not found")]
    NotFound { name: String },

    /// A secret with this name already exists.
    #[error("secret '{name}' already exists")]
    AlreadyExists { name: String },
}
