//! Secret store abstraction for `secretdesk`.
//!
//! This crate defines the [`SecretStore`] trait: the narrow capability the
//! HTTP layer needs from the managed secret service (paged listing, value
//! fetch, create, and put-value). The store is the system of record; nothing
//! here caches or persists secrets locally.
//!
//! Two implementations are provided:
//!
//! - [`AwsSecretsManagerStore`]: production default, backed by AWS Secrets
//!   Manager (feature `aws-backend`)
//! - [`MemoryStore`]: in-memory, for local development and tests

#[cfg(feature = "aws-backend")]
mod aws;
mod error;
mod memory;

#[cfg(feature = "aws-backend")]
pub use aws::AwsSecretsManagerStore;
pub use error::StoreError;
pub use memory::MemoryStore;

/// A secret as it appears in a listing: name and description, never the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSummary {
    /// Unique secret name, also the remote lookup key.
    pub name: String,
    /// Free-form description. Empty when the store has none.
    pub description: String,
}

impl SecretSummary {
    /// Build a summary from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One page of a secret listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretPage {
    /// Entries on this page, in store order.
    pub secrets: Vec<SecretSummary>,
    /// Continuation token for the next page. `None` when exhausted.
    pub next_token: Option<String>,
}

/// Capability interface over a remote secret store.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`)
/// and hold no per-call mutable state beyond what the remote client itself
/// manages.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync + 'static {
    /// Fetch a single page of secret summaries.
    ///
    /// Pass `None` for the first page and the previous page's `next_token`
    /// thereafter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::List`] if the remote call fails.
    async fn list_page(&self, next_token: Option<String>) -> Result<SecretPage, StoreError>;

    /// List every secret by following continuation tokens until exhausted.
    ///
    /// Entries keep the order the store returned them in. A failure on any
    /// page discards everything accumulated so far.
    ///
    /// # Errors
    ///
    /// Returns the first page error encountered.
    async fn list_all(&self) -> Result<Vec<SecretSummary>, StoreError> {
        let mut secrets = Vec::new();
        let mut next_token = None;

        loop {
            let page = self.list_page(next_token.take()).await?;
            secrets.extend(page.secrets);

            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        Ok(secrets)
    }

    /// Fetch the current value of a secret.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Get`] or [`StoreError::NotFound`] if the value
    /// cannot be read.
    async fn get(&self, name: &str) -> Result<String, StoreError>;

    /// Create a new secret. `description` is only sent when present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Create`] or [`StoreError::AlreadyExists`] if the
    /// secret cannot be created.
    async fn create(
        &self,
        name: &str,
        value: &str,
        description: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Overwrite the current value of an existing secret.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PutValue`] or [`StoreError::NotFound`] if the
    /// value cannot be written.
    async fn put_value(&self, name: &str, value: &str) -> Result<(), StoreError>;
}
