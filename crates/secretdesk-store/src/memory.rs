//! In-memory secret store for development and testing.
//!
//! Secrets live in a `BTreeMap` behind a `RwLock` and are lost when the
//! process exits. Listing is paged like the remote service so callers
//! exercise the same continuation-token loop.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{SecretPage, SecretStore, SecretSummary, StoreError};

/// Default number of entries per listing page.
const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
struct StoredSecret {
    value: String,
    description: String,
}

/// An in-memory secret store backed by a `BTreeMap`.
///
/// Listing returns secrets sorted by name. The continuation token is the
/// last name on the previous page.
///
/// # Examples
///
/// ```
/// # use secretdesk_store::{MemoryStore, SecretStore};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// store.create("prd/database", "hunter2", None).await.unwrap();
/// let value = store.get("prd/database").await.unwrap();
/// assert_eq!(value, "hunter2");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    data: Arc<RwLock<BTreeMap<String, StoredSecret>>>,
    page_size: usize,
}

impl MemoryStore {
    /// Create a new empty store with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a new empty store that returns at most `page_size` entries per
    /// listing page. A page size of zero is treated as one.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
            page_size: page_size.max(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SecretStore for MemoryStore {
    async fn list_page(&self, next_token: Option<String>) -> Result<SecretPage, StoreError> {
        let data = self.data.read().await;
        let lower = next_token.map_or(Bound::Unbounded, Bound::Excluded);

        let mut entries = data.range((lower, Bound::Unbounded));
        let secrets: Vec<SecretSummary> = entries
            .by_ref()
            .take(self.page_size)
            .map(|(name, secret)| SecretSummary::new(name.clone(), secret.description.clone()))
            .collect();

        let next_token = if entries.next().is_some() {
            secrets.last().map(|s| s.name.clone())
        } else {
            None
        };

        Ok(SecretPage {
            secrets,
            next_token,
        })
    }

    async fn get(&self, name: &str) -> Result<String, StoreError> {
        let data = self.data.read().await;
        data.get(name)
            .map(|secret| secret.value.clone())
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_owned(),
            })
    }

    async fn create(
        &self,
        name: &str,
        value: &str,
        description: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        if data.contains_key(name) {
            return Err(StoreError::AlreadyExists {
                name: name.to_owned(),
            });
        }

        data.insert(
            name.to_owned(),
            StoredSecret {
                value: value.to_owned(),
                description: description.unwrap_or_default().to_owned(),
            },
        );
        Ok(())
    }

    async fn put_value(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        let secret = data.get_mut(name).ok_or_else(|| StoreError::NotFound {
            name: name.to_owned(),
        })?;
        value.clone_into(&mut secret.value);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_nonexistent_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get("does/not/exist").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref name } if name == "does/not/exist"));
    }

    #[tokio::test]
    async fn create_and_get_roundtrip() {
        let store = MemoryStore::new();
        store.create("prd/database", "USER=admin", None).await.unwrap();
        assert_eq!(store.get("prd/database").await.unwrap(), "USER=admin");
    }

    #[tokio::test]
    async fn create_duplicate_is_rejected() {
        let store = MemoryStore::new();
        store.create("key", "v1", None).await.unwrap();
        let err = store.create("key", "v2", None).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
        assert_eq!(store.get("key").await.unwrap(), "v1");
    }

    #[tokio::test]
    async fn put_value_overwrites_existing() {
        let store = MemoryStore::new();
        store.create("key", "v1", None).await.unwrap();
        store.put_value("key", "v2").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), "v2");
    }

    #[tokio::test]
    async fn put_value_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.put_value("nope", "v").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn put_value_keeps_description() {
        let store = MemoryStore::new();
        store.create("key", "v1", Some("api key")).await.unwrap();
        store.put_value("key", "v2").await.unwrap();

        let page = store.list_page(None).await.unwrap();
        assert_eq!(page.secrets, vec![SecretSummary::new("key", "api key")]);
    }

    #[tokio::test]
    async fn list_page_on_empty_store() {
        let store = MemoryStore::new();
        let page = store.list_page(None).await.unwrap();
        assert!(page.secrets.is_empty());
        assert_eq!(page.next_token, None);
    }

    #[tokio::test]
    async fn list_page_splits_by_page_size() {
        let store = MemoryStore::with_page_size(2);
        for name in ["c", "a", "e", "b", "d"] {
            store.create(name, "v", None).await.unwrap();
        }

        let first = store.list_page(None).await.unwrap();
        assert_eq!(first.next_token.as_deref(), Some("b"));
        let second = store.list_page(first.next_token).await.unwrap();
        assert_eq!(second.next_token.as_deref(), Some("d"));
        let third = store.list_page(second.next_token).await.unwrap();
        assert_eq!(third.next_token, None);

        let names: Vec<_> = [first.secrets, second.secrets, third.secrets]
            .concat()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn list_page_exact_multiple_has_no_trailing_token() {
        let store = MemoryStore::with_page_size(2);
        store.create("a", "v", None).await.unwrap();
        store.create("b", "v", None).await.unwrap();

        let page = store.list_page(None).await.unwrap();
        assert_eq!(page.secrets.len(), 2);
        assert_eq!(page.next_token, None);
    }

    #[tokio::test]
    async fn list_all_walks_every_page() {
        let store = MemoryStore::with_page_size(1);
        store.create("x", "1", Some("first")).await.unwrap();
        store.create("y", "2", None).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(
            all,
            vec![SecretSummary::new("x", "first"), SecretSummary::new("y", "")]
        );
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        store.create("key", "val", None).await.unwrap();
        assert_eq!(clone.get("key").await.unwrap(), "val");
    }
}
