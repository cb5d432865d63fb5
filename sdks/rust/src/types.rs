//! Public types for the `secretdesk` SDK.

use serde::{Deserialize, Serialize};

/// A secret returned by the API.
///
/// Listing fills `name` and `description`; reading fills `name` and `value`.
/// Fields the server omitted are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Secret {
    /// Secret name.
    pub name: String,
    /// Secret value (empty in listings).
    #[serde(default)]
    pub value: String,
    /// Description (empty when reading a single secret).
    #[serde(default)]
    pub description: String,
}

/// Request body for creating a secret.
#[derive(Debug, Clone, Serialize)]
pub struct NewSecret {
    /// Secret name. May contain `/`.
    pub name: String,
    /// Secret value.
    pub value: String,
    /// Optional description; omitted from the request when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl NewSecret {
    /// A secret with no description.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: String::new(),
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

// --- Internal API types ---

#[derive(Serialize)]
pub(crate) struct UpdateSecretBody<'a> {
    pub value: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: Option<String>,
}
