//! Rust client for the `secretdesk` API.
//!
//! Wraps the four `/api/secrets` routes with typed requests, HTTP Basic
//! authentication, and error bodies decoded into [`SecretDeskError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use secretdesk_sdk::{NewSecret, SecretDesk, SecretDeskConfig};
//!
//! # async fn example() -> Result<(), secretdesk_sdk::SecretDeskError> {
//! let client = SecretDesk::with_config(SecretDeskConfig {
//!     base_url: "http://localhost:8080".to_owned(),
//!     username: "admin".to_owned(),
//!     password: "admin".to_owned(),
//!     ..Default::default()
//! })?;
//!
//! client
//!     .create_secret(&NewSecret::new("prd/database", "USER=admin"))
//!     .await?;
//! let secret = client.get_secret("prd/database").await?;
//! assert_eq!(secret.value, "USER=admin");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use error::SecretDeskError;
pub use types::{NewSecret, Secret};

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the `secretdesk` client.
///
/// Empty fields fall back to `SECRETDESK_URL`, `BASIC_AUTH_USER`, and
/// `BASIC_AUTH_PASS`, then to the server's own defaults.
#[derive(Clone)]
pub struct SecretDeskConfig {
    /// API base URL, without the `/api` suffix. Default: `http://localhost:8080`.
    pub base_url: String,
    /// Basic auth username.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// Request timeout. Default: 10 seconds.
    pub timeout: Duration,
}

impl Default for SecretDeskConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for SecretDeskConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretDeskConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// `secretdesk` API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct SecretDesk {
    base_url: String,
    username: String,
    password: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for SecretDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretDesk")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
