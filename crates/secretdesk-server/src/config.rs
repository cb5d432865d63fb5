//! Server configuration for `secretdesk`.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Empty values are treated the same as unset ones.

use std::net::SocketAddr;

/// Username used when `BASIC_AUTH_USER` is not set.
pub const DEFAULT_USERNAME: &str = "admin";
/// Password used when `BASIC_AUTH_PASS` is not set.
pub const DEFAULT_PASSWORD: &str = "admin";
/// Port used when neither `SECRETDESK_BIND_ADDR` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 8080;
/// Origins of the bundled web UI's dev server.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// The single credential pair accepted by the auth gate.
    pub credentials: BasicCredentials,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Which secret store backs the API.
    pub store_backend: StoreBackendType,
    /// Entries requested per remote listing page (service default if `None`).
    pub list_page_size: Option<i32>,
    /// Browser origins allowed by CORS.
    pub cors_origins: Vec<String>,
}

/// Supported secret store backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackendType {
    /// AWS Secrets Manager, configured from the standard AWS environment.
    Aws,
    /// In-memory (development only, data lost on restart).
    Memory,
}

/// A username/password pair for HTTP Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for BasicCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SECRETDESK_BIND_ADDR`: full bind address (overrides `PORT`)
    /// - `PORT`: port to bind on `0.0.0.0` (default: `8080`)
    /// - `BASIC_AUTH_USER` / `BASIC_AUTH_PASS`: credential pair (default: `admin` / `admin`)
    /// - `SECRETDESK_LOG_LEVEL`: log filter (default: `info`)
    /// - `SECRETDESK_STORE`: `aws` or `memory` (default: `aws`)
    /// - `SECRETDESK_LIST_PAGE_SIZE`: `MaxResults` per `ListSecrets` call (optional)
    /// - `SECRETDESK_CORS_ORIGINS`: comma-separated allowed origins
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// [`from_env`](Self::from_env) delegates here with the process
    /// environment; tests pass a map instead.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let default_addr = SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT));
        // Priority: SECRETDESK_BIND_ADDR > PORT > default 0.0.0.0:8080
        let bind_addr = if let Some(addr) = var("SECRETDESK_BIND_ADDR") {
            addr.trim().parse().unwrap_or(default_addr)
        } else if let Some(port) = var("PORT") {
            let port: u16 = port.trim().parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            default_addr
        };

        let credentials = BasicCredentials::new(
            var("BASIC_AUTH_USER").unwrap_or_else(|| DEFAULT_USERNAME.to_owned()),
            var("BASIC_AUTH_PASS").unwrap_or_else(|| DEFAULT_PASSWORD.to_owned()),
        );

        let log_level = var("SECRETDESK_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let store_backend = match var("SECRETDESK_STORE")
            .unwrap_or_default()
            .trim()
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackendType::Memory,
            _ => StoreBackendType::Aws,
        };

        let list_page_size = var("SECRETDESK_LIST_PAGE_SIZE").and_then(|v| v.trim().parse().ok());

        let cors_origins = var("SECRETDESK_CORS_ORIGINS").map_or_else(
            || DEFAULT_CORS_ORIGINS.iter().map(|&o| o.to_owned()).collect(),
            |v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_owned)
                    .collect()
            },
        );

        Self {
            bind_addr,
            credentials,
            log_level,
            store_backend,
            list_page_size,
            cors_origins,
        }
    }
}
