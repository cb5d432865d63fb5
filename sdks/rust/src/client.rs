//! `secretdesk` client implementation.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::SecretDeskError;
use crate::types::{ApiErrorBody, NewSecret, Secret, UpdateSecretBody};
use crate::{
    DEFAULT_BASE_URL, DEFAULT_PASSWORD, DEFAULT_TIMEOUT, DEFAULT_USERNAME, SecretDesk,
    SecretDeskConfig,
};

impl SecretDesk {
    /// Create a client for `base_url`. Reads credentials from env vars.
    ///
    /// # Errors
    ///
    /// Returns `SecretDeskError::Config` if the URL is not `http(s)://`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SecretDeskError> {
        Self::with_config(SecretDeskConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    /// Create a new client with full configuration.
    ///
    /// # Errors
    ///
    /// Returns `SecretDeskError::Config` if the URL is not `http(s)://`, or
    /// `SecretDeskError::Network` if the HTTP client cannot be built.
    #[allow(clippy::needless_pass_by_value)]
    pub fn with_config(cfg: SecretDeskConfig) -> Result<Self, SecretDeskError> {
        let base_url = first_non_empty(&[
            &cfg.base_url,
            &std::env::var("SECRETDESK_URL").unwrap_or_default(),
            DEFAULT_BASE_URL,
        ])
        .trim_end_matches('/')
        .to_owned();

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SecretDeskError::Config(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }

        let username = first_non_empty(&[
            &cfg.username,
            &std::env::var("BASIC_AUTH_USER").unwrap_or_default(),
            DEFAULT_USERNAME,
        ]);

        let password = first_non_empty(&[
            &cfg.password,
            &std::env::var("BASIC_AUTH_PASS").unwrap_or_default(),
            DEFAULT_PASSWORD,
        ]);

        let timeout = if cfg.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            cfg.timeout
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("secretdesk-rust-sdk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SecretDeskError::Network)?;

        Ok(Self {
            base_url,
            username,
            password,
            client,
        })
    }

    /// List every secret's name and description.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn list_secrets(&self) -> Result<Vec<Secret>, SecretDeskError> {
        let resp = self.send(self.client.get(self.url(""))).await?;
        // Older servers answered an empty store with `null`.
        let secrets: Option<Vec<Secret>> = decode(resp).await?;
        Ok(secrets.unwrap_or_default())
    }

    /// Fetch a secret's current value.
    ///
    /// # Errors
    ///
    /// Returns `SecretDeskError::Config` for an empty name, or an API error
    /// if the store could not read the secret.
    pub async fn get_secret(&self, name: &str) -> Result<Secret, SecretDeskError> {
        require_name(name)?;
        let resp = self.send(self.client.get(self.url(name))).await?;
        decode(resp).await
    }

    /// Create a new secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails (including duplicates).
    pub async fn create_secret(&self, secret: &NewSecret) -> Result<(), SecretDeskError> {
        self.send(self.client.post(self.url("")).json(secret))
            .await?;
        Ok(())
    }

    /// Overwrite a secret's value.
    ///
    /// # Errors
    ///
    /// Returns `SecretDeskError::Config` for an empty name, or an API error
    /// if the store could not write the value.
    pub async fn update_secret(&self, name: &str, value: &str) -> Result<(), SecretDeskError> {
        require_name(name)?;
        self.send(
            self.client
                .put(self.url(name))
                .json(&UpdateSecretBody { value }),
        )
        .await?;
        Ok(())
    }

    // --- Private ---

    /// `{base}/api/secrets` or `{base}/api/secrets/{name}`, encoding each
    /// path segment of the name but keeping its `/` separators.
    fn url(&self, name: &str) -> String {
        if name.is_empty() {
            return format!("{}/api/secrets", self.base_url);
        }

        let encoded: Vec<_> = name.split('/').map(urlencoding::encode).collect();
        format!("{}/api/secrets/{}", self.base_url, encoded.join("/"))
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, SecretDeskError> {
        let resp = req
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SecretDeskError::Timeout
                } else {
                    SecretDeskError::Network(e)
                }
            })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let error_text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&error_text)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        if status == StatusCode::UNAUTHORIZED {
            return Err(SecretDeskError::Auth(message));
        }

        Err(SecretDeskError::Api {
            status_code: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, SecretDeskError> {
    let bytes = resp.bytes().await.map_err(SecretDeskError::Network)?;
    serde_json::from_slice(&bytes).map_err(SecretDeskError::Json)
}

fn require_name(name: &str) -> Result<(), SecretDeskError> {
    if name.strip_prefix('/').unwrap_or(name).is_empty() {
        return Err(SecretDeskError::Config(
            "secret name must not be empty".to_owned(),
        ));
    }
    Ok(())
}

fn first_non_empty(vals: &[&str]) -> String {
    for v in vals {
        if !v.is_empty() {
            return (*v).to_owned();
        }
    }
    String::new()
}
