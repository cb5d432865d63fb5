//! AWS Secrets Manager backend.
//!
//! Each trait method issues exactly one Secrets Manager API call. Retry,
//! timeout, and credential refresh behavior are whatever the SDK's default
//! configuration provides.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use tracing::debug;

use crate::{SecretPage, SecretStore, SecretSummary, StoreError};

/// Largest `MaxResults` value Secrets Manager accepts for `ListSecrets`.
const MAX_PAGE_SIZE: i32 = 100;

/// Secret store backed by AWS Secrets Manager.
///
/// The wrapped [`Client`] is cheap to clone and safe to share across tasks;
/// it holds the long-lived connection pool and credential provider.
#[derive(Clone)]
pub struct AwsSecretsManagerStore {
    client: Client,
    page_size: Option<i32>,
}

impl std::fmt::Debug for AwsSecretsManagerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretsManagerStore")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl AwsSecretsManagerStore {
    /// Wrap an already-configured Secrets Manager client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            page_size: None,
        }
    }

    /// Build a client from the standard AWS environment and profile chain
    /// (`AWS_REGION`, `AWS_PROFILE`, `AWS_ENDPOINT_URL`, instance roles, ...).
    pub async fn from_env() -> Self {
        let sdk_config = aws_config::load_from_env().await;
        Self::new(Client::new(&sdk_config))
    }

    /// Request at most `page_size` entries per `ListSecrets` call.
    ///
    /// Values are clamped to the range the service accepts. `None` leaves
    /// the choice to the service.
    #[must_use]
    pub fn with_page_size(mut self, page_size: Option<i32>) -> Self {
        self.page_size = page_size.map(|size| size.clamp(1, MAX_PAGE_SIZE));
        self
    }
}

#[async_trait::async_trait]
impl SecretStore for AwsSecretsManagerStore {
    async fn list_page(&self, next_token: Option<String>) -> Result<SecretPage, StoreError> {
        debug!(has_token = next_token.is_some(), "ListSecrets");

        let output = self
            .client
            .list_secrets()
            .set_next_token(next_token)
            .set_max_results(self.page_size)
            .send()
            .await
            .map_err(|e| StoreError::List {
                reason: describe(&e),
            })?;

        let secrets = output
            .secret_list()
            .iter()
            .map(|entry| {
                SecretSummary::new(
                    entry.name().unwrap_or_default(),
                    entry.description().unwrap_or_default(),
                )
            })
            .collect();

        Ok(SecretPage {
            secrets,
            next_token: output.next_token().map(str::to_owned),
        })
    }

    async fn get(&self, name: &str) -> Result<String, StoreError> {
        debug!(secret = %name, "GetSecretValue");

        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| StoreError::Get {
                name: name.to_owned(),
                reason: describe(&e),
            })?;

        Ok(output.secret_string().unwrap_or_default().to_owned())
    }

    async fn create(
        &self,
        name: &str,
        value: &str,
        description: Option<&str>,
    ) -> Result<(), StoreError> {
        debug!(secret = %name, "CreateSecret");

        self.client
            .create_secret()
            .name(name)
            .secret_string(value)
            .set_description(description.map(str::to_owned))
            .send()
            .await
            .map_err(|e| StoreError::Create {
                name: name.to_owned(),
                reason: describe(&e),
            })?;

        Ok(())
    }

    async fn put_value(&self, name: &str, value: &str) -> Result<(), StoreError> {
        debug!(secret = %name, "PutSecretValue");

        self.client
            .put_secret_value()
            .secret_id(name)
            .secret_string(value)
            .send()
            .await
            .map_err(|e| StoreError::PutValue {
                name: name.to_owned(),
                reason: describe(&e),
            })?;

        Ok(())
    }
}

/// Render an SDK error as `Code: message` for service errors, falling back
/// to the full error chain for transport and construction failures.
fn describe<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug + 'static,
{
    if let Some(service_err) = err.as_service_error() {
        match (service_err.code(), service_err.message()) {
            (Some(code), Some(message)) => return format!("{code}: {message}"),
            (Some(code), None) => return code.to_owned(),
            _ => {}
        }
    }
    DisplayErrorContext(err).to_string()
}

#[cfg(test)]
mod tests {
    use aws_sdk_secretsmanager::config::{BehaviorVersion, Region};
    use aws_sdk_secretsmanager::error::ErrorMetadata;
    use aws_sdk_secretsmanager::operation::list_secrets::ListSecretsError;

    use super::*;

    fn offline_client() -> Client {
        let config = aws_sdk_secretsmanager::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        Client::from_conf(config)
    }

    #[test]
    fn page_size_defaults_to_service_choice() {
        let store = AwsSecretsManagerStore::new(offline_client());
        assert_eq!(store.page_size, None);
    }

    #[test]
    fn page_size_is_clamped() {
        let store = AwsSecretsManagerStore::new(offline_client()).with_page_size(Some(500));
        assert_eq!(store.page_size, Some(MAX_PAGE_SIZE));

        let store = AwsSecretsManagerStore::new(offline_client()).with_page_size(Some(0));
        assert_eq!(store.page_size, Some(1));

        let store = AwsSecretsManagerStore::new(offline_client()).with_page_size(Some(25));
        assert_eq!(store.page_size, Some(25));
    }

    fn service_error(code: Option<&str>, message: Option<&str>) -> SdkError<ListSecretsError, ()> {
        let mut meta = ErrorMetadata::builder();
        if let Some(code) = code {
            meta = meta.code(code);
        }
        if let Some(message) = message {
            meta = meta.message(message);
        }
        SdkError::service_error(ListSecretsError::generic(meta.build()), ())
    }

    #[test]
    fn describe_renders_code_and_message() {
        let err = service_error(Some("ThrottlingException"), Some("Rate exceeded"));
        assert_eq!(describe(&err), "ThrottlingException: Rate exceeded");
    }

    #[test]
    fn describe_renders_bare_code() {
        let err = service_error(Some("InternalServiceError"), None);
        assert_eq!(describe(&err), "InternalServiceError");
    }

    #[test]
    fn describe_falls_back_to_error_chain() {
        let err: SdkError<ListSecretsError, ()> = SdkError::timeout_error("connect timed out");
        let rendered = describe(&err);
        assert!(rendered.contains("connect timed out"), "{rendered}");

        let err = service_error(None, Some("no code"));
        assert!(!describe(&err).is_empty());
    }

    #[test]
    fn debug_output_hides_client() {
        let store = AwsSecretsManagerStore::new(offline_client()).with_page_size(Some(10));
        let rendered = format!("{store:?}");
        assert!(rendered.contains("page_size: Some(10)"));
        assert!(!rendered.contains("Client"));
    }
}
