//! `secretdesk` server entry point.
//!
//! Loads configuration (optionally from a `.env` file), connects the secret
//! store, and serves the API until SIGINT or SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use secretdesk_server::config::{ServerConfig, StoreBackendType};
use secretdesk_server::routes::build_router;
use secretdesk_server::state::AppState;
use secretdesk_store::{MemoryStore, SecretStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Must run before the config is read so `.env` values are visible.
    let dotenv = dotenvy::dotenv();

    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env file"),
        Err(e) if e.not_found() => info!("no .env file found, using environment variables"),
        Err(e) => warn!(error = %e, "failed to load .env file"),
    }

    info!(
        store = ?config.store_backend,
        username = %config.credentials.username,
        "secretdesk starting"
    );

    let store = build_store(&config).await?;
    let state = Arc::new(AppState::new(store));
    let app = build_router(state, config.credentials.clone(), &config.cors_origins);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "secretdesk server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("secretdesk server stopped");
    Ok(())
}

/// Construct the configured secret store backend.
async fn build_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn SecretStore>> {
    let store: Arc<dyn SecretStore> = match config.store_backend {
        StoreBackendType::Memory => {
            warn!("using in-memory secret store (data will not persist)");
            Arc::new(MemoryStore::new())
        }
        #[cfg(feature = "aws-backend")]
        StoreBackendType::Aws => {
            info!(page_size = ?config.list_page_size, "using AWS Secrets Manager");
            Arc::new(
                secretdesk_store::AwsSecretsManagerStore::from_env()
                    .await
                    .with_page_size(config.list_page_size),
            )
        }
        #[cfg(not(feature = "aws-backend"))]
        StoreBackendType::Aws => {
            anyhow::bail!(
                "AWS Secrets Manager requested but feature 'aws-backend' is not enabled"
            );
        }
    };

    Ok(store)
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
