//! HubConf webhook server binary.
//!
//! See [`hubconf_api::settings`] for the environment variables it reads.
//! `RUST_LOG` sets the log level (default: info).

use std::env;
use std::sync::Arc;

use hubconf_api::{ApiServer, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let settings = Settings::from_env()?;
    tracing::info!(
        user = settings.user.as_deref().unwrap_or("-"),
        api_url = %settings.api_url,
        signed = settings.webhook_secret.is_some(),
        "Starting HubConf webhook server"
    );

    let client = settings.client()?;
    let state = AppState::new(Arc::new(client), settings.webhook_secret);
    ApiServer::new(settings.server, state).serve().await
}
