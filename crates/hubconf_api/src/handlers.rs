//! HTTP request handlers

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use hubconf_core::{
    changes::confirm_config_changes, config::REPO_CONFIG_FILE, HubConfError, LogSink, Repository,
    RepositoryConfig,
};
use secrecy::ExposeSecret;
use tracing::{info, instrument, warn};

use crate::errors::ApiError;
use crate::models::{EventPayload, HealthCheckResponse, WebhookResponse, REPO_SYNC_ACTION};
use crate::signature::{self, SIGNATURE_HEADER};
use crate::AppState;

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// Header naming the kind of event GitHub delivers.
pub const EVENT_HEADER: &str = "x-github-event";

/// Health check endpoint
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Receives every webhook event.
///
/// `push` events re-apply the repository configuration file; any other event
/// is acknowledged without action.
pub async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    if let Some(secret) = &state.webhook_secret {
        let provided = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
        if !signature::verify(&body, secret.expose_secret().as_bytes(), provided) {
            return Err(ApiError::InvalidSignature);
        }
    }

    let event = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest("missing X-GitHub-Event header".to_string()))?
        .to_string();
    let target = EventPayload::parse(&body)?.target()?;

    info!(event = %event, repo = %target.full_name, "Handling event");
    let repo = Repository::new(state.api.clone(), target.owner, target.name);

    let mut actions = Vec::new();
    if event == "push" && sync_repository(&repo).await? {
        actions.push(REPO_SYNC_ACTION.to_string());
    }

    Ok(Json(WebhookResponse {
        success: true,
        repo: target.full_name,
        actions,
    }))
}

/// Applies the configuration file committed to `repo`, if there is one.
///
/// Returns true when changes were applied.
#[instrument(skip(repo), fields(repo = %repo.full_name()))]
pub async fn sync_repository(repo: &Repository) -> Result<bool, ApiError> {
    let text = match repo.config_file(REPO_CONFIG_FILE).await {
        Ok(text) => text,
        Err(HubConfError::Transport(github_client::Error::NotFound { .. })) => {
            warn!("No {} in repository, skipping repo config", REPO_CONFIG_FILE);
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    let desired: RepositoryConfig =
        serde_yaml::from_str(&text).map_err(|e| ApiError::InvalidConfig(e.to_string()))?;
    let current = repo.describe().await?;

    info!("Checking if any repo change...");
    let approved = confirm_config_changes(&current, &desired, false, &mut LogSink)?;
    if !approved {
        info!("No changes");
        return Ok(false);
    }

    repo.update(&desired).await?;
    Ok(true)
}
