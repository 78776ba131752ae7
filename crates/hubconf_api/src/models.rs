//! Webhook payloads and responses.

use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Action reported when the repository configuration was applied.
pub const REPO_SYNC_ACTION: &str = "repo_sync";

/// The part of a GitHub event this server needs.
#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
    pub repository: RepositoryPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    pub full_name: String,
    pub name: String,
    pub owner: OwnerPayload,
}

/// Push events carry the owner `name`, most other events only `login`.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
}

/// Repository an event refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTarget {
    pub full_name: String,
    pub owner: String,
    pub name: String,
}

impl EventPayload {
    /// Parses a raw event body.
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
    }

    pub fn target(self) -> Result<EventTarget, ApiError> {
        let RepositoryPayload {
            full_name,
            name,
            owner,
        } = self.repository;

        let owner = owner.name.or(owner.login).ok_or_else(|| {
            ApiError::BadRequest("repository owner has neither name nor login".to_string())
        })?;

        Ok(EventTarget {
            full_name,
            owner,
            name,
        })
    }
}

/// Answer to a webhook event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub repo: String,
    pub actions: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Current timestamp (ISO 8601)
    pub timestamp: String,
}
