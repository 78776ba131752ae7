//! HubConf webhook server
//!
//! Receives GitHub webhook events and keeps each repository in line with the
//! configuration file committed to it: on every `push` the repository
//! configuration file is read from the default branch and applied.
//!
//! # Routes
//!
//! - POST /github - GitHub webhook receiver
//! - GET  /health - Health check

use std::sync::Arc;

use github_client::GitHubApi;
use secrecy::SecretString;

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod settings;
pub mod signature;

pub use errors::{ApiError, ErrorResponse};
pub use server::{ApiConfig, ApiServer};
pub use settings::Settings;

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Client used to read and update repositories
    pub api: Arc<dyn GitHubApi>,

    /// Shared secret of the webhook; when set every event must be signed
    pub webhook_secret: Option<SecretString>,
}

impl AppState {
    pub fn new(api: Arc<dyn GitHubApi>, webhook_secret: Option<SecretString>) -> Self {
        Self {
            api,
            webhook_secret,
        }
    }
}
