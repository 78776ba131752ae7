//! Server settings read from the environment.
//!
//! - `HUBCONF_USER`: GitHub user, optional; enables basic authentication
//! - `HUBCONF_TOKEN`: GitHub token (required)
//! - `HUBCONF_API_URL`: GitHub API url (default: https://api.github.com)
//! - `HUBCONF_WEBHOOK_SECRET`: webhook secret, optional
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to listen on (default: 8080)

use anyhow::{anyhow, Context};
use github_client::{create_basic_auth_client, create_token_client, GitHubClient, DEFAULT_API_URL};
use secrecy::{ExposeSecret, SecretString};

use crate::{server::ApiConfig, DEFAULT_PORT};

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

/// Everything the server needs to start.
#[derive(Debug)]
pub struct Settings {
    pub user: Option<String>,
    pub token: SecretString,
    pub api_url: String,
    pub webhook_secret: Option<SecretString>,
    pub server: ApiConfig,
}

impl Settings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup`, which returns the value of an
    /// environment variable. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = get("HUBCONF_TOKEN").ok_or_else(|| anyhow!("HUBCONF_TOKEN is not set"))?;
        let port = match get("API_PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("Invalid API_PORT '{}'", port))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            user: get("HUBCONF_USER"),
            token: SecretString::from(token),
            api_url: get("HUBCONF_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            webhook_secret: get("HUBCONF_WEBHOOK_SECRET").map(SecretString::from),
            server: ApiConfig {
                host: get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port,
            },
        })
    }

    /// Builds the GitHub client the handlers use.
    pub fn client(&self) -> anyhow::Result<GitHubClient> {
        let octocrab = match &self.user {
            Some(user) => create_basic_auth_client(user, self.token.expose_secret(), &self.api_url)?,
            None => create_token_client(self.token.expose_secret(), &self.api_url)?,
        };
        Ok(GitHubClient::new(octocrab))
    }
}
