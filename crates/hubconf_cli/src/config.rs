//! Settings for the HubConf CLI.
//!
//! Credentials and the API endpoint can come from the command line, the
//! environment (through clap) or a TOML settings file. Command line and
//! environment win over the file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use github_client::{
    create_basic_auth_client, create_token_client, GitHubClient, DEFAULT_API_URL,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default settings file name
pub const DEFAULT_CONFIG_FILENAME: &str = "hubconf.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Settings file contents.
///
/// # Example TOML Configuration
///
/// ```toml
/// user = "octocat"
/// token = "ghp_xxx"
/// github_base_url = "https://github.example.com/api/v3"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// GitHub user; when set the token is sent with basic authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Personal access token or password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// API root, for GitHub Enterprise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_base_url: Option<String>,
}

impl AppConfig {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read or
    /// does not hold valid settings.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))
    }

    /// Like [`AppConfig::load`] but a missing file yields empty settings.
    pub fn load_or_default(path: &Path) -> Result<Self, Error> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Saves the settings as pretty TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Combines these settings with command line values.
    ///
    /// # Errors
    ///
    /// Returns `Error::Auth` when no token is available from either source.
    pub fn resolve(
        self,
        user: Option<String>,
        token: Option<String>,
        github_base_url: Option<String>,
    ) -> Result<Credentials, Error> {
        let token = token.or(self.token).ok_or_else(|| {
            Error::Auth(
                "No GitHub token given. Use --token, GITHUB_TOKEN or the configuration file"
                    .to_string(),
            )
        })?;

        Ok(Credentials {
            user: user.or(self.user),
            token: SecretString::from(token),
            base_url: github_base_url
                .or(self.github_base_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

/// Credentials ready to build a client with.
#[derive(Debug)]
pub struct Credentials {
    pub user: Option<String>,
    pub token: SecretString,
    pub base_url: String,
}

impl Credentials {
    /// Builds the GitHub client. Basic authentication is used when a user is
    /// known, token authentication otherwise.
    pub fn client(&self) -> Result<GitHubClient, Error> {
        let octocrab = match &self.user {
            Some(user) => {
                create_basic_auth_client(user, self.token.expose_secret(), &self.base_url)?
            }
            None => create_token_client(self.token.expose_secret(), &self.base_url)?,
        };
        Ok(GitHubClient::new(octocrab))
    }
}

/// Returns `explicit` when given, the default file in the current directory
/// otherwise.
pub fn get_config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(DEFAULT_CONFIG_FILENAME),
    }
}
