use std::io;

use hubconf_core::HubConfError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Exit code used when the user declines changes with abort requested.
pub const EXIT_DECLINED: i32 = 2;

/// Errors that can occur in the HubConf CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// No usable GitHub credentials.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Error loading or parsing the settings file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid or missing command-line arguments.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A desired-state file could not be read.
    #[error("Failed to read {path}: {source}")]
    LoadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A desired-state file could not be written.
    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A desired-state file does not hold a valid configuration.
    #[error("Failed to parse {format} file {path}: {message}")]
    ParseFile {
        path: String,
        format: &'static str,
        message: String,
    },

    /// A configuration cannot be written in the requested format.
    #[error("Failed to serialize {path} as {format}: {message}")]
    SerializeFile {
        path: String,
        format: &'static str,
        message: String,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported file extension '{extension}', expected yml, yaml, json or toml")]
    UnsupportedFormat { extension: String },

    /// Reconciliation failed or was declined.
    #[error(transparent)]
    Core(#[from] HubConfError),

    /// Building the GitHub client failed.
    #[error(transparent)]
    GitHub(#[from] github_client::Error),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Core(HubConfError::ConfirmationDeclined) => EXIT_DECLINED,
            _ => 1,
        }
    }
}
