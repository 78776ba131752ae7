//! Reading and writing configuration files.
//!
//! The format follows the file extension: `.yml`/`.yaml`, `.json` or
//! `.toml`.

use std::{fs, path::Path};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::errors::Error;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Picks the format from the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "yml" | "yaml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Format::Yaml => "YAML",
            Format::Json => "JSON",
            Format::Toml => "TOML",
        }
    }

    /// Parses `content` in this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, String> {
        match self {
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Renders `value` in this format.
    pub fn render<T: Serialize>(self, value: &T) -> Result<String, String> {
        match self {
            Format::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
            Format::Json => serde_json::to_string_pretty(value)
                .map(|mut text| {
                    text.push('\n');
                    text
                })
                .map_err(|e| e.to_string()),
            Format::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
        }
    }
}

/// Loads a configuration from `path`.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let format = Format::from_path(path)?;
    debug!(path = ?path, format = format.name(), "Loading configuration");

    let content = fs::read_to_string(path).map_err(|source| Error::LoadFile {
        path: path.display().to_string(),
        source,
    })?;

    format.parse(&content).map_err(|message| Error::ParseFile {
        path: path.display().to_string(),
        format: format.name(),
        message,
    })
}

/// Writes `value` to `path`, replacing the file.
///
/// TOML cannot hold null values; configurations with unset options have to
/// be written as YAML or JSON.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
    let format = Format::from_path(path)?;
    debug!(path = ?path, format = format.name(), "Saving configuration");

    let content = format.render(value).map_err(|message| Error::SerializeFile {
        path: path.display().to_string(),
        format: format.name(),
        message,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::WriteFile {
            path: parent.display().to_string(),
            source,
        })?;
    }

    fs::write(path, content).map_err(|source| Error::WriteFile {
        path: path.display().to_string(),
        source,
    })
}
