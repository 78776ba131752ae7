//! Desired and current configuration of organizations and repositories.
//!
//! Both sides of a reconciliation use these types: the desired side is read
//! from a configuration file, the current side is assembled from masked
//! GitHub responses. Keys of every mapping are the resource identity.

use crate::permission::Permission;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Path of the repository configuration file, relative to the repository
/// root.
pub const REPO_CONFIG_FILE: &str = ".hubconf.repo.yml";

/// Flat mapping of organization or repository settings.
pub type Options = Map<String, Value>;

/// Role of a user inside an organization or a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberConfig {
    pub role: String,
}

impl MemberConfig {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

/// Access granted to a repository collaborator, or to a team on one
/// repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    pub permission: Permission,
}

impl AccessConfig {
    pub fn new(permission: Permission) -> Self {
        Self { permission }
    }
}

/// An issue label. The label name is the mapping key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub color: String,
}

/// A team and everything attached to it. The team name is the mapping key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamConfig {
    /// Assigned by GitHub when the team is created. Never changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,

    #[serde(default)]
    pub members: BTreeMap<String, MemberConfig>,

    /// Repository name to the access the team has on it.
    #[serde(default)]
    pub repositories: BTreeMap<String, AccessConfig>,
}

impl TeamConfig {
    /// Compares the settings sent in team POST/PATCH payloads, ignoring the
    /// id, members and repositories.
    pub fn same_metadata(&self, other: &TeamConfig) -> bool {
        self.description == other.description
            && self.privacy == other.privacy
            && self.permission == other.permission
    }

    /// Payload creating or updating the team named `name`.
    pub fn metadata_payload(&self, name: &str) -> Value {
        let mut payload = Map::new();
        payload.insert("name".to_string(), Value::from(name));
        if let Some(description) = &self.description {
            payload.insert("description".to_string(), Value::from(description.as_str()));
        }
        if let Some(privacy) = &self.privacy {
            payload.insert("privacy".to_string(), Value::from(privacy.as_str()));
        }
        if let Some(permission) = &self.permission {
            payload.insert("permission".to_string(), Value::from(permission.as_str()));
        }
        Value::Object(payload)
    }
}

/// A webhook on a repository or an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    /// `web` for webhooks, the service name for legacy services.
    pub name: String,

    #[serde(default)]
    pub events: BTreeSet<String>,

    #[serde(default = "default_active")]
    pub active: bool,

    /// Delivery settings. GitHub masks `secret` and `token` values when read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

fn default_active() -> bool {
    true
}

/// Keys of a hook configuration whose values GitHub never returns.
pub const SECRET_KEYS: [&str; 2] = ["secret", "token"];

impl HookConfig {
    /// Identity of a repository hook: the delivery url for `web` hooks, the
    /// service name otherwise.
    pub fn derived_name(&self) -> String {
        if self.name == "web" {
            if let Some(url) = self
                .config
                .as_ref()
                .and_then(|c| c.get("url"))
                .and_then(Value::as_str)
            {
                return url.to_string();
            }
        }
        self.name.clone()
    }

    /// Returns true when the configuration carries a secret-bearing key.
    pub fn has_secret(&self) -> bool {
        self.config
            .as_ref()
            .is_some_and(|c| SECRET_KEYS.iter().any(|k| c.contains_key(*k)))
    }
}

/// Whole configuration of an organization.
///
/// Absent sections are left untouched by an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganizationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<BTreeMap<String, MemberConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<BTreeMap<String, TeamConfig>>,

    /// Keyed by hook name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<BTreeMap<String, HookConfig>>,
}

impl OrganizationConfig {
    /// Clears the ids of teams that `desired` names without one.
    ///
    /// A desired team without an id stands for the live team of the same
    /// name, so the id it lacks is not a change.
    pub fn hide_unrequested_team_ids(&mut self, desired: &OrganizationConfig) {
        let (Some(teams), Some(wanted)) = (self.teams.as_mut(), desired.teams.as_ref()) else {
            return;
        };
        for (name, team) in teams.iter_mut() {
            if wanted.get(name).is_some_and(|t| t.id.is_none()) {
                team.id = None;
            }
        }
    }
}

/// Whole configuration of a repository.
///
/// Absent sections are left untouched by an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<BTreeMap<String, AccessConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, LabelConfig>>,

    /// Keyed by [`HookConfig::derived_name`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<BTreeMap<String, HookConfig>>,
}
