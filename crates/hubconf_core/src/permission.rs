//! Collapsing GitHub's permission flags into a single access level.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "permission_tests.rs"]
mod tests;

/// Access level of a collaborator or of a team on a repository.
///
/// Levels are ordered: `Admin` implies `Push` which implies `Pull`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Pull,
    Push,
    Admin,
}

impl Permission {
    /// Wire representation, as accepted by GitHub's `permission` fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Pull => "pull",
            Permission::Push => "push",
            Permission::Admin => "admin",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `permissions` object GitHub returns for collaborators and team
/// repositories. Flags GitHub adds beyond these three are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionFlags {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default)]
    pub pull: bool,
}

impl fmt::Display for PermissionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "admin={} push={} pull={}",
            self.admin, self.push, self.pull
        )
    }
}

/// Returns the highest level granted by `flags`.
///
/// # Errors
///
/// Returns [`ValidationError::NoPermission`] when no flag is set.
pub fn decode_permission(flags: &PermissionFlags) -> Result<Permission, ValidationError> {
    if flags.admin {
        Ok(Permission::Admin)
    } else if flags.push {
        Ok(Permission::Push)
    } else if flags.pull {
        Ok(Permission::Pull)
    } else {
        Err(ValidationError::NoPermission {
            flags: flags.to_string(),
        })
    }
}
