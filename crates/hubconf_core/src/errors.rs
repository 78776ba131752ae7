//! Error types for reconciliation.
//!
//! Nothing in this crate recovers from an error: a failure aborts the
//! reconciliation of the resource being applied and bubbles up to the caller.
//! Changes already sent to GitHub stay applied.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result alias used throughout the crate.
pub type HubConfResult<T> = Result<T, HubConfError>;

/// Top level error of the reconciliation engine.
#[derive(Error, Debug)]
pub enum HubConfError {
    /// Malformed data, either from GitHub or from the desired configuration.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation is refused by design (creating organization hooks,
    /// rewriting a hook whose configuration carries secrets).
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// A call to GitHub failed. Propagated as returned by the client.
    #[error(transparent)]
    Transport(#[from] github_client::Error),

    /// The user declined the proposed changes.
    #[error("Changes were declined, nothing was applied")]
    ConfirmationDeclined,

    /// A configuration could not be converted to or from its generic form.
    #[error("Failed to convert configuration: {0}")]
    Serialization(String),
}

/// Malformed input detected while reading or planning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// None of the admin/push/pull flags is set.
    #[error("Permission flags grant no access: {flags}")]
    NoPermission { flags: String },

    /// The desired configuration tries to change the id GitHub assigned to
    /// a team.
    #[error("Cannot update the id of team '{team}' (current {current}, desired {desired:?})")]
    TeamIdMismatch {
        team: String,
        current: u64,
        desired: Option<u64>,
    },

    /// A repository hook is keyed by something else than its derived name.
    #[error("Hook key '{key}' does not match the hook's derived name '{derived}'")]
    HookKeyMismatch { key: String, derived: String },

    /// GitHub returned data that does not have the expected shape.
    #[error("Unexpected {resource} payload: {reason}")]
    MalformedPayload {
        resource: &'static str,
        reason: String,
    },
}
