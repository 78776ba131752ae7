//! Error types for GitHub client operations.
//!
//! Every failure of a call against the GitHub API surfaces as one of the
//! variants below. The client never retries and never swallows a non-2xx
//! response; callers decide what a failure means for them.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match api.delete("/repos/octo/hello/labels/bug").await {
///     Ok(()) => println!("label removed"),
///     Err(Error::NotFound { path }) => println!("{path} was already gone"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub answered with a non-success status code.
    ///
    /// `message` is the `message` field GitHub puts in its error bodies.
    #[error("{method} {path} failed with status {status}: {message}")]
    Api {
        method: &'static str,
        path: String,
        status: u16,
        message: String,
    },

    /// Building the underlying octocrab client failed.
    ///
    /// The contained string provides specific details about the failure,
    /// such as an unparseable base URL.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// File content returned by the contents endpoint could not be decoded.
    #[error("Failed to decode file content: {0}")]
    Decoding(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The requested resource was not found (HTTP 404).
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    /// The request never produced an HTTP response (connection, URI, body
    /// streaming failures).
    #[error("Failed to reach GitHub: {0}")]
    Transport(String),

    /// A `get` returned something that is neither an object nor a list of
    /// objects, so no field mask can be applied to it.
    #[error("Unexpected payload from GitHub: {0}")]
    UnexpectedPayload(String),
}

impl Error {
    /// HTTP status associated with the error, when GitHub sent one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}
