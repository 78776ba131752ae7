//! Crate for interacting with the GitHub REST API.
//!
//! The reconciliation engine only ever needs five verbs against paths relative
//! to the API root. This crate exposes them through the [`GitHubApi`] trait
//! and implements the trait on top of octocrab in [`GitHubClient`], adding
//! field masking and pagination to `get`.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::Value;
use tracing::{debug, error, instrument};
use url::Url;

pub mod contents;
pub mod errors;
pub mod mask;

pub use errors::Error;
pub use mask::project;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Public GitHub API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size requested from list endpoints.
const PAGE_SIZE: u32 = 100;

/// The contract the reconciliation engine has with GitHub.
///
/// Paths are relative to the API root, e.g. `/repos/octo/hello/labels`.
/// Every method fails on a non-2xx response; nothing is retried.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Fetches `path` and keeps only `fields` of the returned object, or of
    /// each object when GitHub returns a list.
    async fn get(&self, path: &str, fields: &[&str]) -> Result<Value, Error>;

    /// Sends a POST. Returns `None` when GitHub answers with an empty body.
    async fn post(&self, path: &str, payload: &Value) -> Result<Option<Value>, Error>;

    /// Sends a PUT. Returns `None` when GitHub answers with an empty body.
    async fn put(&self, path: &str, payload: &Value) -> Result<Option<Value>, Error>;

    /// Sends a PATCH. Returns `None` when GitHub answers with an empty body.
    async fn patch(&self, path: &str, payload: &Value) -> Result<Option<Value>, Error>;

    /// Sends a DELETE.
    async fn delete(&self, path: &str) -> Result<(), Error>;
}

/// HTTP verbs used by [`GitHubClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }
}

/// Body and pagination cursor of a successful response.
struct RawResponse {
    body: String,
    next: Option<String>,
}

/// A client for the GitHub API backed by octocrab.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Wraps an already configured octocrab instance.
    ///
    /// Use [`create_basic_auth_client`] or [`create_token_client`] to build
    /// one pointing at the right API root.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        verb: Verb,
        uri: &str,
        payload: Option<&Value>,
    ) -> Result<RawResponse, Error> {
        let response = match verb {
            Verb::Get => self.client._get(uri).await,
            Verb::Post => self.client._post(uri, payload).await,
            Verb::Put => self.client._put(uri, payload).await,
            Verb::Patch => self.client._patch(uri, payload).await,
            Verb::Delete => self.client._delete(uri, None::<&()>).await,
        }
        .map_err(|e| classify_error(verb, uri, e))?;

        let response = octocrab::map_github_error(response)
            .await
            .map_err(|e| classify_error(verb, uri, e))?;

        let next = next_page_link(response.headers());
        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(|e| classify_error(verb, uri, e))?;

        debug!(
            method = verb.as_str(),
            uri = uri,
            body_length = body.len(),
            "GitHub request succeeded"
        );

        Ok(RawResponse { body, next })
    }

    async fn write(
        &self,
        verb: Verb,
        path: &str,
        payload: &Value,
    ) -> Result<Option<Value>, Error> {
        let uri = encode_path(path)?;
        let response = self.send(verb, &uri, Some(payload)).await?;
        parse_optional_body(&response.body)
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    #[instrument(skip(self, fields))]
    async fn get(&self, path: &str, fields: &[&str]) -> Result<Value, Error> {
        let mut uri = format!("{}?per_page={}", encode_path(path)?, PAGE_SIZE);
        let mut items = Vec::new();

        loop {
            let response = self.send(Verb::Get, &uri, None).await?;
            match serde_json::from_str::<Value>(&response.body)? {
                Value::Array(page) => items.extend(page),
                other => return project(other, fields),
            }

            match response.next {
                Some(next) => uri = next,
                None => break,
            }
        }

        project(Value::Array(items), fields)
    }

    #[instrument(skip(self, payload))]
    async fn post(&self, path: &str, payload: &Value) -> Result<Option<Value>, Error> {
        self.write(Verb::Post, path, payload).await
    }

    #[instrument(skip(self, payload))]
    async fn put(&self, path: &str, payload: &Value) -> Result<Option<Value>, Error> {
        self.write(Verb::Put, path, payload).await
    }

    #[instrument(skip(self, payload))]
    async fn patch(&self, path: &str, payload: &Value) -> Result<Option<Value>, Error> {
        self.write(Verb::Patch, path, payload).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> Result<(), Error> {
        let uri = encode_path(path)?;
        self.send(Verb::Delete, &uri, None).await?;
        Ok(())
    }
}

/// Creates an `Octocrab` client that authenticates with a user name and a
/// personal access token (or password) using basic auth.
///
/// # Errors
///
/// Returns `Error::AuthError` when `base_url` is not a valid URI or the
/// client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_basic_auth_client, GitHubClient, DEFAULT_API_URL};
///
/// # fn example() -> Result<(), github_client::Error> {
/// let octocrab = create_basic_auth_client("octocat", "ghp_xxx", DEFAULT_API_URL)?;
/// let client = GitHubClient::new(octocrab);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(token))]
pub fn create_basic_auth_client(user: &str, token: &str, base_url: &str) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .base_uri(base_url)
        .map_err(|e| {
            error!(base_url = base_url, error = %e, "Invalid GitHub API base URL");
            Error::AuthError(format!("Invalid GitHub API base URL '{}': {}", base_url, e))
        })?
        .basic_auth(user.to_string(), token.to_string())
        .build()
        .map_err(|e| Error::AuthError(format!("Failed to build GitHub client: {}", e)))
}

/// Creates an `Octocrab` client that authenticates with a bearer token.
///
/// # Errors
///
/// Returns `Error::AuthError` when `base_url` is not a valid URI or the
/// client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &str, base_url: &str) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .base_uri(base_url)
        .map_err(|e| Error::AuthError(format!("Invalid GitHub API base URL '{}': {}", base_url, e)))?
        .personal_token(token.to_string())
        .build()
        .map_err(|e| Error::AuthError(format!("Failed to build GitHub client: {}", e)))
}

/// Percent-encodes the characters of a relative API path that cannot appear
/// in a URL path, such as spaces.
///
/// `/` and `%` are left alone: paths built from already encoded segments
/// (`labels/area%2Fui`) pass through unchanged.
fn encode_path(path: &str) -> Result<String, Error> {
    let mut url = Url::parse("http://localhost/")
        .map_err(|e| Error::Transport(format!("Failed to prepare path '{}': {}", path, e)))?;
    url.set_path(path);
    Ok(url.path().to_string())
}

/// Extracts the `rel="next"` target of a `Link` header.
fn next_page_link(headers: &http::HeaderMap) -> Option<String> {
    let link = headers.get(http::header::LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        if parts.any(|p| p.trim() == "rel=\"next\"") {
            Some(
                target
                    .trim_start_matches('<')
                    .trim_end_matches('>')
                    .to_string(),
            )
        } else {
            None
        }
    })
}

fn parse_optional_body(body: &str) -> Result<Option<Value>, Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(body)?))
}

fn classify_error(verb: Verb, path: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            error!(
                method = verb.as_str(),
                path = path,
                status = status,
                error_message = source.message,
                "Received an error from GitHub"
            );
            if status == 404 {
                Error::NotFound {
                    path: path.to_string(),
                }
            } else {
                Error::Api {
                    method: verb.as_str(),
                    path: path.to_string(),
                    status,
                    message: source.message.clone(),
                }
            }
        }
        other => {
            error!(
                method = verb.as_str(),
                path = path,
                error_message = other.to_string(),
                "Failed to send request to GitHub"
            );
            Error::Transport(other.to_string())
        }
    }
}
