//! Test utilities shared by the workspace test suites.
//!
//! [`FakeGitHub`] stands in for the GitHub API: GET responses are canned per
//! path, writes succeed (or fail) as configured, and every call lands in a
//! journal the tests assert on.

use async_trait::async_trait;
use github_client::{project, Error, GitHubApi};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// A call received by [`FakeGitHub`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// HTTP verb, upper case.
    pub method: &'static str,

    /// Path relative to the API root.
    pub path: String,

    /// Body of writes; `None` for GET and DELETE.
    pub payload: Option<Value>,
}

impl RecordedCall {
    /// Returns true for anything other than a GET.
    pub fn is_write(&self) -> bool {
        self.method != "GET"
    }
}

/// In-memory GitHub API.
///
/// # Examples
///
/// ```rust
/// use github_client::GitHubApi;
/// use serde_json::json;
/// use test_utils::FakeGitHub;
///
/// # async fn example() {
/// let github = FakeGitHub::new()
///     .with_get("/repos/octo/hello/labels", json!([{"name": "bug", "color": "fc2929", "id": 1}]));
///
/// let labels = github.get("/repos/octo/hello/labels", &["name", "color"]).await.unwrap();
/// assert_eq!(labels, json!([{"name": "bug", "color": "fc2929"}]));
/// assert!(github.writes().is_empty());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct FakeGitHub {
    gets: HashMap<String, Value>,
    write_responses: HashMap<(&'static str, String), Value>,
    failures: HashMap<(&'static str, String), u16>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeGitHub {
    /// Creates a fake with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `value` (unmasked) for GET requests on `path`.
    pub fn with_get(mut self, path: &str, value: Value) -> Self {
        self.gets.insert(path.to_string(), value);
        self
    }

    /// Answers `method` on `path` with `value` instead of an empty body.
    pub fn with_response(mut self, method: &'static str, path: &str, value: Value) -> Self {
        self.write_responses
            .insert((method, path.to_string()), value);
        self
    }

    /// Fails `method` on `path` with the given HTTP status.
    pub fn with_failure(mut self, method: &'static str, path: &str, status: u16) -> Self {
        self.failures.insert((method, path.to_string()), status);
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.journal().clone()
    }

    /// Every non-GET call received so far, in order.
    pub fn writes(&self) -> Vec<RecordedCall> {
        self.journal()
            .iter()
            .filter(|c| c.is_write())
            .cloned()
            .collect()
    }

    /// Non-GET calls rendered as `"METHOD path"`, handy for exact assertions.
    pub fn write_lines(&self) -> Vec<String> {
        self.writes()
            .iter()
            .map(|c| format!("{} {}", c.method, c.path))
            .collect()
    }

    /// Number of calls made with `method`.
    pub fn count(&self, method: &str) -> usize {
        self.journal().iter().filter(|c| c.method == method).count()
    }

    fn journal(&self) -> std::sync::MutexGuard<'_, Vec<RecordedCall>> {
        match self.calls.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<(), Error> {
        debug!(method = method, path = path, "FakeGitHub received call");
        self.journal().push(RecordedCall {
            method,
            path: path.to_string(),
            payload: payload.cloned(),
        });

        match self.failures.get(&(method, path.to_string())) {
            Some(404) => Err(Error::NotFound {
                path: path.to_string(),
            }),
            Some(status) => Err(Error::Api {
                method,
                path: path.to_string(),
                status: *status,
                message: "Injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn respond(&self, method: &'static str, path: &str) -> Option<Value> {
        self.write_responses
            .get(&(method, path.to_string()))
            .cloned()
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn get(&self, path: &str, fields: &[&str]) -> Result<Value, Error> {
        self.record("GET", path, None)?;
        match self.gets.get(path) {
            Some(value) => project(value.clone(), fields),
            None => Err(Error::NotFound {
                path: path.to_string(),
            }),
        }
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<Option<Value>, Error> {
        self.record("POST", path, Some(payload))?;
        Ok(self.respond("POST", path))
    }

    async fn put(&self, path: &str, payload: &Value) -> Result<Option<Value>, Error> {
        self.record("PUT", path, Some(payload))?;
        Ok(self.respond("PUT", path))
    }

    async fn patch(&self, path: &str, payload: &Value) -> Result<Option<Value>, Error> {
        self.record("PATCH", path, Some(payload))?;
        Ok(self.respond("PATCH", path))
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        self.record("DELETE", path, None)
    }
}
