//! Plans of API calls and the shared fetch, plan and apply loop.
//!
//! A reconciler fetches the current state of one resource, compares it with
//! the desired state and produces a [`Plan`]. Planning validates everything
//! up front, so a refused plan never issues a single write. Executing the
//! plan sends each call in order and stops at the first failure.

use crate::errors::{HubConfError, HubConfResult, ValidationError};
use crate::fields::FieldMask;
use crate::paths;
use async_trait::async_trait;
use github_client::GitHubApi;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;

/// Follow-up PUT issued under a freshly created team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamLink {
    /// Path below `/teams/{id}`.
    pub segments: Vec<String>,
    pub payload: Value,
}

/// One write against the GitHub API.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Post { path: String, payload: Value },
    Put { path: String, payload: Value },
    Patch { path: String, payload: Value },
    Delete { path: String },

    /// POST a team, then PUT every link under the id GitHub assigned to it.
    CreateTeam {
        path: String,
        payload: Value,
        links: Vec<TeamLink>,
    },
}

impl ApiCall {
    pub fn method(&self) -> &'static str {
        match self {
            ApiCall::Post { .. } | ApiCall::CreateTeam { .. } => "POST",
            ApiCall::Put { .. } => "PUT",
            ApiCall::Patch { .. } => "PATCH",
            ApiCall::Delete { .. } => "DELETE",
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ApiCall::Post { path, .. }
            | ApiCall::Put { path, .. }
            | ApiCall::Patch { path, .. }
            | ApiCall::Delete { path }
            | ApiCall::CreateTeam { path, .. } => path,
        }
    }

    /// Sends the call and returns the response body, if any.
    pub async fn send(&self, api: &dyn GitHubApi) -> HubConfResult<Option<Value>> {
        info!(method = self.method(), path = self.path(), "Applying change");
        let response = match self {
            ApiCall::Post { path, payload } => api.post(path, payload).await?,
            ApiCall::Put { path, payload } => api.put(path, payload).await?,
            ApiCall::Patch { path, payload } => api.patch(path, payload).await?,
            ApiCall::Delete { path } => {
                api.delete(path).await?;
                None
            }
            ApiCall::CreateTeam {
                path,
                payload,
                links,
            } => {
                let created = api.post(path, payload).await?;
                let team_id = created
                    .as_ref()
                    .and_then(|body| body.get("id"))
                    .and_then(Value::as_u64)
                    .ok_or_else(|| ValidationError::MalformedPayload {
                        resource: "teams",
                        reason: format!("creating team at {} returned no id", path),
                    })?;

                for link in links {
                    let link_path = paths::team(team_id, link.segments.as_slice());
                    info!(method = "PUT", path = link_path.as_str(), "Applying change");
                    api.put(&link_path, &link.payload).await?;
                }
                created
            }
        };
        Ok(response)
    }
}

impl fmt::Display for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// Count of logical changes applied to one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

impl ApplyReport {
    pub fn is_empty(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.removed == 0
    }

    pub fn merge(&mut self, other: ApplyReport) {
        self.created += other.created;
        self.updated += other.updated;
        self.removed += other.removed;
    }
}

impl fmt::Display for ApplyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} removed",
            self.created, self.updated, self.removed
        )
    }
}

/// Ordered calls to send, with the changes they amount to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    calls: Vec<ApiCall>,
    report: ApplyReport,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[ApiCall] {
        &self.calls
    }

    pub fn report(&self) -> ApplyReport {
        self.report
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Adds a call deleting a resource.
    pub fn remove(&mut self, call: ApiCall) {
        self.report.removed += 1;
        self.calls.push(call);
    }

    /// Adds a call creating a resource.
    pub fn create(&mut self, call: ApiCall) {
        self.report.created += 1;
        self.calls.push(call);
    }

    /// Adds a call updating a resource.
    pub fn update(&mut self, call: ApiCall) {
        self.report.updated += 1;
        self.calls.push(call);
    }

    /// Adds a call that is part of a change already counted.
    pub fn push(&mut self, call: ApiCall) {
        self.calls.push(call);
    }

    /// Appends `other`, keeping its order after the calls already planned.
    pub fn extend(&mut self, other: Plan) {
        self.report.merge(other.report);
        self.calls.extend(other.calls);
    }

    /// Sends every call in order. The first failure aborts the rest of the
    /// plan; calls already sent are not rolled back.
    pub async fn execute(self, api: &dyn GitHubApi) -> HubConfResult<ApplyReport> {
        for call in &self.calls {
            call.send(api).await?;
        }
        Ok(self.report)
    }
}

/// Synchronizes one kind of resource.
#[async_trait]
pub trait Reconciler: Send + Sync {
    /// Comparable view of the resource, as fetched and as desired.
    type State: PartialEq + fmt::Debug + Send + Sync;

    /// Name used in logs and errors.
    const RESOURCE: &'static str;

    fn api(&self) -> &dyn GitHubApi;

    /// Reads the current state from GitHub.
    async fn fetch(&self) -> HubConfResult<Self::State>;

    /// Computes the calls turning `current` into `desired`.
    async fn plan(&self, current: &Self::State, desired: &Self::State) -> HubConfResult<Plan>;

    /// Fetches, plans and executes. Issues no call at all when the current
    /// state already matches.
    async fn apply(&self, desired: &Self::State) -> HubConfResult<ApplyReport> {
        let current = self.fetch().await?;
        if current == *desired {
            debug!(resource = Self::RESOURCE, "Already up to date");
            return Ok(ApplyReport::default());
        }

        let plan = self.plan(&current, desired).await?;
        let report = plan.execute(self.api()).await?;
        info!(resource = Self::RESOURCE, %report, "Resource synchronized");
        Ok(report)
    }
}

/// GETs a list endpoint and returns its masked items.
pub(crate) async fn fetch_list(
    api: &dyn GitHubApi,
    path: &str,
    mask: FieldMask,
    resource: &'static str,
) -> HubConfResult<Vec<Value>> {
    debug!(path = path, "Fetching {}", resource);
    match api.get(path, mask.fields()).await? {
        Value::Array(items) => Ok(items),
        other => Err(malformed(resource, format!("expected a list, got {}", other)).into()),
    }
}

/// GETs a single object and returns it masked.
pub(crate) async fn fetch_object(
    api: &dyn GitHubApi,
    path: &str,
    mask: FieldMask,
    resource: &'static str,
) -> HubConfResult<Value> {
    debug!(path = path, "Fetching {}", resource);
    match api.get(path, mask.fields()).await? {
        value @ Value::Object(_) => Ok(value),
        other => Err(malformed(resource, format!("expected an object, got {}", other)).into()),
    }
}

/// Removes the string field `field` from `item`, returning it.
pub(crate) fn take_string(
    item: &mut Value,
    field: &str,
    resource: &'static str,
) -> HubConfResult<String> {
    match item.as_object_mut().and_then(|o| o.remove(field)) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(malformed(resource, format!("missing string field '{}'", field)).into()),
    }
}

/// Converts a masked payload into a typed view.
pub(crate) fn decode<T: DeserializeOwned>(resource: &'static str, value: Value) -> HubConfResult<T> {
    serde_json::from_value(value).map_err(|e| malformed(resource, e.to_string()).into())
}

/// Converts a typed view into a payload.
pub(crate) fn encode<T: Serialize>(value: &T) -> HubConfResult<Value> {
    serde_json::to_value(value).map_err(|e| HubConfError::Serialization(e.to_string()))
}

fn malformed(resource: &'static str, reason: String) -> ValidationError {
    ValidationError::MalformedPayload { resource, reason }
}

/// Report of each section applied by a façade update, keyed by section.
pub type UpdateSummary = BTreeMap<&'static str, ApplyReport>;
