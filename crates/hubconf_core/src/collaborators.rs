//! Repository collaborators.
//!
//! GitHub has no verb to change a collaborator's permission in place, so an
//! update removes the collaborator and invites them again.

use crate::config::AccessConfig;
use crate::diff::diff;
use crate::errors::HubConfResult;
use crate::fields::FieldMask;
use crate::paths;
use crate::permission::{decode_permission, PermissionFlags};
use crate::reconcile::{decode, fetch_list, take_string, ApiCall, Plan, Reconciler};
use async_trait::async_trait;
use github_client::GitHubApi;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(test)]
#[path = "collaborators_tests.rs"]
mod tests;

/// Collaborators of a repository with their access level.
pub type Collaborators = BTreeMap<String, AccessConfig>;

pub struct CollaboratorManager {
    api: Arc<dyn GitHubApi>,
    owner: String,
    repo: String,
}

impl CollaboratorManager {
    pub fn new(api: Arc<dyn GitHubApi>, owner: &str, repo: &str) -> Self {
        Self {
            api,
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }
}

/// Deletes removed and changed collaborators, then PUTs new and changed
/// ones.
pub fn plan_collaborators(
    owner: &str,
    repo: &str,
    current: &Collaborators,
    desired: &Collaborators,
) -> Plan {
    let changes = diff(current, desired);
    let mut plan = Plan::new();
    let path = |login: &str| paths::repository(owner, repo, &["collaborators", login]);

    for login in changes.missing.union(&changes.updated) {
        let call = ApiCall::Delete {
            path: path(login.as_str()),
        };
        if changes.missing.contains(login) {
            plan.remove(call);
        } else {
            plan.push(call);
        }
    }

    for login in changes.added.union(&changes.updated) {
        let call = ApiCall::Put {
            path: path(login.as_str()),
            payload: json!({ "permission": desired[login].permission }),
        };
        if changes.added.contains(login) {
            plan.create(call);
        } else {
            plan.update(call);
        }
    }
    plan
}

/// Converts a masked `{login, permissions}` item to its login and access.
pub(crate) fn decode_access(
    mut item: Value,
    key_field: &str,
    resource: &'static str,
) -> HubConfResult<(String, AccessConfig)> {
    let key = take_string(&mut item, key_field, resource)?;
    let flags: PermissionFlags = decode(
        resource,
        item.get("permissions").cloned().unwrap_or(Value::Null),
    )?;
    Ok((key, AccessConfig::new(decode_permission(&flags)?)))
}

#[async_trait]
impl Reconciler for CollaboratorManager {
    type State = Collaborators;
    const RESOURCE: &'static str = "collaborators";

    fn api(&self) -> &dyn GitHubApi {
        self.api.as_ref()
    }

    async fn fetch(&self) -> HubConfResult<Collaborators> {
        let path = paths::repository(&self.owner, &self.repo, &["collaborators"]);
        fetch_list(self.api.as_ref(), &path, FieldMask::Collaborator, Self::RESOURCE)
            .await?
            .into_iter()
            .map(|item| decode_access(item, "login", Self::RESOURCE))
            .collect()
    }

    async fn plan(
        &self,
        current: &Collaborators,
        desired: &Collaborators,
    ) -> HubConfResult<Plan> {
        Ok(plan_collaborators(&self.owner, &self.repo, current, desired))
    }
}
