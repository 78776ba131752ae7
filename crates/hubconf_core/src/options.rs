//! Organization and repository settings.

use crate::config::Options;
use crate::errors::HubConfResult;
use crate::fields::FieldMask;
use crate::paths;
use crate::reconcile::{decode, fetch_object, ApiCall, Plan, Reconciler};
use async_trait::async_trait;
use github_client::GitHubApi;
use serde_json::Value;
use std::sync::Arc;

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;

/// Reads and updates the settings object of an organization or a
/// repository. Settings are compared as a whole, never per field.
pub struct OptionsManager {
    api: Arc<dyn GitHubApi>,
    path: String,
    mask: FieldMask,
}

impl OptionsManager {
    pub fn for_repository(api: Arc<dyn GitHubApi>, owner: &str, repo: &str) -> Self {
        Self {
            api,
            path: paths::repository::<&str>(owner, repo, &[]),
            mask: FieldMask::RepositoryOptions,
        }
    }

    pub fn for_organization(api: Arc<dyn GitHubApi>, org: &str) -> Self {
        Self {
            api,
            path: paths::organization::<&str>(org, &[]),
            mask: FieldMask::OrganizationOptions,
        }
    }
}

/// A single PATCH of the desired settings when they differ.
pub fn plan_options(path: &str, current: &Options, desired: &Options) -> Plan {
    let mut plan = Plan::new();
    if current != desired {
        plan.update(ApiCall::Patch {
            path: path.to_string(),
            payload: Value::Object(desired.clone()),
        });
    }
    plan
}

#[async_trait]
impl Reconciler for OptionsManager {
    type State = Options;
    const RESOURCE: &'static str = "options";

    fn api(&self) -> &dyn GitHubApi {
        self.api.as_ref()
    }

    async fn fetch(&self) -> HubConfResult<Options> {
        let value = fetch_object(self.api.as_ref(), &self.path, self.mask, Self::RESOURCE).await?;
        decode(Self::RESOURCE, value)
    }

    async fn plan(&self, current: &Options, desired: &Options) -> HubConfResult<Plan> {
        Ok(plan_options(&self.path, current, desired))
    }
}
