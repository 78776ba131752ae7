//! Issue labels of a repository.

use crate::config::LabelConfig;
use crate::diff::diff;
use crate::errors::HubConfResult;
use crate::fields::FieldMask;
use crate::paths;
use crate::reconcile::{decode, fetch_list, take_string, ApiCall, Plan, Reconciler};
use async_trait::async_trait;
use github_client::GitHubApi;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;

/// Labels of a repository keyed by name.
pub type Labels = BTreeMap<String, LabelConfig>;

pub struct LabelManager {
    api: Arc<dyn GitHubApi>,
    owner: String,
    repo: String,
}

impl LabelManager {
    pub fn new(api: Arc<dyn GitHubApi>, owner: &str, repo: &str) -> Self {
        Self {
            api,
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }
}

pub fn plan_labels(owner: &str, repo: &str, current: &Labels, desired: &Labels) -> Plan {
    let changes = diff(current, desired);
    let mut plan = Plan::new();

    for name in &changes.missing {
        plan.remove(ApiCall::Delete {
            path: paths::repository(owner, repo, &["labels", name.as_str()]),
        });
    }
    for name in &changes.added {
        plan.create(ApiCall::Post {
            path: paths::repository(owner, repo, &["labels"]),
            payload: label_payload(name, &desired[name]),
        });
    }
    for name in &changes.updated {
        plan.update(ApiCall::Patch {
            path: paths::repository(owner, repo, &["labels", name.as_str()]),
            payload: label_payload(name, &desired[name]),
        });
    }
    plan
}

fn label_payload(name: &str, label: &LabelConfig) -> Value {
    json!({ "name": name, "color": label.color })
}

#[async_trait]
impl Reconciler for LabelManager {
    type State = Labels;
    const RESOURCE: &'static str = "labels";

    fn api(&self) -> &dyn GitHubApi {
        self.api.as_ref()
    }

    async fn fetch(&self) -> HubConfResult<Labels> {
        let path = paths::repository(&self.owner, &self.repo, &["labels"]);
        let mut labels = Labels::new();
        let items = fetch_list(self.api.as_ref(), &path, FieldMask::Label, Self::RESOURCE).await?;
        for mut item in items {
            let name = take_string(&mut item, "name", Self::RESOURCE)?;
            labels.insert(name, decode(Self::RESOURCE, item)?);
        }
        Ok(labels)
    }

    async fn plan(&self, current: &Labels, desired: &Labels) -> HubConfResult<Plan> {
        Ok(plan_labels(&self.owner, &self.repo, current, desired))
    }
}
