//! Organization membership.

use crate::config::MemberConfig;
use crate::diff::diff;
use crate::errors::HubConfResult;
use crate::fields::FieldMask;
use crate::paths;
use crate::reconcile::{decode, fetch_list, fetch_object, take_string, ApiCall, Plan, Reconciler};
use async_trait::async_trait;
use github_client::GitHubApi;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(test)]
#[path = "members_tests.rs"]
mod tests;

/// Members of an organization with their role.
pub type Members = BTreeMap<String, MemberConfig>;

pub struct MemberManager {
    api: Arc<dyn GitHubApi>,
    org: String,
}

impl MemberManager {
    pub fn new(api: Arc<dyn GitHubApi>, org: &str) -> Self {
        Self {
            api,
            org: org.to_string(),
        }
    }
}

/// Removed members are deleted, new and changed ones get their membership
/// PUT.
pub fn plan_members(org: &str, current: &Members, desired: &Members) -> Plan {
    let changes = diff(current, desired);
    let mut plan = Plan::new();

    for login in &changes.missing {
        plan.remove(ApiCall::Delete {
            path: paths::organization(org, &["members", login.as_str()]),
        });
    }
    for login in &changes.added {
        plan.create(membership_call(org, login, &desired[login]));
    }
    for login in &changes.updated {
        plan.update(membership_call(org, login, &desired[login]));
    }
    plan
}

fn membership_call(org: &str, login: &str, member: &MemberConfig) -> ApiCall {
    ApiCall::Put {
        path: paths::organization(org, &["memberships", login]),
        payload: json!({ "role": member.role }),
    }
}

#[async_trait]
impl Reconciler for MemberManager {
    type State = Members;
    const RESOURCE: &'static str = "members";

    fn api(&self) -> &dyn GitHubApi {
        self.api.as_ref()
    }

    async fn fetch(&self) -> HubConfResult<Members> {
        let api = self.api.as_ref();
        let path = paths::organization(&self.org, &["members"]);
        let mut members = Members::new();

        for mut item in fetch_list(api, &path, FieldMask::Member, Self::RESOURCE).await? {
            let login = take_string(&mut item, "login", Self::RESOURCE)?;
            let membership_path = paths::organization(&self.org, &["memberships", login.as_str()]);
            let membership =
                fetch_object(api, &membership_path, FieldMask::Membership, Self::RESOURCE).await?;
            members.insert(login, decode(Self::RESOURCE, membership)?);
        }
        Ok(members)
    }

    async fn plan(&self, current: &Members, desired: &Members) -> HubConfResult<Plan> {
        Ok(plan_members(&self.org, current, desired))
    }
}
