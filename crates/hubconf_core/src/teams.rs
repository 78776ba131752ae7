//! Organization teams, with their members and repositories.
//!
//! Teams are matched by name. A team's id is assigned by GitHub when the
//! team is created; every later call addresses the team by that id.

use crate::collaborators::decode_access;
use crate::config::{AccessConfig, MemberConfig, TeamConfig};
use crate::diff::diff;
use crate::errors::{HubConfResult, ValidationError};
use crate::fields::FieldMask;
use crate::paths;
use crate::reconcile::{
    decode, fetch_list, fetch_object, take_string, ApiCall, Plan, Reconciler, TeamLink,
};
use async_trait::async_trait;
use github_client::GitHubApi;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(test)]
#[path = "teams_tests.rs"]
mod tests;

/// Teams of an organization keyed by name.
pub type Teams = BTreeMap<String, TeamConfig>;

pub struct TeamManager {
    api: Arc<dyn GitHubApi>,
    org: String,
}

impl TeamManager {
    pub fn new(api: Arc<dyn GitHubApi>, org: &str) -> Self {
        Self {
            api,
            org: org.to_string(),
        }
    }

    async fn fetch_members(&self, team_id: u64) -> HubConfResult<BTreeMap<String, MemberConfig>> {
        let api = self.api.as_ref();
        let path = paths::team(team_id, &["members"]);
        let mut members = BTreeMap::new();

        for mut item in fetch_list(api, &path, FieldMask::TeamMember, Self::RESOURCE).await? {
            let login = take_string(&mut item, "login", Self::RESOURCE)?;
            let membership_path = paths::team(team_id, &["memberships", login.as_str()]);
            let membership =
                fetch_object(api, &membership_path, FieldMask::TeamMembership, Self::RESOURCE)
                    .await?;
            members.insert(login, decode(Self::RESOURCE, membership)?);
        }
        Ok(members)
    }

    async fn fetch_repositories(
        &self,
        team_id: u64,
    ) -> HubConfResult<BTreeMap<String, AccessConfig>> {
        let path = paths::team(team_id, &["repos"]);
        fetch_list(self.api.as_ref(), &path, FieldMask::TeamRepository, Self::RESOURCE)
            .await?
            .into_iter()
            .map(|item| decode_access(item, "name", Self::RESOURCE))
            .collect()
    }
}

fn repository_segments(org: &str, repo: &str) -> Vec<String> {
    vec!["repos".to_string(), org.to_string(), repo.to_string()]
}

fn membership_segments(login: &str) -> Vec<String> {
    vec!["memberships".to_string(), login.to_string()]
}

fn access_payload(access: &AccessConfig) -> Value {
    json!({ "permission": access.permission })
}

fn role_payload(member: &MemberConfig) -> Value {
    json!({ "role": member.role })
}

/// Plans team deletions, creations and updates, in that order.
///
/// An updated team gets a PATCH only when its own settings changed. Its
/// repositories and members are diffed on their own: repository access is
/// changed by removing and adding the repository again, member roles by a
/// PUT of the membership.
///
/// # Errors
///
/// Returns [`ValidationError::TeamIdMismatch`] when the desired configuration
/// names a different id than the team has. Nothing is planned in that case.
pub fn plan_teams(org: &str, current: &Teams, desired: &Teams) -> HubConfResult<Plan> {
    let changes = diff(current, desired);

    let mut team_ids = BTreeMap::new();
    for name in changes.missing.iter().chain(&changes.updated) {
        let existing = &current[name];
        let current_id = existing.id.ok_or_else(|| ValidationError::MalformedPayload {
            resource: "teams",
            reason: format!("team '{}' has no id", name),
        })?;
        if let Some(desired_id) = desired.get(name).and_then(|t| t.id) {
            if desired_id != current_id {
                return Err(ValidationError::TeamIdMismatch {
                    team: name.clone(),
                    current: current_id,
                    desired: Some(desired_id),
                }
                .into());
            }
        }
        team_ids.insert(name.as_str(), current_id);
    }

    let mut plan = Plan::new();

    for name in &changes.missing {
        plan.remove(ApiCall::Delete {
            path: paths::team::<&str>(team_ids[name.as_str()], &[]),
        });
    }

    for name in &changes.added {
        let team = &desired[name];
        let repositories = team.repositories.iter().map(|(repo, access)| TeamLink {
            segments: repository_segments(org, repo),
            payload: access_payload(access),
        });
        let members = team.members.iter().map(|(login, member)| TeamLink {
            segments: membership_segments(login),
            payload: role_payload(member),
        });
        plan.create(ApiCall::CreateTeam {
            path: paths::organization(org, &["teams"]),
            payload: team.metadata_payload(name),
            links: repositories.chain(members).collect(),
        });
    }

    for name in &changes.updated {
        let team_id = team_ids[name.as_str()];
        let old = &current[name];
        let new = &desired[name];

        if !old.same_metadata(new) {
            plan.update(ApiCall::Patch {
                path: paths::team::<&str>(team_id, &[]),
                payload: new.metadata_payload(name),
            });
        }
        plan.extend(plan_team_repositories(org, team_id, old, new));
        plan.extend(plan_team_members(team_id, old, new));
    }

    Ok(plan)
}

fn plan_team_repositories(org: &str, team_id: u64, old: &TeamConfig, new: &TeamConfig) -> Plan {
    let changes = diff(&old.repositories, &new.repositories);
    let mut plan = Plan::new();

    for repo in changes.missing.union(&changes.updated) {
        let call = ApiCall::Delete {
            path: paths::team(team_id, repository_segments(org, repo).as_slice()),
        };
        if changes.missing.contains(repo) {
            plan.remove(call);
        } else {
            plan.push(call);
        }
    }
    for repo in changes.added.union(&changes.updated) {
        let call = ApiCall::Put {
            path: paths::team(team_id, repository_segments(org, repo).as_slice()),
            payload: access_payload(&new.repositories[repo]),
        };
        if changes.added.contains(repo) {
            plan.create(call);
        } else {
            plan.update(call);
        }
    }
    plan
}

fn plan_team_members(team_id: u64, old: &TeamConfig, new: &TeamConfig) -> Plan {
    let changes = diff(&old.members, &new.members);
    let mut plan = Plan::new();

    for login in &changes.missing {
        plan.remove(ApiCall::Delete {
            path: paths::team(team_id, membership_segments(login).as_slice()),
        });
    }
    for login in &changes.added {
        plan.create(ApiCall::Put {
            path: paths::team(team_id, membership_segments(login).as_slice()),
            payload: role_payload(&new.members[login]),
        });
    }
    for login in &changes.updated {
        plan.update(ApiCall::Put {
            path: paths::team(team_id, membership_segments(login).as_slice()),
            payload: role_payload(&new.members[login]),
        });
    }
    plan
}

#[async_trait]
impl Reconciler for TeamManager {
    type State = Teams;
    const RESOURCE: &'static str = "teams";

    fn api(&self) -> &dyn GitHubApi {
        self.api.as_ref()
    }

    async fn fetch(&self) -> HubConfResult<Teams> {
        let path = paths::organization(&self.org, &["teams"]);
        let items = fetch_list(self.api.as_ref(), &path, FieldMask::Team, Self::RESOURCE).await?;
        let mut teams = Teams::new();

        for mut item in items {
            let name = take_string(&mut item, "name", Self::RESOURCE)?;
            let mut team: TeamConfig = decode(Self::RESOURCE, item)?;
            let team_id = team.id.ok_or_else(|| ValidationError::MalformedPayload {
                resource: Self::RESOURCE,
                reason: format!("team '{}' has no id", name),
            })?;
            team.members = self.fetch_members(team_id).await?;
            team.repositories = self.fetch_repositories(team_id).await?;
            teams.insert(name, team);
        }
        Ok(teams)
    }

    async fn plan(&self, current: &Teams, desired: &Teams) -> HubConfResult<Plan> {
        plan_teams(&self.org, current, desired)
    }
}
