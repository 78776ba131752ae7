//! Repository and organization webhooks.
//!
//! The masked view of a hook has no id, so deletions and updates look the id
//! up with a second, minimal request. Hooks whose configuration carries a
//! secret are never rewritten: GitHub only returns masked secrets, so the
//! change cannot be verified.

use crate::config::HookConfig;
use crate::diff::{diff, SetDiff};
use crate::errors::{HubConfError, HubConfResult, ValidationError};
use crate::fields::FieldMask;
use crate::paths;
use crate::reconcile::{decode, encode, fetch_list, ApiCall, Plan, Reconciler};
use async_trait::async_trait;
use github_client::GitHubApi;
use serde::Deserialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;

/// Hooks keyed by their identity within the scope.
pub type Hooks = BTreeMap<String, HookConfig>;

/// Hooks id by hook identity.
pub type HookIds = BTreeMap<String, u64>;

/// Owner of a set of hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookScope {
    /// Keyed by [`HookConfig::derived_name`].
    Repository { owner: String, repo: String },

    /// Keyed by hook name. Hooks cannot be created at this level.
    Organization { org: String },
}

impl HookScope {
    fn path(&self, rest: &[&str]) -> String {
        let mut segments = vec!["hooks"];
        segments.extend_from_slice(rest);
        match self {
            HookScope::Repository { owner, repo } => {
                paths::repository(owner, repo, segments.as_slice())
            }
            HookScope::Organization { org } => paths::organization(org, segments.as_slice()),
        }
    }

    fn mask(&self) -> FieldMask {
        match self {
            HookScope::Repository { .. } => FieldMask::RepositoryHook,
            HookScope::Organization { .. } => FieldMask::OrganizationHook,
        }
    }

    fn id_mask(&self) -> FieldMask {
        match self {
            HookScope::Repository { .. } => FieldMask::RepositoryHookId,
            HookScope::Organization { .. } => FieldMask::OrganizationHookId,
        }
    }

    fn key_of(&self, hook: &HookConfig) -> String {
        match self {
            HookScope::Repository { .. } => hook.derived_name(),
            HookScope::Organization { .. } => hook.name.clone(),
        }
    }
}

pub struct HookManager {
    api: Arc<dyn GitHubApi>,
    scope: HookScope,
}

impl HookManager {
    pub fn for_repository(api: Arc<dyn GitHubApi>, owner: &str, repo: &str) -> Self {
        Self {
            api,
            scope: HookScope::Repository {
                owner: owner.to_string(),
                repo: repo.to_string(),
            },
        }
    }

    pub fn for_organization(api: Arc<dyn GitHubApi>, org: &str) -> Self {
        Self {
            api,
            scope: HookScope::Organization {
                org: org.to_string(),
            },
        }
    }

    /// Looks up the id of every current hook.
    pub async fn hook_ids(&self) -> HubConfResult<HookIds> {
        #[derive(Deserialize)]
        struct Identified {
            id: u64,
            #[serde(flatten)]
            hook: HookConfig,
        }

        let path = self.scope.path(&[]);
        let items =
            fetch_list(self.api.as_ref(), &path, self.scope.id_mask(), Self::RESOURCE).await?;
        let mut ids = HookIds::new();
        for item in items {
            let identified: Identified = decode(Self::RESOURCE, item)?;
            insert_unique(&mut ids, self.scope.key_of(&identified.hook), identified.id)?;
        }
        Ok(ids)
    }
}

/// Two live hooks with the same identity cannot be told apart, so neither
/// can be reconciled.
fn insert_unique<V>(map: &mut BTreeMap<String, V>, key: String, value: V) -> HubConfResult<()> {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Occupied(slot) => {
            warn!(hook = %slot.key(), "Duplicate hook");
            Err(ValidationError::MalformedPayload {
                resource: HookManager::RESOURCE,
                reason: format!("more than one hook is identified by '{}'", slot.key()),
            }
            .into())
        }
    }
}

/// Diffs two sets of hooks and rejects changes that cannot be applied.
///
/// # Errors
///
/// - [`ValidationError::HookKeyMismatch`] when a desired repository hook is
///   not keyed by its derived name.
/// - [`HubConfError::Unsupported`] when an organization hook would be added,
///   or when a hook whose new configuration holds a secret would change its
///   configuration.
pub fn check_hooks(
    scope: &HookScope,
    current: &Hooks,
    desired: &Hooks,
) -> HubConfResult<SetDiff<String>> {
    if let HookScope::Repository { .. } = scope {
        for (key, hook) in desired {
            let derived = hook.derived_name();
            if *key != derived {
                return Err(ValidationError::HookKeyMismatch {
                    key: key.clone(),
                    derived,
                }
                .into());
            }
        }
    }

    let changes = diff(current, desired);

    if let HookScope::Organization { .. } = scope {
        if !changes.added.is_empty() {
            let added: Vec<&str> = changes.added.iter().map(String::as_str).collect();
            return Err(HubConfError::Unsupported(format!(
                "adding hooks not supported: {}",
                added.join(", ")
            )));
        }
    }

    for key in &changes.updated {
        let new = &desired[key];
        if current[key].config != new.config && new.has_secret() {
            warn!(hook = key.as_str(), "Refusing to update a hook holding secrets");
            return Err(HubConfError::Unsupported(format!(
                "updating hooks with secrets is not supported: {}",
                key
            )));
        }
    }

    Ok(changes)
}

/// Builds the calls for a checked diff. Deletions and updates address
/// hooks by the ids in `ids`.
pub fn plan_hooks(
    scope: &HookScope,
    changes: &SetDiff<String>,
    desired: &Hooks,
    ids: &HookIds,
) -> HubConfResult<Plan> {
    let id_of = |key: &String| -> HubConfResult<String> {
        ids.get(key).map(u64::to_string).ok_or_else(|| {
            ValidationError::MalformedPayload {
                resource: "hooks",
                reason: format!("no id found for hook '{}'", key),
            }
            .into()
        })
    };

    let mut plan = Plan::new();
    for key in &changes.missing {
        plan.remove(ApiCall::Delete {
            path: scope.path(&[id_of(key)?.as_str()]),
        });
    }
    for key in &changes.added {
        plan.create(ApiCall::Post {
            path: scope.path(&[]),
            payload: encode(&desired[key])?,
        });
    }
    for key in &changes.updated {
        plan.update(ApiCall::Patch {
            path: scope.path(&[id_of(key)?.as_str()]),
            payload: encode(&desired[key])?,
        });
    }
    Ok(plan)
}

#[async_trait]
impl Reconciler for HookManager {
    type State = Hooks;
    const RESOURCE: &'static str = "hooks";

    fn api(&self) -> &dyn GitHubApi {
        self.api.as_ref()
    }

    async fn fetch(&self) -> HubConfResult<Hooks> {
        let path = self.scope.path(&[]);
        let items =
            fetch_list(self.api.as_ref(), &path, self.scope.mask(), Self::RESOURCE).await?;
        let mut hooks = Hooks::new();
        for item in items {
            let hook: HookConfig = decode(Self::RESOURCE, item)?;
            insert_unique(&mut hooks, self.scope.key_of(&hook), hook)?;
        }
        Ok(hooks)
    }

    async fn plan(&self, current: &Hooks, desired: &Hooks) -> HubConfResult<Plan> {
        let changes = check_hooks(&self.scope, current, desired)?;
        let ids = if changes.missing.is_empty() && changes.updated.is_empty() {
            HookIds::new()
        } else {
            self.hook_ids().await?
        };
        plan_hooks(&self.scope, &changes, desired, &ids)
    }
}
