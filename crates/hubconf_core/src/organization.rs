//! Whole-organization view: settings, members, teams and hooks.

use crate::config::{Options, OrganizationConfig};
use crate::errors::HubConfResult;
use crate::fields::FieldMask;
use crate::hooks::{HookManager, Hooks};
use crate::members::{MemberManager, Members};
use crate::options::OptionsManager;
use crate::paths;
use crate::reconcile::{fetch_list, take_string, ApplyReport, Reconciler, UpdateSummary};
use crate::teams::{TeamManager, Teams};
use github_client::GitHubApi;
use std::sync::Arc;
use tracing::{debug, instrument};

#[cfg(test)]
#[path = "organization_tests.rs"]
mod tests;

/// A GitHub organization.
///
/// Every accessor reads live from GitHub; nothing is cached between calls.
pub struct Organization {
    api: Arc<dyn GitHubApi>,
    name: String,
}

impl Organization {
    pub fn new(api: Arc<dyn GitHubApi>, name: impl Into<String>) -> Self {
        Self {
            api,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn options(&self) -> HubConfResult<Options> {
        OptionsManager::for_organization(self.api.clone(), &self.name)
            .fetch()
            .await
    }

    #[instrument(skip(self, desired), fields(org = %self.name))]
    pub async fn set_options(&self, desired: &Options) -> HubConfResult<ApplyReport> {
        OptionsManager::for_organization(self.api.clone(), &self.name)
            .apply(desired)
            .await
    }

    pub async fn members(&self) -> HubConfResult<Members> {
        MemberManager::new(self.api.clone(), &self.name).fetch().await
    }

    #[instrument(skip(self, desired), fields(org = %self.name))]
    pub async fn set_members(&self, desired: &Members) -> HubConfResult<ApplyReport> {
        MemberManager::new(self.api.clone(), &self.name)
            .apply(desired)
            .await
    }

    pub async fn teams(&self) -> HubConfResult<Teams> {
        TeamManager::new(self.api.clone(), &self.name).fetch().await
    }

    #[instrument(skip(self, desired), fields(org = %self.name))]
    pub async fn set_teams(&self, desired: &Teams) -> HubConfResult<ApplyReport> {
        TeamManager::new(self.api.clone(), &self.name)
            .apply(desired)
            .await
    }

    pub async fn hooks(&self) -> HubConfResult<Hooks> {
        HookManager::for_organization(self.api.clone(), &self.name)
            .fetch()
            .await
    }

    #[instrument(skip(self, desired), fields(org = %self.name))]
    pub async fn set_hooks(&self, desired: &Hooks) -> HubConfResult<ApplyReport> {
        HookManager::for_organization(self.api.clone(), &self.name)
            .apply(desired)
            .await
    }

    /// Names of every repository owned by the organization.
    pub async fn repositories(&self) -> HubConfResult<Vec<String>> {
        let path = paths::organization(&self.name, &["repos"]);
        let items = fetch_list(
            self.api.as_ref(),
            &path,
            FieldMask::OrganizationRepository,
            "repositories",
        )
        .await?;

        items
            .into_iter()
            .map(|mut item| take_string(&mut item, "name", "repositories"))
            .collect()
    }

    /// Reads the full configuration.
    #[instrument(skip(self), fields(org = %self.name))]
    pub async fn describe(&self) -> HubConfResult<OrganizationConfig> {
        debug!("Describing organization");
        Ok(OrganizationConfig {
            options: Some(self.options().await?),
            members: Some(self.members().await?),
            teams: Some(self.teams().await?),
            hooks: Some(self.hooks().await?),
        })
    }

    /// Applies every section present in `config`, in the order options,
    /// members, teams, hooks. Absent sections are not read or written.
    #[instrument(skip(self, config), fields(org = %self.name))]
    pub async fn update(&self, config: &OrganizationConfig) -> HubConfResult<UpdateSummary> {
        let mut summary = UpdateSummary::new();
        if let Some(options) = &config.options {
            summary.insert("options", self.set_options(options).await?);
        }
        if let Some(members) = &config.members {
            summary.insert("members", self.set_members(members).await?);
        }
        if let Some(teams) = &config.teams {
            summary.insert("teams", self.set_teams(teams).await?);
        }
        if let Some(hooks) = &config.hooks {
            summary.insert("hooks", self.set_hooks(hooks).await?);
        }
        Ok(summary)
    }
}
