//! Whole-repository view: settings, collaborators, labels and hooks.

use crate::collaborators::{CollaboratorManager, Collaborators};
use crate::config::{Options, RepositoryConfig};
use crate::errors::HubConfResult;
use crate::hooks::{HookManager, Hooks};
use crate::labels::{LabelManager, Labels};
use crate::options::OptionsManager;
use crate::reconcile::{ApplyReport, Reconciler, UpdateSummary};
use github_client::contents::fetch_file_text;
use github_client::GitHubApi;
use std::sync::Arc;
use tracing::{debug, instrument};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// A GitHub repository.
pub struct Repository {
    api: Arc<dyn GitHubApi>,
    owner: String,
    name: String,
}

impl Repository {
    pub fn new(api: Arc<dyn GitHubApi>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            api,
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub async fn options(&self) -> HubConfResult<Options> {
        self.options_manager().fetch().await
    }

    #[instrument(skip(self, desired), fields(repo = %self.full_name()))]
    pub async fn set_options(&self, desired: &Options) -> HubConfResult<ApplyReport> {
        self.options_manager().apply(desired).await
    }

    pub async fn collaborators(&self) -> HubConfResult<Collaborators> {
        self.collaborator_manager().fetch().await
    }

    #[instrument(skip(self, desired), fields(repo = %self.full_name()))]
    pub async fn set_collaborators(&self, desired: &Collaborators) -> HubConfResult<ApplyReport> {
        self.collaborator_manager().apply(desired).await
    }

    pub async fn labels(&self) -> HubConfResult<Labels> {
        self.label_manager().fetch().await
    }

    #[instrument(skip(self, desired), fields(repo = %self.full_name()))]
    pub async fn set_labels(&self, desired: &Labels) -> HubConfResult<ApplyReport> {
        self.label_manager().apply(desired).await
    }

    pub async fn hooks(&self) -> HubConfResult<Hooks> {
        self.hook_manager().fetch().await
    }

    #[instrument(skip(self, desired), fields(repo = %self.full_name()))]
    pub async fn set_hooks(&self, desired: &Hooks) -> HubConfResult<ApplyReport> {
        self.hook_manager().apply(desired).await
    }

    /// Text of a file stored in the repository's default branch.
    pub async fn config_file(&self, path: &str) -> HubConfResult<String> {
        Ok(fetch_file_text(self.api.as_ref(), &self.owner, &self.name, path).await?)
    }

    /// Reads the full configuration.
    #[instrument(skip(self), fields(repo = %self.full_name()))]
    pub async fn describe(&self) -> HubConfResult<RepositoryConfig> {
        debug!("Describing repository");
        Ok(RepositoryConfig {
            options: Some(self.options().await?),
            collaborators: Some(self.collaborators().await?),
            labels: Some(self.labels().await?),
            hooks: Some(self.hooks().await?),
        })
    }

    /// Applies every section present in `config`, in the order options,
    /// collaborators, labels, hooks. Absent sections are not read or
    /// written.
    #[instrument(skip(self, config), fields(repo = %self.full_name()))]
    pub async fn update(&self, config: &RepositoryConfig) -> HubConfResult<UpdateSummary> {
        let mut summary = UpdateSummary::new();
        if let Some(options) = &config.options {
            summary.insert("options", self.set_options(options).await?);
        }
        if let Some(collaborators) = &config.collaborators {
            summary.insert("collaborators", self.set_collaborators(collaborators).await?);
        }
        if let Some(labels) = &config.labels {
            summary.insert("labels", self.set_labels(labels).await?);
        }
        if let Some(hooks) = &config.hooks {
            summary.insert("hooks", self.set_hooks(hooks).await?);
        }
        Ok(summary)
    }

    fn options_manager(&self) -> OptionsManager {
        OptionsManager::for_repository(self.api.clone(), &self.owner, &self.name)
    }

    fn collaborator_manager(&self) -> CollaboratorManager {
        CollaboratorManager::new(self.api.clone(), &self.owner, &self.name)
    }

    fn label_manager(&self) -> LabelManager {
        LabelManager::new(self.api.clone(), &self.owner, &self.name)
    }

    fn hook_manager(&self) -> HookManager {
        HookManager::for_repository(self.api.clone(), &self.owner, &self.name)
    }
}
