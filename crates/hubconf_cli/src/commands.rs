//! Command modules for the HubConf CLI.
//!
//! - `repo_cmd`: pull and push the configuration of one repository
//! - `org_cmd`: pull and push the configuration of an organization, and apply
//!   a repository template to all its repositories

use std::sync::Arc;

use colored::Colorize;
use github_client::GitHubApi;
use hubconf_core::UpdateSummary;

use crate::errors::Error;
use crate::workspace::WorkspaceRepo;

pub mod org_cmd;
pub mod repo_cmd;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

pub use hubconf_core::config::REPO_CONFIG_FILE;

/// Default file for an organization configuration.
pub const ORG_CONFIG_FILE: &str = ".hubconf.org.yml";

/// Default file for the template applied to every repository of an
/// organization.
pub const ORG_REPOS_CONFIG_FILE: &str = ".hubconf.org.repos.yml";

/// What every command needs to run.
#[derive(Clone)]
pub struct Context {
    pub api: Arc<dyn GitHubApi>,

    /// Repository checked out in the current directory, if any.
    pub workspace: Option<WorkspaceRepo>,
}

impl Context {
    pub fn new(api: Arc<dyn GitHubApi>, workspace: Option<WorkspaceRepo>) -> Self {
        Self { api, workspace }
    }

    /// Owner given on the command line, or the workspace owner.
    pub fn owner(&self, explicit: Option<&str>, flag: &str) -> Result<String, Error> {
        explicit
            .map(str::to_string)
            .or_else(|| self.workspace.as_ref().map(|w| w.owner.clone()))
            .ok_or_else(|| {
                Error::InvalidArguments(format!(
                    "{} is required outside of a GitHub checkout",
                    flag
                ))
            })
    }

    /// Repository given on the command line, or the workspace repository.
    pub fn repository(&self, explicit: Option<&str>) -> Result<String, Error> {
        explicit
            .map(str::to_string)
            .or_else(|| self.workspace.as_ref().map(|w| w.repo.clone()))
            .ok_or_else(|| {
                Error::InvalidArguments(
                    "--repository is required outside of a GitHub checkout".to_string(),
                )
            })
    }
}

/// Renders what an update did, one line per touched section.
pub fn summary_lines(summary: &UpdateSummary) -> Vec<String> {
    summary
        .iter()
        .filter(|(_, report)| !report.is_empty())
        .map(|(section, report)| format!("{}: {}", section, report))
        .collect()
}

fn print_summary(target: &str, summary: &UpdateSummary) {
    let lines = summary_lines(summary);
    if lines.is_empty() {
        println!("{} {}", target.bold(), "already up to date".dimmed());
        return;
    }

    println!("{} {}", target.bold(), "updated".green());
    for line in lines {
        println!("  {}", line);
    }
}
