//! Organization configuration commands.
//!
//! # Examples
//!
//! ```bash
//! hubconf org --name acme pull
//! hubconf org --name acme push --input-file acme.yml
//!
//! # Apply the same labels and collaborators to every repository
//! hubconf org --name acme repos --input-file .hubconf.org.repos.yml
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use hubconf_core::{
    changes::confirm_config_changes, ChangeSink, HubConfError, Options, Organization,
    OrganizationConfig, Repository, RepositoryConfig, UpdateSummary,
};
use tracing::{info, instrument, warn};

use super::{print_summary, Context, ORG_CONFIG_FILE, ORG_REPOS_CONFIG_FILE};
use crate::errors::Error;
use crate::store;

#[cfg(test)]
#[path = "org_cmd_tests.rs"]
mod tests;

/// Repository options that only make sense for a single repository. They are
/// never applied from an organization-wide template.
pub const REPO_SPECIFIC_OPTIONS: [&str; 3] = ["name", "description", "homepage"];

#[derive(Args, Debug, Clone)]
pub struct OrgArgs {
    /// Organization login. Defaults to the owner of the `origin` remote of
    /// the current checkout.
    #[arg(long)]
    pub name: Option<String>,

    #[command(subcommand)]
    pub command: OrgCommands,
}

/// Organization subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum OrgCommands {
    /// Write the current organization configuration to a file.
    Pull {
        #[arg(long, default_value = ORG_CONFIG_FILE)]
        output_file: PathBuf,
    },

    /// Make the organization match a configuration file.
    Push {
        #[arg(long, default_value = ORG_CONFIG_FILE)]
        input_file: PathBuf,
    },

    /// Apply a repository configuration to every repository of the
    /// organization.
    Repos {
        #[arg(long, default_value = ORG_REPOS_CONFIG_FILE)]
        input_file: PathBuf,
    },
}

/// Runs an organization subcommand.
pub async fn execute(
    args: &OrgArgs,
    ctx: &Context,
    sink: &mut dyn ChangeSink,
) -> Result<(), Error> {
    let name = ctx.owner(args.name.as_deref(), "--name")?;
    let org = Organization::new(ctx.api.clone(), name);

    match &args.command {
        OrgCommands::Pull { output_file } => pull(&org, output_file).await,
        OrgCommands::Push { input_file } => {
            if let Some(summary) = push(&org, input_file, sink).await? {
                print_summary(org.name(), &summary);
            }
            Ok(())
        }
        OrgCommands::Repos { input_file } => {
            let updated = apply_to_repositories(ctx, &org, input_file, sink).await?;
            for (repo, summary) in &updated {
                print_summary(repo, summary);
            }
            Ok(())
        }
    }
}

/// Writes the current configuration of `org` to `output`.
#[instrument(skip(org), fields(org = %org.name()))]
pub async fn pull(org: &Organization, output: &Path) -> Result<(), Error> {
    let config = org.describe().await?;
    store::save(output, &config)?;
    println!("{} updated", output.display());
    Ok(())
}

/// Applies `input` to `org` once the user approved the changes. Returns
/// `None` when there was nothing to change.
#[instrument(skip(org, sink), fields(org = %org.name()))]
pub async fn push(
    org: &Organization,
    input: &Path,
    sink: &mut dyn ChangeSink,
) -> Result<Option<UpdateSummary>, Error> {
    let desired: OrganizationConfig = store::load(input)?;
    let mut current = org.describe().await?;
    current.hide_unrequested_team_ids(&desired);

    if !confirm_config_changes(&current, &desired, true, sink)? {
        info!("Organization already matches {}", input.display());
        return Ok(None);
    }

    Ok(Some(org.update(&desired).await?))
}

/// Applies the repository template in `input` to every repository of `org`.
///
/// Repository specific options are dropped from the template, after asking
/// the user when the template sets any. The template's options only speak
/// for the keys they name: a repository whose values already match gets no
/// options write. Each repository is confirmed on its own; declining one
/// moves on to the next. Returns the repositories that were updated.
#[instrument(skip(ctx, org, sink), fields(org = %org.name()))]
pub async fn apply_to_repositories(
    ctx: &Context,
    org: &Organization,
    input: &Path,
    sink: &mut dyn ChangeSink,
) -> Result<Vec<(String, UpdateSummary)>, Error> {
    let mut template: RepositoryConfig = store::load(input)?;

    if let Some(options) = template.options.as_mut() {
        let present: Vec<&str> = REPO_SPECIFIC_OPTIONS
            .iter()
            .copied()
            .filter(|key| options.contains_key(*key))
            .collect();

        if !present.is_empty() {
            let question = format!(
                "{} won't be updated but they are present in {}. Continue anyway?",
                present.join(", "),
                input.display()
            );
            if !sink.confirm(&question, true) {
                warn!("Template with repository specific options declined");
                return Err(HubConfError::ConfirmationDeclined.into());
            }
            strip_repo_specific(options);
        }
    }
    if template.options.as_ref().is_some_and(|o| o.is_empty()) {
        template.options = None;
    }

    let mut updated = Vec::new();
    for name in org.repositories().await? {
        println!("Updating {}", name);
        let repo = Repository::new(ctx.api.clone(), org.name(), name.as_str());

        let mut current = repo.describe().await?;
        let mut desired = template.clone();
        match template.options.as_ref() {
            Some(template_options) => {
                if let Some(current_options) = current.options.as_mut() {
                    current_options.retain(|key, _| template_options.contains_key(key));
                }
                if current.options.as_ref() == Some(template_options) {
                    current.options = None;
                    desired.options = None;
                }
            }
            None => current.options = None,
        }

        if confirm_config_changes(&current, &desired, false, sink)? {
            let summary = repo.update(&desired).await?;
            updated.push((repo.full_name(), summary));
        }
    }

    println!("All repos in {} processed", org.name());
    Ok(updated)
}

fn strip_repo_specific(options: &mut Options) {
    for key in REPO_SPECIFIC_OPTIONS {
        options.remove(key);
    }
}
