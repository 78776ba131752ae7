//! Repository configuration commands.
//!
//! # Examples
//!
//! ```bash
//! # Write the configuration of acme/widgets to .hubconf.repo.yml
//! hubconf repo --organization acme --repository widgets pull
//!
//! # Inside a checkout of acme/widgets, apply the file back
//! hubconf repo push
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use hubconf_core::{changes::confirm_config_changes, ChangeSink, Repository, RepositoryConfig};
use tracing::{info, instrument};

use super::{print_summary, Context, REPO_CONFIG_FILE};
use crate::errors::Error;
use crate::store;

#[cfg(test)]
#[path = "repo_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone)]
pub struct RepoArgs {
    /// Owner of the repository. Defaults to the owner of the `origin`
    /// remote of the current checkout.
    #[arg(long)]
    pub organization: Option<String>,

    /// Name of the repository. Defaults to the `origin` remote of the
    /// current checkout.
    #[arg(long)]
    pub repository: Option<String>,

    #[command(subcommand)]
    pub command: RepoCommands,
}

/// Repository subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum RepoCommands {
    /// Write the current repository configuration to a file.
    Pull {
        /// Destination; the extension picks the format (yml, json, toml).
        #[arg(long, default_value = REPO_CONFIG_FILE)]
        output_file: PathBuf,
    },

    /// Make the repository match a configuration file.
    Push {
        /// Source; the extension picks the format (yml, json, toml).
        #[arg(long, default_value = REPO_CONFIG_FILE)]
        input_file: PathBuf,
    },
}

/// Runs a repository subcommand.
pub async fn execute(
    args: &RepoArgs,
    ctx: &Context,
    sink: &mut dyn ChangeSink,
) -> Result<(), Error> {
    let owner = ctx.owner(args.organization.as_deref(), "--organization")?;
    let name = ctx.repository(args.repository.as_deref())?;
    let repo = Repository::new(ctx.api.clone(), owner, name);

    match &args.command {
        RepoCommands::Pull { output_file } => pull(&repo, output_file).await,
        RepoCommands::Push { input_file } => {
            if let Some(summary) = push(&repo, input_file, sink).await? {
                print_summary(&repo.full_name(), &summary);
            }
            Ok(())
        }
    }
}

/// Writes the current configuration of `repo` to `output`.
#[instrument(skip(repo), fields(repo = %repo.full_name()))]
pub async fn pull(repo: &Repository, output: &Path) -> Result<(), Error> {
    let config = repo.describe().await?;
    store::save(output, &config)?;
    println!("{} updated", output.display());
    Ok(())
}

/// Applies `input` to `repo` once the user approved the changes.
///
/// Returns `None` when there was nothing to change.
///
/// # Errors
///
/// Declining the changes is an error
/// ([`hubconf_core::HubConfError::ConfirmationDeclined`]).
#[instrument(skip(repo, sink), fields(repo = %repo.full_name()))]
pub async fn push(
    repo: &Repository,
    input: &Path,
    sink: &mut dyn ChangeSink,
) -> Result<Option<hubconf_core::UpdateSummary>, Error> {
    let desired: RepositoryConfig = store::load(input)?;
    let current = repo.describe().await?;

    if !confirm_config_changes(&current, &desired, true, sink)? {
        info!("Repository already matches {}", input.display());
        return Ok(None);
    }

    Ok(Some(repo.update(&desired).await?))
}
