use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use hubconf_cli::commands::{
    org_cmd::{self, OrgArgs},
    repo_cmd::{self, RepoArgs},
    Context,
};
use hubconf_cli::config::{get_config_path, AppConfig};
use hubconf_cli::errors::Error;
use hubconf_cli::terminal::TerminalSink;
use hubconf_cli::workspace;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// HubConf CLI: keep GitHub organization and repository settings in files
#[derive(Parser)]
#[command(name = "hubconf")]
#[command(about = "Keep GitHub organization and repository settings in files", long_about = None)]
struct Cli {
    /// GitHub user, sent with the token as basic authentication
    #[arg(long, env = "GITHUB_USER", global = true)]
    user: Option<String>,

    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// GitHub API url, for GitHub Enterprise
    #[arg(long, env = "GITHUB_API_URL", global = true)]
    github_base_url: Option<String>,

    /// Settings file with defaults for the options above
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull or push the configuration of a repository
    Repo(RepoArgs),

    /// Pull or push the configuration of an organization
    Org(OrgArgs),

    /// Show the CLI version
    Version,
}

async fn run(cli: Cli) -> Result<(), Error> {
    let settings = AppConfig::load_or_default(&get_config_path(cli.config.as_deref()))?;
    let credentials = settings.resolve(cli.user, cli.token, cli.github_base_url)?;

    let workspace = std::env::current_dir()
        .ok()
        .and_then(|dir| workspace::detect(&dir));
    let ctx = Context::new(Arc::new(credentials.client()?), workspace);
    let mut sink = TerminalSink::stdio();

    match &cli.command {
        Commands::Repo(args) => repo_cmd::execute(args, &ctx, &mut sink).await,
        Commands::Org(args) => org_cmd::execute(args, &ctx, &mut sink).await,
        Commands::Version => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("HUBCONF_LOG"))
        .init();

    let cli = Cli::parse();
    if let Commands::Version = cli.command {
        println!("hubconf {}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    if let Err(e) = run(cli).await {
        error!("Command failed: {}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}
