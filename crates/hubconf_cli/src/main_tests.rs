use super::*;
use clap::CommandFactory;
use hubconf_cli::commands::{org_cmd::OrgCommands, repo_cmd::RepoCommands};

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_repo_pull_with_defaults() {
    let cli = Cli::try_parse_from([
        "hubconf",
        "repo",
        "--organization",
        "acme",
        "--repository",
        "widgets",
        "pull",
    ])
    .unwrap();

    match cli.command {
        Commands::Repo(args) => {
            assert_eq!(args.organization.as_deref(), Some("acme"));
            assert_eq!(args.repository.as_deref(), Some("widgets"));
            match args.command {
                RepoCommands::Pull { output_file } => {
                    assert_eq!(output_file, PathBuf::from(".hubconf.repo.yml"))
                }
                _ => panic!("Expected Pull variant"),
            }
        }
        _ => panic!("Expected Repo command"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "hubconf",
        "org",
        "--name",
        "acme",
        "repos",
        "--input-file",
        "template.json",
        "--token",
        "ghp_flag",
        "--github-base-url",
        "https://github.example.com/api/v3",
    ])
    .unwrap();

    assert_eq!(cli.token.as_deref(), Some("ghp_flag"));
    assert_eq!(
        cli.github_base_url.as_deref(),
        Some("https://github.example.com/api/v3")
    );
    match cli.command {
        Commands::Org(args) => {
            assert_eq!(args.name.as_deref(), Some("acme"));
            assert!(matches!(
                args.command,
                OrgCommands::Repos { input_file } if input_file == PathBuf::from("template.json")
            ));
        }
        _ => panic!("Expected Org command"),
    }
}

#[test]
fn test_parse_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["hubconf", "repo", "sync"]).is_err());
}
