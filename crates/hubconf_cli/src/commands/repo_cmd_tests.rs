use super::*;
use crate::terminal::TerminalSink;
use crate::workspace::WorkspaceRepo;
use hubconf_core::HubConfError;
use serde_json::json;
use std::fs;
use std::io::Cursor;
use std::sync::Arc;
use tempfile::TempDir;
use test_utils::FakeGitHub;

fn widgets() -> FakeGitHub {
    FakeGitHub::new()
        .with_get(
            "/repos/acme/widgets",
            json!({"name": "widgets", "description": "Widgets", "private": false}),
        )
        .with_get(
            "/repos/acme/widgets/collaborators",
            json!([{"login": "alice", "permissions": {"admin": false, "push": true, "pull": true}}]),
        )
        .with_get(
            "/repos/acme/widgets/labels",
            json!([{"name": "bug", "color": "fc2929"}]),
        )
        .with_get("/repos/acme/widgets/hooks", json!([]))
}

fn answers(text: &str) -> TerminalSink<Cursor<Vec<u8>>, Vec<u8>> {
    TerminalSink::new(Cursor::new(text.as_bytes().to_vec()), Vec::new())
}

#[test]
fn test_push_command_construction() {
    let args = RepoArgs {
        organization: Some("acme".to_string()),
        repository: None,
        command: RepoCommands::Push {
            input_file: PathBuf::from(REPO_CONFIG_FILE),
        },
    };

    match args.command {
        RepoCommands::Push { input_file } => {
            assert_eq!(input_file, PathBuf::from(".hubconf.repo.yml"))
        }
        _ => panic!("Expected Push variant"),
    }
}

#[tokio::test]
async fn test_pull_writes_current_configuration() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join(REPO_CONFIG_FILE);
    let fake = Arc::new(widgets());
    let repo = Repository::new(fake.clone(), "acme", "widgets");

    pull(&repo, &output).await.unwrap();

    let written: RepositoryConfig = store::load(&output).unwrap();
    assert_eq!(written, repo.describe().await.unwrap());
    assert!(fake.writes().is_empty());
}

#[tokio::test]
async fn test_push_applies_confirmed_changes() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join(REPO_CONFIG_FILE);
    fs::write(&input, "labels:\n  bug:\n    color: ee0701\n").unwrap();
    let fake = Arc::new(widgets());
    let repo = Repository::new(fake.clone(), "acme", "widgets");
    let mut sink = answers("y\n");

    let summary = push(&repo, &input, &mut sink).await.unwrap().unwrap();

    assert_eq!(
        fake.write_lines(),
        vec!["PATCH /repos/acme/widgets/labels/bug"]
    );
    assert_eq!(summary["labels"].updated, 1);
    let output = String::from_utf8(sink.into_output()).unwrap();
    assert!(output.contains("labels.bug.color"));
}

#[tokio::test]
async fn test_push_declined_aborts_without_writes() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("repo.json");
    fs::write(&input, r#"{"collaborators": {"bob": {"permission": "pull"}}}"#).unwrap();
    let fake = Arc::new(widgets());
    let repo = Repository::new(fake.clone(), "acme", "widgets");
    let mut sink = answers("n\n");

    let result = push(&repo, &input, &mut sink).await;

    let error = result.unwrap_err();
    assert!(matches!(
        error,
        Error::Core(HubConfError::ConfirmationDeclined)
    ));
    assert_eq!(error.exit_code(), 2);
    assert!(fake.writes().is_empty());
}

#[tokio::test]
async fn test_push_without_changes_asks_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join(REPO_CONFIG_FILE);
    fs::write(&input, "labels:\n  bug:\n    color: fc2929\n").unwrap();
    let fake = Arc::new(widgets());
    let repo = Repository::new(fake.clone(), "acme", "widgets");
    let mut sink = answers("");

    let summary = push(&repo, &input, &mut sink).await.unwrap();

    assert!(summary.is_none());
    assert!(fake.writes().is_empty());
    assert!(sink.into_output().is_empty());
}

#[tokio::test]
async fn test_push_rejects_unknown_sections() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join(REPO_CONFIG_FILE);
    fs::write(&input, "teams: {}\n").unwrap();
    let fake = Arc::new(widgets());
    let repo = Repository::new(fake.clone(), "acme", "widgets");
    let mut sink = answers("y\n");

    let result = push(&repo, &input, &mut sink).await;

    assert!(matches!(result, Err(Error::ParseFile { .. })));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_execute_defaults_to_workspace_repository() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("widgets.json");
    let fake = Arc::new(widgets());
    let ctx = Context::new(
        fake.clone(),
        Some(WorkspaceRepo {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
        }),
    );
    let args = RepoArgs {
        organization: None,
        repository: None,
        command: RepoCommands::Pull {
            output_file: output.clone(),
        },
    };

    execute(&args, &ctx, &mut answers("")).await.unwrap();

    assert!(output.exists());
    assert!(fake
        .calls()
        .iter()
        .all(|c| c.path.starts_with("/repos/acme/widgets")));
}

#[tokio::test]
async fn test_execute_requires_repository_outside_checkout() {
    let ctx = Context::new(Arc::new(widgets()), None);
    let args = RepoArgs {
        organization: Some("acme".to_string()),
        repository: None,
        command: RepoCommands::Pull {
            output_file: PathBuf::from(REPO_CONFIG_FILE),
        },
    };

    let result = execute(&args, &ctx, &mut answers("")).await;

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
}
