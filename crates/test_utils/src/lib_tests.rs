//! Tests for test utilities.

use super::*;
use serde_json::json;

#[tokio::test]
async fn test_get_masks_canned_response() {
    let github = FakeGitHub::new().with_get(
        "/orgs/acme",
        json!({"name": "ACME", "company": "ACME Inc", "url": "https://api.github.com/orgs/acme"}),
    );

    let result = github.get("/orgs/acme", &["name", "company"]).await.unwrap();

    assert_eq!(result, json!({"name": "ACME", "company": "ACME Inc"}));
    assert_eq!(github.count("GET"), 1);
}

#[tokio::test]
async fn test_get_unknown_path_is_not_found() {
    let github = FakeGitHub::new();

    let result = github.get("/orgs/missing", &[]).await;

    assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn test_writes_are_recorded_in_order() {
    let github = FakeGitHub::new();

    github
        .delete("/repos/octo/hello/collaborators/alice")
        .await
        .unwrap();
    github
        .put(
            "/repos/octo/hello/collaborators/alice",
            &json!({"permission": "admin"}),
        )
        .await
        .unwrap();

    assert_eq!(
        github.write_lines(),
        vec![
            "DELETE /repos/octo/hello/collaborators/alice".to_string(),
            "PUT /repos/octo/hello/collaborators/alice".to_string(),
        ]
    );
    assert_eq!(
        github.writes()[1].payload,
        Some(json!({"permission": "admin"}))
    );
}

#[tokio::test]
async fn test_configured_write_response_is_returned() {
    let github = FakeGitHub::new().with_response("POST", "/orgs/acme/teams", json!({"id": 42}));

    let result = github
        .post("/orgs/acme/teams", &json!({"name": "core"}))
        .await
        .unwrap();

    assert_eq!(result, Some(json!({"id": 42})));
}

#[tokio::test]
async fn test_injected_failure_is_recorded_and_returned() {
    let github = FakeGitHub::new().with_failure("PATCH", "/repos/octo/hello", 422);

    let result = github.patch("/repos/octo/hello", &json!({})).await;

    assert!(matches!(result, Err(Error::Api { status: 422, .. })));
    assert_eq!(github.writes().len(), 1);
}
