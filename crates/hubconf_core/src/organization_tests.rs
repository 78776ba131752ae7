use super::*;
use crate::config::MemberConfig;
use serde_json::json;
use test_utils::FakeGitHub;

fn acme() -> FakeGitHub {
    FakeGitHub::new()
        .with_get(
            "/orgs/acme",
            json!({"login": "acme", "name": "Acme", "email": "ops@acme.test", "public_repos": 3}),
        )
        .with_get("/orgs/acme/members", json!([{"login": "alice"}]))
        .with_get("/orgs/acme/memberships/alice", json!({"role": "admin"}))
        .with_get(
            "/orgs/acme/teams",
            json!([{"id": 7, "name": "core", "description": null, "privacy": "closed"}]),
        )
        .with_get("/teams/7/members", json!([]))
        .with_get("/teams/7/repos", json!([]))
        .with_get(
            "/orgs/acme/hooks",
            json!([{"id": 5, "name": "web", "events": ["push"], "active": true}]),
        )
        .with_get(
            "/orgs/acme/repos",
            json!([{"name": "widgets", "private": false}, {"name": "gadgets"}]),
        )
}

#[tokio::test]
async fn test_describe_assembles_every_section() {
    let org = Organization::new(Arc::new(acme()), "acme");

    let config = org.describe().await.unwrap();

    assert_eq!(
        serde_json::to_value(&config).unwrap(),
        json!({
            "options": {"name": "Acme", "email": "ops@acme.test"},
            "members": {"alice": {"role": "admin"}},
            "teams": {
                "core": {"id": 7, "privacy": "closed", "members": {}, "repositories": {}}
            },
            "hooks": {"web": {"name": "web", "events": ["push"], "active": true}}
        })
    );
}

#[tokio::test]
async fn test_update_with_described_config_is_a_no_op() {
    let fake = Arc::new(acme());
    let org = Organization::new(fake.clone(), "acme");
    let config = org.describe().await.unwrap();

    let summary = org.update(&config).await.unwrap();

    assert!(fake.writes().is_empty());
    assert_eq!(
        summary.keys().copied().collect::<Vec<_>>(),
        vec!["hooks", "members", "options", "teams"]
    );
}

#[tokio::test]
async fn test_partial_update_only_touches_members() {
    let fake = Arc::new(acme());
    let org = Organization::new(fake.clone(), "acme");
    let config = OrganizationConfig {
        members: Some(Members::from([
            ("alice".to_string(), MemberConfig::new("admin")),
            ("bob".to_string(), MemberConfig::new("member")),
        ])),
        ..OrganizationConfig::default()
    };

    let summary = org.update(&config).await.unwrap();

    assert_eq!(fake.write_lines(), vec!["PUT /orgs/acme/memberships/bob"]);
    assert_eq!(fake.count("GET"), 2);
    assert_eq!(summary["members"].created, 1);
}

#[tokio::test]
async fn test_repositories_lists_names() {
    let org = Organization::new(Arc::new(acme()), "acme");

    let names = org.repositories().await.unwrap();

    assert_eq!(names, vec!["widgets", "gadgets"]);
}

#[test]
fn test_name() {
    let org = Organization::new(Arc::new(FakeGitHub::new()), "acme");

    assert_eq!(org.name(), "acme");
}
