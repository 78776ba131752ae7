use super::*;
use crate::errors::HubConfError;
use crate::permission::Permission;
use test_utils::FakeGitHub;

fn acme() -> FakeGitHub {
    FakeGitHub::new()
        .with_get(
            "/orgs/acme/teams",
            json!([{
                "id": 7,
                "name": "core",
                "slug": "core",
                "description": "Core maintainers",
                "privacy": "closed",
                "permission": "pull"
            }]),
        )
        .with_get("/teams/7/members", json!([{"login": "alice", "id": 1}]))
        .with_get(
            "/teams/7/memberships/alice",
            json!({"role": "maintainer", "state": "active"}),
        )
        .with_get(
            "/teams/7/repos",
            json!([{
                "name": "widgets",
                "full_name": "acme/widgets",
                "permissions": {"admin": false, "push": true, "pull": true}
            }]),
        )
}

fn core_team() -> TeamConfig {
    TeamConfig {
        id: Some(7),
        description: Some("Core maintainers".to_string()),
        privacy: Some("closed".to_string()),
        permission: Some("pull".to_string()),
        members: BTreeMap::from([("alice".to_string(), MemberConfig::new("maintainer"))]),
        repositories: BTreeMap::from([(
            "widgets".to_string(),
            AccessConfig::new(Permission::Push),
        )]),
    }
}

#[tokio::test]
async fn test_fetch_assembles_members_and_repositories() {
    let manager = TeamManager::new(Arc::new(acme()), "acme");

    let current = manager.fetch().await.unwrap();

    assert_eq!(current, Teams::from([("core".to_string(), core_team())]));
}

#[tokio::test]
async fn test_apply_current_state_issues_no_writes() {
    let fake = Arc::new(acme());
    let manager = TeamManager::new(fake.clone(), "acme");
    let current = manager.fetch().await.unwrap();

    let report = manager.apply(&current).await.unwrap();

    assert!(report.is_empty());
    assert!(fake.writes().is_empty());
}

#[tokio::test]
async fn test_repository_access_change_recreates_the_link() {
    let fake = Arc::new(acme());
    let manager = TeamManager::new(fake.clone(), "acme");
    let mut team = core_team();
    team.repositories
        .insert("widgets".to_string(), AccessConfig::new(Permission::Admin));
    team.repositories
        .insert("gadgets".to_string(), AccessConfig::new(Permission::Pull));

    manager
        .apply(&Teams::from([("core".to_string(), team)]))
        .await
        .unwrap();

    assert_eq!(
        fake.write_lines(),
        vec![
            "DELETE /teams/7/repos/acme/widgets",
            "PUT /teams/7/repos/acme/gadgets",
            "PUT /teams/7/repos/acme/widgets",
        ]
    );
    assert_eq!(fake.count("PATCH"), 0);
    assert_eq!(
        fake.writes()[2].payload,
        Some(json!({"permission": "admin"}))
    );
}

#[tokio::test]
async fn test_metadata_change_patches_team_with_name() {
    let fake = Arc::new(acme());
    let manager = TeamManager::new(fake.clone(), "acme");
    let mut team = core_team();
    team.privacy = Some("secret".to_string());
    team.members.clear();

    let report = manager
        .apply(&Teams::from([("core".to_string(), team)]))
        .await
        .unwrap();

    assert_eq!(
        fake.write_lines(),
        vec!["PATCH /teams/7", "DELETE /teams/7/memberships/alice"]
    );
    assert_eq!(
        fake.writes()[0].payload,
        Some(json!({
            "name": "core",
            "description": "Core maintainers",
            "privacy": "secret",
            "permission": "pull"
        }))
    );
    assert_eq!(report.updated, 1);
    assert_eq!(report.removed, 1);
}

#[tokio::test]
async fn test_member_role_change_puts_membership() {
    let fake = Arc::new(acme());
    let manager = TeamManager::new(fake.clone(), "acme");
    let mut team = core_team();
    team.members
        .insert("alice".to_string(), MemberConfig::new("member"));

    manager
        .apply(&Teams::from([("core".to_string(), team)]))
        .await
        .unwrap();

    assert_eq!(fake.write_lines(), vec!["PUT /teams/7/memberships/alice"]);
    assert_eq!(fake.writes()[0].payload, Some(json!({"role": "member"})));
}

#[tokio::test]
async fn test_new_team_is_created_then_linked() {
    let fake = Arc::new(acme().with_response("POST", "/orgs/acme/teams", json!({"id": 8})));
    let manager = TeamManager::new(fake.clone(), "acme");
    let docs = TeamConfig {
        description: Some("Docs writers".to_string()),
        members: BTreeMap::from([("bob".to_string(), MemberConfig::new("member"))]),
        repositories: BTreeMap::from([(
            "site".to_string(),
            AccessConfig::new(Permission::Push),
        )]),
        ..TeamConfig::default()
    };
    let desired = Teams::from([
        ("core".to_string(), core_team()),
        ("docs".to_string(), docs),
    ]);

    let report = manager.apply(&desired).await.unwrap();

    assert_eq!(
        fake.write_lines(),
        vec![
            "POST /orgs/acme/teams",
            "PUT /teams/8/repos/acme/site",
            "PUT /teams/8/memberships/bob",
        ]
    );
    assert_eq!(
        fake.writes()[0].payload,
        Some(json!({"name": "docs", "description": "Docs writers"}))
    );
    assert_eq!(report.created, 1);
}

#[tokio::test]
async fn test_removed_team_is_deleted_by_id() {
    let fake = Arc::new(acme());
    let manager = TeamManager::new(fake.clone(), "acme");

    let report = manager.apply(&Teams::new()).await.unwrap();

    assert_eq!(fake.write_lines(), vec!["DELETE /teams/7"]);
    assert_eq!(report.removed, 1);
}

#[tokio::test]
async fn test_changing_team_id_is_refused_without_calls() {
    let fake = Arc::new(acme());
    let manager = TeamManager::new(fake.clone(), "acme");
    let mut team = core_team();
    team.id = Some(99);
    team.description = None;

    let result = manager
        .apply(&Teams::from([("core".to_string(), team)]))
        .await;

    assert!(matches!(
        result,
        Err(HubConfError::Validation(ValidationError::TeamIdMismatch {
            current: 7,
            desired: Some(99),
            ..
        }))
    ));
    assert!(fake.writes().is_empty());
}

#[test]
fn test_team_without_desired_id_keeps_current_id() {
    let current = Teams::from([("core".to_string(), core_team())]);
    let mut team = core_team();
    team.id = None;
    team.members.clear();
    let desired = Teams::from([("core".to_string(), team)]);

    let plan = plan_teams("acme", &current, &desired).unwrap();

    let calls: Vec<String> = plan.calls().iter().map(|c| c.to_string()).collect();
    assert_eq!(calls, vec!["DELETE /teams/7/memberships/alice"]);
}
