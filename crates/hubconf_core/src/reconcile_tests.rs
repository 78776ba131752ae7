use super::*;
use serde_json::json;
use test_utils::FakeGitHub;

fn delete(path: &str) -> ApiCall {
    ApiCall::Delete {
        path: path.to_string(),
    }
}

fn put(path: &str, payload: Value) -> ApiCall {
    ApiCall::Put {
        path: path.to_string(),
        payload,
    }
}

#[test]
fn test_call_display() {
    assert_eq!(delete("/teams/1").to_string(), "DELETE /teams/1");
    assert_eq!(
        ApiCall::CreateTeam {
            path: "/orgs/acme/teams".to_string(),
            payload: json!({"name": "core"}),
            links: vec![],
        }
        .to_string(),
        "POST /orgs/acme/teams"
    );
}

#[test]
fn test_plan_counts_logical_changes() {
    let mut plan = Plan::new();
    plan.remove(delete("/a"));
    plan.push(delete("/b"));
    plan.update(put("/b", json!({})));
    plan.create(put("/c", json!({})));

    assert_eq!(plan.calls().len(), 4);
    assert_eq!(
        plan.report(),
        ApplyReport {
            created: 1,
            updated: 1,
            removed: 1
        }
    );
    assert_eq!(plan.report().to_string(), "1 created, 1 updated, 1 removed");
}

#[test]
fn test_plan_extend_keeps_order() {
    let mut first = Plan::new();
    first.remove(delete("/a"));
    let mut second = Plan::new();
    second.create(put("/b", json!({})));

    first.extend(second);

    let paths: Vec<&str> = first.calls().iter().map(|c| c.path()).collect();
    assert_eq!(paths, vec!["/a", "/b"]);
    assert_eq!(first.report().created, 1);
    assert_eq!(first.report().removed, 1);
}

#[tokio::test]
async fn test_execute_sends_calls_in_order() {
    let fake = FakeGitHub::new();
    let mut plan = Plan::new();
    plan.remove(delete("/repos/acme/widgets/collaborators/alice"));
    plan.create(put(
        "/repos/acme/widgets/collaborators/bob",
        json!({"permission": "push"}),
    ));

    let report = plan.execute(&fake).await.unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(
        fake.write_lines(),
        vec![
            "DELETE /repos/acme/widgets/collaborators/alice",
            "PUT /repos/acme/widgets/collaborators/bob",
        ]
    );
    assert_eq!(
        fake.writes()[1].payload,
        Some(json!({"permission": "push"}))
    );
}

#[tokio::test]
async fn test_execute_stops_at_first_failure() {
    let fake = FakeGitHub::new().with_failure("DELETE", "/a", 500);
    let mut plan = Plan::new();
    plan.remove(delete("/a"));
    plan.remove(delete("/b"));

    let result = plan.execute(&fake).await;

    assert!(matches!(result, Err(HubConfError::Transport(_))));
    assert_eq!(fake.write_lines(), vec!["DELETE /a"]);
}

#[tokio::test]
async fn test_create_team_links_under_returned_id() {
    let fake = FakeGitHub::new().with_response("POST", "/orgs/acme/teams", json!({"id": 42}));
    let call = ApiCall::CreateTeam {
        path: "/orgs/acme/teams".to_string(),
        payload: json!({"name": "core"}),
        links: vec![
            TeamLink {
                segments: vec!["repos".into(), "acme".into(), "widgets".into()],
                payload: json!({"permission": "push"}),
            },
            TeamLink {
                segments: vec!["memberships".into(), "alice".into()],
                payload: json!({"role": "maintainer"}),
            },
        ],
    };

    let response = call.send(&fake).await.unwrap();

    assert_eq!(response, Some(json!({"id": 42})));
    assert_eq!(
        fake.write_lines(),
        vec![
            "POST /orgs/acme/teams",
            "PUT /teams/42/repos/acme/widgets",
            "PUT /teams/42/memberships/alice",
        ]
    );
}

#[tokio::test]
async fn test_create_team_without_id_fails() {
    let fake = FakeGitHub::new();
    let call = ApiCall::CreateTeam {
        path: "/orgs/acme/teams".to_string(),
        payload: json!({"name": "core"}),
        links: vec![TeamLink {
            segments: vec!["memberships".into(), "alice".into()],
            payload: json!({"role": "member"}),
        }],
    };

    let result = call.send(&fake).await;

    assert!(matches!(
        result,
        Err(HubConfError::Validation(ValidationError::MalformedPayload {
            resource: "teams",
            ..
        }))
    ));
    assert_eq!(fake.write_lines(), vec!["POST /orgs/acme/teams"]);
}

#[tokio::test]
async fn test_fetch_list_rejects_objects() {
    let fake = FakeGitHub::new().with_get("/orgs/acme/members", json!({"login": "alice"}));

    let result = fetch_list(&fake, "/orgs/acme/members", FieldMask::Member, "members").await;

    assert!(matches!(
        result,
        Err(HubConfError::Validation(ValidationError::MalformedPayload { .. }))
    ));
}

#[test]
fn test_take_string_removes_field() {
    let mut item = json!({"name": "bug", "color": "fc2929"});

    let name = take_string(&mut item, "name", "labels").unwrap();

    assert_eq!(name, "bug");
    assert_eq!(item, json!({"color": "fc2929"}));
    assert!(take_string(&mut item, "name", "labels").is_err());
}
