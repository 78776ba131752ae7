use super::*;
use serde_json::json;

fn parse(value: serde_json::Value) -> Result<EventTarget, ApiError> {
    EventPayload::parse(value.to_string().as_bytes())?.target()
}

#[test]
fn test_push_payload_uses_owner_name() {
    let target = parse(json!({
        "ref": "refs/heads/main",
        "repository": {
            "full_name": "acme/widgets",
            "name": "widgets",
            "owner": {"name": "acme", "email": null}
        }
    }))
    .unwrap();

    assert_eq!(
        target,
        EventTarget {
            full_name: "acme/widgets".to_string(),
            owner: "acme".to_string(),
            name: "widgets".to_string(),
        }
    );
}

#[test]
fn test_other_payloads_fall_back_to_login() {
    let target = parse(json!({
        "repository": {
            "full_name": "acme/widgets",
            "name": "widgets",
            "owner": {"login": "acme"}
        }
    }))
    .unwrap();

    assert_eq!(target.owner, "acme");
}

#[test]
fn test_payload_without_repository_is_rejected() {
    let result = parse(json!({"zen": "Keep it logically awesome."}));

    assert!(matches!(result, Err(ApiError::BadRequest(msg)) if msg.contains("repository")));
}

#[test]
fn test_owner_without_identity_is_rejected() {
    let result = parse(json!({
        "repository": {"full_name": "acme/widgets", "name": "widgets", "owner": {}}
    }));

    assert!(matches!(result, Err(ApiError::BadRequest(_))));
}

#[test]
fn test_invalid_json_is_rejected() {
    assert!(matches!(
        EventPayload::parse(b"not json"),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn test_webhook_response_shape() {
    let response = WebhookResponse {
        success: true,
        repo: "acme/widgets".to_string(),
        actions: vec![REPO_SYNC_ACTION.to_string()],
    };

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"success": true, "repo": "acme/widgets", "actions": ["repo_sync"]})
    );
}
