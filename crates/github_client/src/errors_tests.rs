use super::*;
use std::error::Error as StdError;

#[test]
fn test_api_error() {
    let error = Error::Api {
        method: "PATCH",
        path: "/repos/octo/hello".to_string(),
        status: 422,
        message: "Validation Failed".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "PATCH /repos/octo/hello failed with status 422: Validation Failed"
    );
    assert_eq!(error.status(), Some(422));
    assert!(error.source().is_none());
}

#[test]
fn test_not_found_error() {
    let error = Error::NotFound {
        path: "/repos/octo/missing".to_string(),
    };

    assert_eq!(error.to_string(), "Resource not found: /repos/octo/missing");
    assert_eq!(error.status(), Some(404));
}

#[test]
fn test_unexpected_payload_error() {
    let error = Error::UnexpectedPayload("expected an object or a list, got a string".to_string());

    assert_eq!(
        error.to_string(),
        "Unexpected payload from GitHub: expected an object or a list, got a string"
    );
    assert_eq!(error.status(), None);
}

#[test]
fn test_deserialization_error_keeps_source() {
    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error = Error::from(json_error);

    assert!(error.source().is_some());
    assert!(error
        .to_string()
        .starts_with("Failed to deserialize GitHub response"));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
