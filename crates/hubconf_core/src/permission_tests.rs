use super::*;
use serde_json::json;

fn flags(admin: bool, push: bool, pull: bool) -> PermissionFlags {
    PermissionFlags { admin, push, pull }
}

#[test]
fn test_decode_picks_highest_flag() {
    assert_eq!(
        decode_permission(&flags(true, true, true)),
        Ok(Permission::Admin)
    );
    assert_eq!(
        decode_permission(&flags(false, true, true)),
        Ok(Permission::Push)
    );
    assert_eq!(
        decode_permission(&flags(false, false, true)),
        Ok(Permission::Pull)
    );
}

#[test]
fn test_decode_admin_alone_is_admin() {
    assert_eq!(
        decode_permission(&flags(true, false, false)),
        Ok(Permission::Admin)
    );
}

#[test]
fn test_decode_without_flags_fails() {
    let result = decode_permission(&flags(false, false, false));

    assert_eq!(
        result,
        Err(ValidationError::NoPermission {
            flags: "admin=false push=false pull=false".to_string()
        })
    );
}

#[test]
fn test_flags_ignore_extra_github_fields() {
    let parsed: PermissionFlags = serde_json::from_value(json!({
        "admin": false,
        "maintain": true,
        "push": true,
        "triage": true,
        "pull": true
    }))
    .unwrap();

    assert_eq!(parsed, flags(false, true, true));
}

#[test]
fn test_permission_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Permission::Push).unwrap(), json!("push"));

    let parsed: Permission = serde_json::from_value(json!("admin")).unwrap();
    assert_eq!(parsed, Permission::Admin);
    assert_eq!(parsed.to_string(), "admin");
}

#[test]
fn test_permission_ordering() {
    assert!(Permission::Admin > Permission::Push);
    assert!(Permission::Push > Permission::Pull);
}
