//! Tests for user record models

#[cfg(test)]
mod tests {
    use crate::auth::Identity;
    use crate::roles::{AccountStatus, Role};
    use crate::users::models::{NewUserRecord, UserRecord};

    fn identity(email: &str, name: Option<&str>) -> Identity {
        Identity {
            uid: "uid-1".to_string(),
            email: email.to_string(),
            display_name: name.map(str::to_string),
            photo_url: Some("https://img.example/a.png".to_string()),
            email_verified: true,
        }
    }

    #[test]
    fn test_borrower_registration_starts_active() {
        let record =
            NewUserRecord::from_identity(&identity("Alex@Example.com", Some("Alex")), Role::User);
        assert_eq!(record.email, "alex@example.com", "emails are stored lowercased");
        assert_eq!(record.role, Role::User);
        assert_eq!(record.requested_role, Role::User);
        assert_eq!(record.status, AccountStatus::Active);
    }

    #[test]
    fn test_manager_request_starts_pending() {
        let record =
            NewUserRecord::from_identity(&identity("lee@example.com", Some("Lee")), Role::Manager);
        // Role stays `user` until an admin approves the request.
        assert_eq!(record.role, Role::User);
        assert_eq!(record.requested_role, Role::Manager);
        assert_eq!(record.status, AccountStatus::Pending);
    }

    #[test]
    fn test_missing_display_name_falls_back() {
        let record = NewUserRecord::from_identity(&identity("x@example.com", None), Role::User);
        assert_eq!(record.name, "Anonymous User");
    }

    #[test]
    fn test_new_record_serializes_photo_url_key() {
        let record =
            NewUserRecord::from_identity(&identity("x@example.com", Some("X")), Role::User);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["photoURL"], "https://img.example/a.png");
        assert_eq!(value["requestedRole"], "user");
        assert_eq!(value["status"], "active");
    }

    #[test]
    fn test_user_record_deserializes_backend_shape() {
        let raw = r#"{
            "_id": "u1",
            "email": "lee@example.com",
            "name": "Lee",
            "photoURL": "https://img.example/lee.png",
            "role": "manager",
            "status": "suspended",
            "requestedRole": "manager",
            "createdAt": "2026-01-01 09:00:00",
            "suspendReason": "Document mismatch"
        }"#;
        let record: UserRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.role, Role::Manager);
        assert_eq!(record.status, AccountStatus::Suspended);
        assert_eq!(record.requested_role, Some(Role::Manager));
        assert_eq!(record.photo_url.as_deref(), Some("https://img.example/lee.png"));
        assert_eq!(record.suspend_reason.as_deref(), Some("Document mismatch"));
    }
}
