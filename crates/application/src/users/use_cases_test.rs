#[cfg(test)]
mod tests {
    use crate::users::dtos::*;
    use crate::users::use_cases::generate_code;
    use sea_orm::prelude::DateTimeWithTimeZone;
    use tutorhub_core::entities::users::{self, Role};
    use validator::Validate;

    #[test]
    fn test_generate_code_shape() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_create_user_validation() {
        let valid = CreateUserRequest {
            email: "kit@example.com".to_string(),
            password: "secret1".to_string(),
            name: "Kit".to_string(),
            role: Role::Student,
        };
        assert!(valid.validate().is_ok());

        let bad = CreateUserRequest {
            email: "kit@example.com".to_string(),
            password: "short".to_string(),
            name: "Kit".to_string(),
            role: Role::Student,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_user_summary_omits_password() {
        let user = users::Model {
            id: 1,
            email: "kit@example.com".to_string(),
            password: "$argon2id$secret-hash".to_string(),
            name: "Kit".to_string(),
            role: Role::Student,
            code: Some("Z9Y8X7".to_string()),
            created_at: DateTimeWithTimeZone::parse_from_rfc3339("2026-01-15T09:00:00Z").unwrap(),
        };

        let json = serde_json::to_string(&UserSummary::from(&user)).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"code\":\"Z9Y8X7\""));
    }
}
