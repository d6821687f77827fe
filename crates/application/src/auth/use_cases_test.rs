#[cfg(test)]
mod tests {
    use crate::auth::dtos::*;
    use crate::auth::use_cases::{generate_token, AuthConfig};
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use sea_orm::prelude::DateTimeWithTimeZone;
    use tutorhub_core::entities::users::{self, Role};
    use validator::Validate;

    fn test_user() -> users::Model {
        users::Model {
            id: 7,
            email: "ada@example.com".to_string(),
            password: "$argon2id$irrelevant".to_string(),
            name: "Ada Lovelace".to_string(),
            role: Role::Tutor,
            code: Some("A1B2C3".to_string()),
            created_at: DateTimeWithTimeZone::parse_from_rfc3339("2026-01-15T09:00:00Z").unwrap(),
        }
    }

    #[test]
    fn test_register_validation() {
        let valid = RegisterRequest {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            name: "Ada".to_string(),
            role: Role::Tutor,
        };
        assert!(valid.validate().is_ok());

        // Malformed email
        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
            name: "Ada".to_string(),
            role: Role::Tutor,
        };
        assert!(bad_email.validate().is_err());

        // Password shorter than 6 characters
        let short_password = RegisterRequest {
            email: "ada@example.com".to_string(),
            password: "abc".to_string(),
            name: "Ada".to_string(),
            role: Role::Student,
        };
        assert!(short_password.validate().is_err());

        // Empty name
        let empty_name = RegisterRequest {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            name: "".to_string(),
            role: Role::Student,
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_login_validation() {
        let valid = LoginRequest {
            email: "ada@example.com".to_string(),
            password: "whatever".to_string(),
            role: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = LoginRequest {
            email: "nope".to_string(),
            password: "whatever".to_string(),
            role: Some(Role::Student),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_role_deserializes_lowercase() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"ada@example.com","password":"x","role":"tutor"}"#)
                .unwrap();
        assert_eq!(req.role, Some(Role::Tutor));

        // Role is optional
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"ada@example.com","password":"x"}"#).unwrap();
        assert_eq!(req.role, None);
    }

    #[test]
    fn test_generate_token_round_trip() {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
        };
        let user = test_user();

        let token = generate_token(&config, &user).unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, 7);
        assert_eq!(decoded.claims.email, "ada@example.com");
        assert_eq!(decoded.claims.role, Role::Tutor);
        assert_eq!(decoded.claims.exp - decoded.claims.iat, 3600);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
        };
        let token = generate_token(&config, &test_user()).unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
