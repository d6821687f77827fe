use crate::auth::dtos::*;
use crate::users::dtos::CreateUserRequest;
use crate::users::use_cases::CreateUserUseCase;
use crate::{AppError, AppResult};
use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{info, instrument, warn};
use tutorhub_core::entities::users;
use validator::Validate;

#[cfg(test)]
#[path = "use_cases_test.rs"]
mod tests;

// ============ Config ============

pub struct AuthConfig {
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: i64,
}

// ============ Register Use Case ============

pub struct RegisterUseCase;

impl RegisterUseCase {
    #[instrument(skip(db, config, req), fields(email = %req.email, role = req.role.as_str()))]
    pub async fn execute(
        db: &DatabaseConnection,
        config: &AuthConfig,
        req: RegisterRequest,
    ) -> AppResult<AuthResponse> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let user = CreateUserUseCase::execute(
            db,
            CreateUserRequest {
                email: req.email,
                password: req.password,
                name: req.name,
                role: req.role,
            },
        )
        .await?;

        info!(user_id = user.id, "registered new account");

        let access_token = generate_token(config, &user)?;
        Ok(AuthResponse {
            access_token,
            user: AuthenticatedUser::from(&user),
        })
    }
}

// ============ Login Use Case ============

pub struct LoginUseCase;

impl LoginUseCase {
    #[instrument(skip(db, config, req), fields(email = %req.email))]
    pub async fn execute(
        db: &DatabaseConnection,
        config: &AuthConfig,
        req: LoginRequest,
    ) -> AppResult<AuthResponse> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut query = users::Entity::find().filter(users::Column::Email.eq(&req.email));
        if let Some(role) = req.role {
            query = query.filter(users::Column::Role.eq(role));
        }
        let user = query.one(db).await.map_err(AppError::from)?;

        let user = match user {
            Some(u) => u,
            None => {
                warn!("login attempt for unknown account");
                return Err(AppError::Authentication("Invalid credentials".to_string()));
            }
        };

        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|e| AppError::Cryptographic(format!("Stored hash is invalid: {}", e)))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            warn!(user_id = user.id, "login attempt with wrong password");
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        if let Some(role) = req.role {
            if user.role != role {
                return Err(AppError::Authentication(format!(
                    "No {} account found with this email",
                    role.as_str()
                )));
            }
        }

        info!(user_id = user.id, "login succeeded");

        let access_token = generate_token(config, &user)?;
        Ok(AuthResponse {
            access_token,
            user: AuthenticatedUser::from(&user),
        })
    }
}

// ============ Token Generation ============

pub(crate) fn generate_token(config: &AuthConfig, user: &users::Model) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        iat: now.timestamp(),
        exp: (now + Duration::seconds(config.jwt_expiration)).timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Authentication(format!("JWT encoding error: {}", e)))
}

