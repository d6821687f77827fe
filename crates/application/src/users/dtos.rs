use serde::{Deserialize, Serialize};
use tutorhub_core::entities::users::{self, Role};
use validator::Validate;

// ============ Requests ============

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1-100 characters"))]
    pub name: String,
    pub role: Role,
}

/// Body for a tutor creating a student account directly. Role is implied.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1-100 characters"))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateNameRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1-100 characters"))]
    pub name: String,
}

// ============ Responses ============

/// User shape embedded in other resources and returned from profile
/// endpoints. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub code: Option<String>,
}

impl From<&users::Model> for UserSummary {
    fn from(user: &users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            code: user.code.clone(),
        }
    }
}

impl From<users::Model> for UserSummary {
    fn from(user: users::Model) -> Self {
        Self::from(&user)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CodeResponse {
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAccountResponse {
    pub message: String,
}
