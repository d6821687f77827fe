use crate::users::dtos::*;
use crate::{AppError, AppResult, Caller};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument};
use tutorhub_core::entities::connections::{self, ConnectionStatus};
use tutorhub_core::entities::users::{self, Role};
use validator::Validate;

#[cfg(test)]
#[path = "use_cases_test.rs"]
mod tests;

// ============ Constants ============

/// Alphabet for connection codes, matching base36 digits uppercased.
const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const CODE_LENGTH: usize = 6;

// ============ Connection Codes ============

pub(crate) fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Draws codes until one is free. The column is unique, so a collision at
/// insert time still fails loudly rather than corrupting the directory.
pub(crate) async fn generate_unique_code(db: &DatabaseConnection) -> AppResult<String> {
    loop {
        let code = generate_code();
        let taken = users::Entity::find()
            .filter(users::Column::Code.eq(&code))
            .one(db)
            .await
            .map_err(AppError::from)?
            .is_some();
        if !taken {
            return Ok(code);
        }
    }
}

// ============ Shared Lookups ============

/// Batch-loads users by id into a map of embeddable summaries.
pub(crate) async fn load_user_summaries(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = i32>,
) -> AppResult<HashMap<i32, UserSummary>> {
    let ids: Vec<i32> = ids.into_iter().collect::<HashSet<_>>().into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = users::Entity::find()
        .filter(users::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(AppError::from)?;

    Ok(rows.into_iter().map(|u| (u.id, UserSummary::from(u))).collect())
}

// ============ Create User Use Case ============

pub struct CreateUserUseCase;

impl CreateUserUseCase {
    #[instrument(skip(db, req), fields(email = %req.email, role = req.role.as_str()))]
    pub async fn execute(db: &DatabaseConnection, req: CreateUserRequest) -> AppResult<users::Model> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // One account per (email, role) pair
        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(&req.email))
            .filter(users::Column::Role.eq(req.role))
            .one(db)
            .await
            .map_err(AppError::from)?;
        if existing.is_some() {
            return Err(AppError::Conflict(format!(
                "Account with email {} as {} already exists",
                req.email,
                req.role.as_str()
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)?
            .to_string();

        let code = generate_unique_code(db).await?;

        let user = users::ActiveModel {
            email: Set(req.email),
            password: Set(password_hash),
            name: Set(req.name),
            role: Set(req.role),
            code: Set(Some(code)),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let user = user.insert(db).await.map_err(AppError::from)?;

        info!(user_id = user.id, "created user");
        Ok(user)
    }
}

// ============ Connection Code Use Case ============

pub struct GetCodeUseCase;

impl GetCodeUseCase {
    /// Returns the caller's connection code, minting one for accounts
    /// created before codes existed.
    #[instrument(skip(db))]
    pub async fn execute(db: &DatabaseConnection, user_id: i32) -> AppResult<CodeResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if let Some(code) = user.code.clone() {
            return Ok(CodeResponse { code });
        }

        let code = generate_unique_code(db).await?;
        let mut active: users::ActiveModel = user.into();
        active.code = Set(Some(code.clone()));
        active.update(db).await.map_err(AppError::from)?;

        info!(user_id, "minted connection code for legacy account");
        Ok(CodeResponse { code })
    }
}

// ============ List Students Use Case ============

pub struct ListStudentsUseCase;

impl ListStudentsUseCase {
    /// Students connected to the calling tutor, newest connection first.
    /// Non-tutors get an empty list rather than an error.
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(db: &DatabaseConnection, caller: Caller) -> AppResult<Vec<UserSummary>> {
        if !caller.is_tutor() {
            return Ok(Vec::new());
        }

        let conns = connections::Entity::find()
            .filter(connections::Column::TutorId.eq(caller.user_id))
            .filter(connections::Column::Status.eq(ConnectionStatus::Approved))
            .order_by_desc(connections::Column::CreatedAt)
            .all(db)
            .await
            .map_err(AppError::from)?;

        let student_ids: Vec<i32> = conns.iter().map(|c| c.student_id).collect();
        let mut summaries = load_user_summaries(db, student_ids.iter().copied()).await?;

        Ok(student_ids
            .into_iter()
            .filter_map(|id| summaries.remove(&id))
            .collect())
    }
}

// ============ Create Student Use Case ============

pub struct CreateStudentUseCase;

impl CreateStudentUseCase {
    #[instrument(skip(db, req), fields(user_id = caller.user_id, email = %req.email))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        req: CreateStudentRequest,
    ) -> AppResult<UserSummary> {
        if !caller.is_tutor() {
            return Err(AppError::Authorization(
                "Only tutors can create students".to_string(),
            ));
        }

        let student = CreateUserUseCase::execute(
            db,
            CreateUserRequest {
                email: req.email,
                password: req.password,
                name: req.name,
                role: Role::Student,
            },
        )
        .await?;

        Ok(UserSummary::from(student))
    }
}

// ============ Update Name Use Case ============

pub struct UpdateNameUseCase;

impl UpdateNameUseCase {
    #[instrument(skip(db, req))]
    pub async fn execute(
        db: &DatabaseConnection,
        user_id: i32,
        req: UpdateNameRequest,
    ) -> AppResult<UserSummary> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut active: users::ActiveModel = user.into();
        active.name = Set(req.name);
        let updated = active.update(db).await.map_err(AppError::from)?;

        Ok(UserSummary::from(updated))
    }
}

// ============ Delete Account Use Case ============

pub struct DeleteAccountUseCase;

impl DeleteAccountUseCase {
    /// Removes the account row. Owned lessons, transactions and messages
    /// stay behind; without foreign keys nothing cascades.
    #[instrument(skip(db))]
    pub async fn execute(db: &DatabaseConnection, user_id: i32) -> AppResult<DeleteAccountResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        user.delete(db).await.map_err(AppError::from)?;

        info!(user_id, "account deleted");
        Ok(DeleteAccountResponse {
            message: "Account deleted successfully".to_string(),
        })
    }
}
