use crate::connections::{counterparty_ids, is_connected};
use crate::files::dtos::*;
use crate::files::storage::{format_bytes, parse_size_bytes, STORAGE_QUOTA_BYTES};
use crate::users::use_cases::load_user_summaries;
use crate::{AppError, AppResult, Caller};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{info, instrument};
use tutorhub_core::entities::files;
use validator::Validate;

// ============ Shared Lookups ============

/// Files visible to the caller. A tutor sees their own uploads that are
/// shared (no assignee) or assigned to a connected student. A student
/// sees files assigned to them plus shared uploads from connected tutors.
pub(crate) async fn visible_files(
    db: &DatabaseConnection,
    caller: Caller,
) -> AppResult<Vec<files::Model>> {
    let others = counterparty_ids(db, caller).await?;
    if others.is_empty() {
        return Ok(Vec::new());
    }

    let query = if caller.is_tutor() {
        files::Entity::find()
            .filter(files::Column::UploadedById.eq(caller.user_id))
            .filter(
                Condition::any()
                    .add(files::Column::AssignedToId.is_in(others))
                    .add(files::Column::AssignedToId.is_null()),
            )
    } else {
        files::Entity::find().filter(
            Condition::any()
                .add(files::Column::AssignedToId.eq(caller.user_id))
                .add(
                    Condition::all()
                        .add(files::Column::AssignedToId.is_null())
                        .add(files::Column::UploadedById.is_in(others)),
                ),
        )
    };

    query
        .order_by_desc(files::Column::CreatedAt)
        .all(db)
        .await
        .map_err(AppError::from)
}

// ============ Create File Use Case ============

pub struct CreateFileUseCase;

impl CreateFileUseCase {
    #[instrument(skip(db, req), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        req: CreateFileRequest,
    ) -> AppResult<FileDto> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(assigned_to_id) = req.assigned_to_id {
            let allowed =
                caller.is_tutor() && is_connected(db, caller.user_id, assigned_to_id).await?;
            if !allowed {
                return Err(AppError::Validation(
                    "Can only assign files to connected students".to_string(),
                ));
            }
        }

        let file = files::ActiveModel {
            name: Set(req.name),
            file_type: Set(req.file_type),
            size: Set(req.size),
            url: Set(req.url),
            subject: Set(req.subject),
            uploaded_by_id: Set(caller.user_id),
            assigned_to_id: Set(req.assigned_to_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let file = file.insert(db).await.map_err(AppError::from)?;

        info!(file_id = file.id, "file metadata recorded");
        Ok(FileDto::from_model(file))
    }
}

// ============ List Files Use Case ============

pub struct ListFilesUseCase;

impl ListFilesUseCase {
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(db: &DatabaseConnection, caller: Caller) -> AppResult<Vec<FileDto>> {
        let rows = visible_files(db, caller).await?;

        let ids = rows
            .iter()
            .flat_map(|f| std::iter::once(f.uploaded_by_id).chain(f.assigned_to_id));
        let summaries = load_user_summaries(db, ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let uploaded_by = summaries.get(&row.uploaded_by_id).cloned();
                let assigned_to = row
                    .assigned_to_id
                    .and_then(|id| summaries.get(&id).cloned());
                FileDto::from_model(row)
                    .with_uploaded_by(uploaded_by)
                    .with_assigned_to(assigned_to)
            })
            .collect())
    }
}

// ============ Delete File Use Case ============

pub struct DeleteFileUseCase;

impl DeleteFileUseCase {
    /// Deletes by id without an ownership check; any signed-in user who
    /// knows the id may remove the descriptor. Deleting twice succeeds.
    #[instrument(skip(db))]
    pub async fn execute(db: &DatabaseConnection, file_id: i32) -> AppResult<DeleteFileResponse> {
        files::Entity::delete_by_id(file_id)
            .exec(db)
            .await
            .map_err(AppError::from)?;

        info!(file_id, "file metadata deleted");
        Ok(DeleteFileResponse {
            message: "File deleted successfully".to_string(),
        })
    }
}

// ============ Storage Stats Use Case ============

pub struct StorageStatsUseCase;

impl StorageStatsUseCase {
    /// Sums the size labels of everything the caller can see against the
    /// flat quota. Usage is derived, not metered.
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(db: &DatabaseConnection, caller: Caller) -> AppResult<StorageStatsResponse> {
        let rows = visible_files(db, caller).await?;
        let used: f64 = rows.iter().map(|f| parse_size_bytes(&f.size)).sum();

        Ok(StorageStatsResponse {
            used,
            total: STORAGE_QUOTA_BYTES,
            used_formatted: format_bytes(used),
            total_formatted: "5 GB".to_string(),
        })
    }
}
