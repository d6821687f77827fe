use crate::connections::{counterparty_ids, is_connected};
use crate::progress::dtos::*;
use crate::users::use_cases::load_user_summaries;
use crate::{AppError, AppResult, Caller};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument};
use tutorhub_core::entities::progress;
use validator::Validate;

#[cfg(test)]
#[path = "use_cases_test.rs"]
mod tests;

// ============ Shared Lookups ============

pub(crate) async fn visible_progress(
    db: &DatabaseConnection,
    caller: Caller,
) -> AppResult<Vec<progress::Model>> {
    let others = counterparty_ids(db, caller).await?;
    if others.is_empty() {
        return Ok(Vec::new());
    }

    let query = if caller.is_tutor() {
        progress::Entity::find()
            .filter(progress::Column::TutorId.eq(caller.user_id))
            .filter(progress::Column::StudentId.is_in(others))
    } else {
        progress::Entity::find()
            .filter(progress::Column::StudentId.eq(caller.user_id))
            .filter(progress::Column::TutorId.is_in(others))
    };

    query
        .order_by_desc(progress::Column::CreatedAt)
        .all(db)
        .await
        .map_err(AppError::from)
}

// ============ Record Progress Use Case ============

pub struct RecordProgressUseCase;

impl RecordProgressUseCase {
    #[instrument(skip(db, req), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        req: CreateProgressRequest,
    ) -> AppResult<ProgressDto> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let (tutor_id, student_id) = caller.resolve_pair(req.tutor_id, req.student_id)?;
        if !is_connected(db, tutor_id, student_id).await? {
            return Err(AppError::Validation(
                "Can only track progress for connected students".to_string(),
            ));
        }

        let entry = progress::ActiveModel {
            subject: Set(req.subject),
            progress: Set(req.progress),
            grade: Set(req.grade),
            hours_studied: Set(req.hours_studied),
            lessons_completed: Set(req.lessons_completed),
            student_id: Set(student_id),
            tutor_id: Set(tutor_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let entry = entry.insert(db).await.map_err(AppError::from)?;

        info!(progress_id = entry.id, student_id, "progress recorded");
        Ok(ProgressDto::from_model(entry))
    }
}

// ============ List Progress Use Case ============

pub struct ListProgressUseCase;

impl ListProgressUseCase {
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(db: &DatabaseConnection, caller: Caller) -> AppResult<Vec<ProgressDto>> {
        let rows = visible_progress(db, caller).await?;

        let counterparty = |p: &progress::Model| {
            if caller.is_tutor() {
                p.student_id
            } else {
                p.tutor_id
            }
        };
        let summaries = load_user_summaries(db, rows.iter().map(counterparty)).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let other = summaries.get(&counterparty(&row)).cloned();
                let dto = ProgressDto::from_model(row);
                if caller.is_tutor() {
                    dto.with_student(other)
                } else {
                    dto.with_tutor(other)
                }
            })
            .collect())
    }
}

// ============ Progress Stats Use Case ============

pub struct ProgressStatsUseCase;

impl ProgressStatsUseCase {
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
    ) -> AppResult<ProgressStatsResponse> {
        let rows = visible_progress(db, caller).await?;
        Ok(compute_overall_stats(&rows))
    }
}

/// Mean completion and summed hours over every visible row, rounded.
/// No rows means flat zeros rather than a division by zero.
pub(crate) fn compute_overall_stats(rows: &[progress::Model]) -> ProgressStatsResponse {
    if rows.is_empty() {
        return ProgressStatsResponse {
            overall_progress: 0,
            total_hours: 0,
        };
    }

    let progress_sum: f64 = rows.iter().map(|p| p.progress).sum();
    let hours_sum: f64 = rows.iter().map(|p| p.hours_studied).sum();
    ProgressStatsResponse {
        overall_progress: (progress_sum / rows.len() as f64).round() as i64,
        total_hours: hours_sum.round() as i64,
    }
}
