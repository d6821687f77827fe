//! Approved-connection checks. Every cross-user feature calls through
//! here before touching lessons, money, messages, files, progress or
//! tasks, so a pending or rejected pair sees nothing of each other.

use crate::{AppError, AppResult, Caller};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tutorhub_core::entities::connections::{self, ConnectionStatus};

/// True when the pair holds an approved connection.
pub async fn is_connected(
    db: &DatabaseConnection,
    tutor_id: i32,
    student_id: i32,
) -> AppResult<bool> {
    let found = connections::Entity::find()
        .filter(connections::Column::TutorId.eq(tutor_id))
        .filter(connections::Column::StudentId.eq(student_id))
        .filter(connections::Column::Status.eq(ConnectionStatus::Approved))
        .one(db)
        .await
        .map_err(AppError::from)?;
    Ok(found.is_some())
}

/// Ids of everyone the caller holds an approved connection with:
/// student ids for a tutor, tutor ids for a student.
pub async fn counterparty_ids(db: &DatabaseConnection, caller: Caller) -> AppResult<Vec<i32>> {
    let query = if caller.is_tutor() {
        connections::Entity::find().filter(connections::Column::TutorId.eq(caller.user_id))
    } else {
        connections::Entity::find().filter(connections::Column::StudentId.eq(caller.user_id))
    };

    let conns = query
        .filter(connections::Column::Status.eq(ConnectionStatus::Approved))
        .all(db)
        .await
        .map_err(AppError::from)?;

    Ok(conns
        .iter()
        .map(|c| {
            if caller.is_tutor() {
                c.student_id
            } else {
                c.tutor_id
            }
        })
        .collect())
}
