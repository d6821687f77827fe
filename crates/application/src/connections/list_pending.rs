use super::dtos::ConnectionDto;
use crate::users::use_cases::load_user_summaries;
use crate::{AppError, AppResult, Caller};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::instrument;
use tutorhub_core::entities::connections::{self, ConnectionStatus};

pub struct ListPendingRequestsUseCase;

impl ListPendingRequestsUseCase {
    /// Requests awaiting the caller's decision, newest first. Requests the
    /// caller sent themselves are excluded; those show up for the other side.
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(db: &DatabaseConnection, caller: Caller) -> AppResult<Vec<ConnectionDto>> {
        let query = if caller.is_tutor() {
            connections::Entity::find().filter(connections::Column::TutorId.eq(caller.user_id))
        } else {
            connections::Entity::find().filter(connections::Column::StudentId.eq(caller.user_id))
        };

        let rows = query
            .filter(connections::Column::Status.eq(ConnectionStatus::Pending))
            .filter(connections::Column::RequestedById.ne(caller.user_id))
            .order_by_desc(connections::Column::CreatedAt)
            .all(db)
            .await
            .map_err(AppError::from)?;

        let counterparty = |c: &connections::Model| {
            if caller.is_tutor() {
                c.student_id
            } else {
                c.tutor_id
            }
        };

        let summaries = load_user_summaries(db, rows.iter().map(counterparty)).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let other = summaries.get(&counterparty(&row)).cloned();
                let dto = ConnectionDto::from_model(row);
                if caller.is_tutor() {
                    dto.with_student(other)
                } else {
                    dto.with_tutor(other)
                }
            })
            .collect())
    }
}
