use super::dtos::ConnectionDto;
use crate::users::use_cases::load_user_summaries;
use crate::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, instrument};
use tutorhub_core::entities::connections::{self, ConnectionStatus};

pub struct RespondConnectionUseCase;

impl RespondConnectionUseCase {
    /// Approves or rejects a pending request. Only the recipient may
    /// respond; the requester approving their own request is refused.
    #[instrument(skip(db))]
    pub async fn execute(
        db: &DatabaseConnection,
        user_id: i32,
        connection_id: i32,
        approve: bool,
    ) -> AppResult<ConnectionDto> {
        let connection = connections::Entity::find_by_id(connection_id)
            .one(db)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("Connection request not found".to_string()))?;

        let is_recipient = (connection.tutor_id == user_id || connection.student_id == user_id)
            && connection.requested_by_id != user_id;
        if !is_recipient {
            let message = if approve {
                "You cannot approve this request"
            } else {
                "You cannot reject this request"
            };
            return Err(AppError::Authorization(message.to_string()));
        }

        let (tutor_id, student_id) = (connection.tutor_id, connection.student_id);
        let mut active: connections::ActiveModel = connection.into();
        active.status = Set(if approve {
            ConnectionStatus::Approved
        } else {
            ConnectionStatus::Rejected
        });
        let updated = active.update(db).await.map_err(AppError::from)?;

        info!(
            connection_id,
            approved = approve,
            "connection request resolved"
        );

        let mut summaries = load_user_summaries(db, [tutor_id, student_id]).await?;
        Ok(ConnectionDto::from_model(updated)
            .with_tutor(summaries.remove(&tutor_id))
            .with_student(summaries.remove(&student_id)))
    }
}
