use super::dtos::{ConnectionDto, RequestConnectionRequest};
use crate::{AppError, AppResult};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{info, instrument};
use tutorhub_core::entities::connections::{self, ConnectionStatus};
use tutorhub_core::entities::users::{self, Role};
use validator::Validate;

pub struct RequestConnectionUseCase;

impl RequestConnectionUseCase {
    #[instrument(skip(db, req))]
    pub async fn execute(
        db: &DatabaseConnection,
        requester_id: i32,
        req: RequestConnectionRequest,
    ) -> AppResult<ConnectionDto> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let requester = users::Entity::find_by_id(requester_id)
            .one(db)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("Requester not found".to_string()))?;

        let target = users::Entity::find()
            .filter(users::Column::Code.eq(req.code.as_str()))
            .one(db)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("User with this code not found".to_string()))?;

        if target.id == requester.id {
            return Err(AppError::Validation("Cannot connect to yourself".to_string()));
        }
        if target.role == requester.role {
            return Err(AppError::Validation(
                "Cannot connect to user with same role".to_string(),
            ));
        }

        let (tutor_id, student_id) = if requester.role == Role::Tutor {
            (requester.id, target.id)
        } else {
            (target.id, requester.id)
        };

        let existing = connections::Entity::find()
            .filter(connections::Column::TutorId.eq(tutor_id))
            .filter(connections::Column::StudentId.eq(student_id))
            .one(db)
            .await
            .map_err(AppError::from)?;

        if let Some(existing) = existing {
            return match existing.status {
                ConnectionStatus::Approved => {
                    Err(AppError::Conflict("Connection already exists".to_string()))
                }
                ConnectionStatus::Pending => Err(AppError::Conflict(
                    "Connection request already pending".to_string(),
                )),
                ConnectionStatus::Rejected => {
                    // Reopen the rejected row instead of inserting a second
                    // one, so the pair never accumulates duplicates.
                    let mut active: connections::ActiveModel = existing.into();
                    active.status = Set(ConnectionStatus::Pending);
                    active.requested_by_id = Set(requester_id);
                    let reopened = active.update(db).await.map_err(AppError::from)?;

                    info!(connection_id = reopened.id, "reopened rejected connection request");
                    Ok(ConnectionDto::from_model(reopened))
                }
            };
        }

        let connection = connections::ActiveModel {
            tutor_id: Set(tutor_id),
            student_id: Set(student_id),
            status: Set(ConnectionStatus::Pending),
            requested_by_id: Set(requester_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let connection = connection.insert(db).await.map_err(AppError::from)?;

        info!(connection_id = connection.id, tutor_id, student_id, "connection requested");
        Ok(ConnectionDto::from_model(connection))
    }
}
