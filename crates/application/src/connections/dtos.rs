use crate::users::UserSummary;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use tutorhub_core::entities::connections::{self, ConnectionStatus};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RequestConnectionRequest {
    #[validate(length(min = 1, message = "Connection code is required"))]
    pub code: String,
}

/// Connection row with the relevant party embedded. List endpoints attach
/// only the counterparty; approval responses carry both sides.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectionDto {
    pub id: i32,
    pub tutor_id: i32,
    pub student_id: i32,
    pub status: ConnectionStatus,
    pub requested_by_id: i32,
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutor: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<UserSummary>,
}

impl ConnectionDto {
    pub fn from_model(model: connections::Model) -> Self {
        Self {
            id: model.id,
            tutor_id: model.tutor_id,
            student_id: model.student_id,
            status: model.status,
            requested_by_id: model.requested_by_id,
            created_at: model.created_at,
            tutor: None,
            student: None,
        }
    }

    pub fn with_tutor(mut self, tutor: Option<UserSummary>) -> Self {
        self.tutor = tutor;
        self
    }

    pub fn with_student(mut self, student: Option<UserSummary>) -> Self {
        self.student = student;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RejectConnectionResponse {
    pub message: String,
}
