use crate::users::UserSummary;
use serde::{Deserialize, Serialize};
use tutorhub_core::entities::events;
use validator::Validate;

// ============ Requests ============

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1-200 characters"))]
    pub title: String,
    #[validate(custom(function = "crate::calendar::validate_date_format"))]
    pub date: String,
    #[validate(custom(function = "crate::calendar::validate_time_format"))]
    pub time: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    /// Filled from the caller's claims when the caller is the tutor.
    #[serde(default)]
    pub tutor_id: Option<i32>,
    /// Filled from the caller's claims when the caller is the student.
    #[serde(default)]
    pub student_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title must be between 1-200 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "crate::calendar::validate_date_format"))]
    pub date: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "crate::calendar::validate_time_format"))]
    pub time: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub tutor_id: Option<i32>,
    #[serde(default)]
    pub student_id: Option<i32>,
}

// ============ Responses ============

#[derive(Debug, Serialize, Deserialize)]
pub struct EventDto {
    pub id: i32,
    pub title: String,
    pub date: String,
    pub time: String,
    pub color: Option<String>,
    pub tutor_id: i32,
    pub student_id: i32,
    pub subject: Option<String>,
    pub payment_pending: bool,
    pub transaction_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutor: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<UserSummary>,
}

impl EventDto {
    pub fn from_model(model: events::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            date: model.date,
            time: model.time,
            color: model.color,
            tutor_id: model.tutor_id,
            student_id: model.student_id,
            subject: model.subject,
            payment_pending: model.payment_pending,
            transaction_id: model.transaction_id,
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
pub struct DeleteEventResponse {
    pub message: String,
}
