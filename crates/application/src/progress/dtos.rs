use crate::users::UserSummary;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use tutorhub_core::entities::progress;
use validator::Validate;

// ============ Requests ============

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateProgressRequest {
    #[validate(length(min = 1, max = 100, message = "Subject must be between 1-100 characters"))]
    pub subject: String,
    /// Completion percentage, 0-100.
    #[validate(range(min = 0.0, max = 100.0, message = "Progress must be between 0 and 100"))]
    pub progress: f64,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Hours studied must not be negative"))]
    pub hours_studied: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Lessons completed must not be negative"))]
    pub lessons_completed: i32,
    #[serde(default)]
    pub tutor_id: Option<i32>,
    #[serde(default)]
    pub student_id: Option<i32>,
}

// ============ Responses ============

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressDto {
    pub id: i32,
    pub subject: String,
    pub progress: f64,
    pub grade: Option<String>,
    pub hours_studied: f64,
    pub lessons_completed: i32,
    pub student_id: i32,
    pub tutor_id: i32,
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutor: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<UserSummary>,
}

impl ProgressDto {
    pub fn from_model(model: progress::Model) -> Self {
        Self {
            id: model.id,
            subject: model.subject,
            progress: model.progress,
            grade: model.grade,
            hours_studied: model.hours_studied,
            lessons_completed: model.lessons_completed,
            student_id: model.student_id,
            tutor_id: model.tutor_id,
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

/// Averages across every visible progress row, rounded to whole numbers
/// for the dashboard cards.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressStatsResponse {
    pub overall_progress: i64,
    pub total_hours: i64,
}
