use crate::users::UserSummary;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use tutorhub_core::entities::tasks;
use validator::Validate;

fn default_status() -> String {
    "pending".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}

// ============ Requests ============

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    /// Workflow state, e.g. "pending", "in_progress", "completed".
    #[serde(default = "default_status")]
    pub status: String,
    /// "low", "medium" or "high".
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub assigned_to_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title must be between 1-200 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub assigned_to_id: Option<i32>,
}

// ============ Responses ============

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: String,
    pub priority: String,
    pub user_id: i32,
    pub assigned_to_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserSummary>,
}

impl TaskDto {
    pub fn from_model(model: tasks::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            due_date: model.due_date,
            status: model.status,
            priority: model.priority,
            user_id: model.user_id,
            assigned_to_id: model.assigned_to_id,
            created_at: model.created_at,
            user: None,
            assigned_to: None,
        }
    }

    pub fn with_user(mut self, user: Option<UserSummary>) -> Self {
        self.user = user;
        self
    }

    pub fn with_assigned_to(mut self, user: Option<UserSummary>) -> Self {
        self.assigned_to = user;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub message: String,
}
