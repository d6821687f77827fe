use crate::users::UserSummary;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use tutorhub_core::entities::files;
use validator::Validate;

// ============ Requests ============

/// Metadata for an uploaded file. The bytes themselves live elsewhere;
/// only the descriptor is stored.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateFileRequest {
    #[validate(length(min = 1, max = 255, message = "File name must be between 1-255 characters"))]
    pub name: String,
    /// Kind label such as "document", "video" or "image".
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50, message = "File type must be between 1-50 characters"))]
    pub file_type: String,
    /// Human-readable size label, e.g. "2.5 MB".
    #[validate(length(min = 1, message = "File size is required"))]
    pub size: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    /// Target student, or None to share with every connected student.
    #[serde(default)]
    pub assigned_to_id: Option<i32>,
}

// ============ Responses ============

#[derive(Debug, Serialize, Deserialize)]
pub struct FileDto {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: String,
    pub url: Option<String>,
    pub subject: Option<String>,
    pub uploaded_by_id: i32,
    pub assigned_to_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserSummary>,
}

impl FileDto {
    pub fn from_model(model: files::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            file_type: model.file_type,
            size: model.size,
            url: model.url,
            subject: model.subject,
            uploaded_by_id: model.uploaded_by_id,
            assigned_to_id: model.assigned_to_id,
            created_at: model.created_at,
            uploaded_by: None,
            assigned_to: None,
        }
    }

    pub fn with_uploaded_by(mut self, user: Option<UserSummary>) -> Self {
        self.uploaded_by = user;
        self
    }

    pub fn with_assigned_to(mut self, user: Option<UserSummary>) -> Self {
        self.assigned_to = user;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageStatsResponse {
    /// Bytes used, summed from the size labels of visible files.
    pub used: f64,
    /// Quota in bytes.
    pub total: f64,
    pub used_formatted: String,
    pub total_formatted: String,
}
