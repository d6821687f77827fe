use crate::users::UserSummary;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use tutorhub_core::entities::transactions::{self, TransactionStatus};
use validator::Validate;

// ============ Requests ============

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    #[validate(range(min = 0.0, message = "Amount must not be negative"))]
    pub amount: f64,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub tutor_id: Option<i32>,
    #[serde(default)]
    pub student_id: Option<i32>,
    /// Lesson date the payment covers, YYYY-MM-DD.
    #[serde(default)]
    #[validate(custom(function = "crate::calendar::validate_date_format"))]
    pub due_date: Option<String>,
}

// ============ Responses ============

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionDto {
    pub id: i32,
    pub amount: f64,
    pub status: TransactionStatus,
    pub subject: Option<String>,
    pub tutor_id: i32,
    pub student_id: i32,
    pub due_date: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutor: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<UserSummary>,
}

impl TransactionDto {
    pub fn from_model(model: transactions::Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            status: model.status,
            subject: model.subject,
            tutor_id: model.tutor_id,
            student_id: model.student_id,
            due_date: model.due_date,
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

/// Rollup shown on the finance dashboard. Month windows open on the first
/// of the month, UTC.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FinanceStats {
    pub this_month: f64,
    pub last_month: f64,
    pub pending: f64,
    pub pending_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub message: String,
    pub deleted: u64,
}
