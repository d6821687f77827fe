use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use tutorhub_core::entities::messages;
use validator::Validate;

// ============ Requests ============

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub receiver_id: i32,
    #[validate(length(min = 1, message = "Message text must not be empty"))]
    pub text: String,
}

// ============ Responses ============

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: i32,
    pub text: String,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub read: bool,
    pub created_at: DateTimeWithTimeZone,
}

impl From<messages::Model> for MessageDto {
    fn from(model: messages::Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            sender_id: model.sender_id,
            receiver_id: model.receiver_id,
            read: model.read,
            created_at: model.created_at,
        }
    }
}

/// One row in the conversation overview, newest conversation first.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationDto {
    /// Counterparty user id.
    pub id: i32,
    pub name: String,
    pub last_message: String,
    /// Relative label such as "5m ago".
    pub time: String,
    /// Messages from this counterparty the caller has not read.
    pub unread: u64,
    /// Initials placeholder, e.g. "AL".
    pub avatar: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub message: String,
}
