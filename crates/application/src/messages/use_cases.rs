use crate::connections::{counterparty_ids, is_connected};
use crate::messages::dtos::*;
use crate::messages::format::{format_relative_time, initials};
use crate::users::use_cases::load_user_summaries;
use crate::{AppError, AppResult, Caller};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;
use tracing::{info, instrument};
use tutorhub_core::entities::messages;
use validator::Validate;

// ============ Send Message Use Case ============

pub struct SendMessageUseCase;

impl SendMessageUseCase {
    #[instrument(skip(db, req), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        req: SendMessageRequest,
    ) -> AppResult<MessageDto> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let (tutor_id, student_id) = caller.pair_with(req.receiver_id);
        if !is_connected(db, tutor_id, student_id).await? {
            return Err(AppError::Validation(
                "Can only message connected users".to_string(),
            ));
        }

        let message = messages::ActiveModel {
            text: Set(req.text),
            sender_id: Set(caller.user_id),
            receiver_id: Set(req.receiver_id),
            read: Set(false),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let message = message.insert(db).await.map_err(AppError::from)?;

        info!(message_id = message.id, receiver_id = req.receiver_id, "message sent");
        Ok(MessageDto::from(message))
    }
}

// ============ List Conversations Use Case ============

pub struct ListConversationsUseCase;

impl ListConversationsUseCase {
    /// One entry per counterparty with message traffic, ordered by the
    /// newest message. Unread counts come from the same scan, so the
    /// overview costs two queries regardless of conversation count.
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(db: &DatabaseConnection, caller: Caller) -> AppResult<Vec<ConversationDto>> {
        let others = counterparty_ids(db, caller).await?;
        if others.is_empty() {
            return Ok(Vec::new());
        }

        let rows = messages::Entity::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(messages::Column::SenderId.eq(caller.user_id))
                            .add(messages::Column::ReceiverId.is_in(others.clone())),
                    )
                    .add(
                        Condition::all()
                            .add(messages::Column::ReceiverId.eq(caller.user_id))
                            .add(messages::Column::SenderId.is_in(others)),
                    ),
            )
            .order_by_desc(messages::Column::CreatedAt)
            .order_by_desc(messages::Column::Id)
            .all(db)
            .await
            .map_err(AppError::from)?;

        // First sighting of a counterparty in the DESC scan is their
        // newest message.
        let mut order: Vec<i32> = Vec::new();
        let mut latest: HashMap<i32, &messages::Model> = HashMap::new();
        let mut unread: HashMap<i32, u64> = HashMap::new();
        for message in &rows {
            let other = if message.sender_id == caller.user_id {
                message.receiver_id
            } else {
                message.sender_id
            };
            if !latest.contains_key(&other) {
                order.push(other);
                latest.insert(other, message);
            }
            if message.receiver_id == caller.user_id && !message.read {
                *unread.entry(other).or_insert(0) += 1;
            }
        }

        let summaries = load_user_summaries(db, order.iter().copied()).await?;
        let now = Utc::now();

        Ok(order
            .into_iter()
            .filter_map(|other| {
                let message = latest.get(&other)?;
                let user = summaries.get(&other)?;
                Some(ConversationDto {
                    id: other,
                    name: user.name.clone(),
                    last_message: message.text.clone(),
                    time: format_relative_time(message.created_at.with_timezone(&Utc), now),
                    unread: unread.get(&other).copied().unwrap_or(0),
                    avatar: initials(&user.name),
                })
            })
            .collect())
    }
}

// ============ Get Conversation Use Case ============

pub struct GetConversationUseCase;

impl GetConversationUseCase {
    /// Full history with one counterparty, oldest first.
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        other_user_id: i32,
    ) -> AppResult<Vec<MessageDto>> {
        let (tutor_id, student_id) = caller.pair_with(other_user_id);
        if !is_connected(db, tutor_id, student_id).await? {
            return Err(AppError::Validation(
                "Can only view messages with connected users".to_string(),
            ));
        }

        let rows = messages::Entity::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(messages::Column::SenderId.eq(caller.user_id))
                            .add(messages::Column::ReceiverId.eq(other_user_id)),
                    )
                    .add(
                        Condition::all()
                            .add(messages::Column::SenderId.eq(other_user_id))
                            .add(messages::Column::ReceiverId.eq(caller.user_id)),
                    ),
            )
            .order_by_asc(messages::Column::CreatedAt)
            .order_by_asc(messages::Column::Id)
            .all(db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(MessageDto::from).collect())
    }
}

// ============ Mark Read Use Case ============

pub struct MarkMessagesReadUseCase;

impl MarkMessagesReadUseCase {
    /// Marks everything a counterparty sent the caller as read.
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        sender_id: i32,
    ) -> AppResult<MarkReadResponse> {
        messages::Entity::update_many()
            .col_expr(messages::Column::Read, Expr::value(true))
            .filter(messages::Column::SenderId.eq(sender_id))
            .filter(messages::Column::ReceiverId.eq(caller.user_id))
            .filter(messages::Column::Read.eq(false))
            .exec(db)
            .await
            .map_err(AppError::from)?;

        Ok(MarkReadResponse {
            message: "Messages marked as read".to_string(),
        })
    }
}
