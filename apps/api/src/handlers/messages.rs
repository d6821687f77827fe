use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{get, post, web, HttpResponse, Responder};
use application::messages::{
    dtos::SendMessageRequest,
    use_cases::{
        GetConversationUseCase, ListConversationsUseCase, MarkMessagesReadUseCase,
        SendMessageUseCase,
    },
};
use sea_orm::DatabaseConnection;

#[post("/messages")]
pub async fn send_message(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    req: web::Json<SendMessageRequest>,
) -> Result<impl Responder, HttpAppError> {
    let message =
        SendMessageUseCase::execute(db.get_ref(), user.caller(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(message))
}

#[get("/messages/conversations")]
pub async fn list_conversations(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let conversations = ListConversationsUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(conversations))
}

#[get("/messages/conversation/{other_user_id}")]
pub async fn get_conversation(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<impl Responder, HttpAppError> {
    let messages =
        GetConversationUseCase::execute(db.get_ref(), user.caller(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[post("/messages/{sender_id}/read")]
pub async fn mark_read(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<impl Responder, HttpAppError> {
    let response =
        MarkMessagesReadUseCase::execute(db.get_ref(), user.caller(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
