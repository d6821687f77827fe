use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use application::calendar::{
    dtos::{CreateEventRequest, UpdateEventRequest},
    use_cases::{CreateEventUseCase, DeleteEventUseCase, ListEventsUseCase, UpdateEventUseCase},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct DeleteEventQuery {
    /// When true, deletes the whole weekly series the event belongs to.
    #[serde(default)]
    pub recurring: bool,
}

#[post("/calendar")]
pub async fn create_event(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    req: web::Json<CreateEventRequest>,
) -> Result<impl Responder, HttpAppError> {
    let event = CreateEventUseCase::execute(db.get_ref(), user.caller(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(event))
}

#[get("/calendar")]
pub async fn list_events(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let events = ListEventsUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(events))
}

#[put("/calendar/{id}")]
pub async fn update_event(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    req: web::Json<UpdateEventRequest>,
) -> Result<impl Responder, HttpAppError> {
    let event = UpdateEventUseCase::execute(
        db.get_ref(),
        user.caller(),
        path.into_inner(),
        req.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(event))
}

#[delete("/calendar/{id}")]
pub async fn delete_event(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    query: web::Query<DeleteEventQuery>,
) -> Result<impl Responder, HttpAppError> {
    let response = DeleteEventUseCase::execute(
        db.get_ref(),
        user.caller(),
        path.into_inner(),
        query.recurring,
    )
    .await?;
    Ok(HttpResponse::Ok().json(response))
}
