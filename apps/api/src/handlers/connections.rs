use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{get, post, web, HttpResponse, Responder};
use application::connections::{
    dtos::{RejectConnectionResponse, RequestConnectionRequest},
    list_connections::ListConnectionsUseCase,
    list_pending::ListPendingRequestsUseCase,
    request_connection::RequestConnectionUseCase,
    respond_connection::RespondConnectionUseCase,
};
use sea_orm::DatabaseConnection;

#[post("/connections/request")]
pub async fn request_connection(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    req: web::Json<RequestConnectionRequest>,
) -> Result<impl Responder, HttpAppError> {
    let connection =
        RequestConnectionUseCase::execute(db.get_ref(), user.sub, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(connection))
}

#[get("/connections")]
pub async fn list_connections(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let connections = ListConnectionsUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(connections))
}

#[get("/connections/pending")]
pub async fn list_pending(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let pending = ListPendingRequestsUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(pending))
}

#[post("/connections/{id}/approve")]
pub async fn approve_connection(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<impl Responder, HttpAppError> {
    let connection =
        RespondConnectionUseCase::execute(db.get_ref(), user.sub, path.into_inner(), true).await?;
    Ok(HttpResponse::Ok().json(connection))
}

#[post("/connections/{id}/reject")]
pub async fn reject_connection(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<impl Responder, HttpAppError> {
    RespondConnectionUseCase::execute(db.get_ref(), user.sub, path.into_inner(), false).await?;
    Ok(HttpResponse::Ok().json(RejectConnectionResponse {
        message: "Connection request rejected".to_string(),
    }))
}
