use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use application::tasks::{
    dtos::{CreateTaskRequest, UpdateTaskRequest},
    use_cases::{CreateTaskUseCase, DeleteTaskUseCase, ListTasksUseCase, UpdateTaskUseCase},
};
use sea_orm::DatabaseConnection;

#[post("/tasks")]
pub async fn create_task(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    req: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, HttpAppError> {
    let task = CreateTaskUseCase::execute(db.get_ref(), user.caller(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

#[get("/tasks")]
pub async fn list_tasks(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let tasks = ListTasksUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

#[patch("/tasks/{id}")]
pub async fn update_task(
    _user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    req: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, HttpAppError> {
    let task = UpdateTaskUseCase::execute(db.get_ref(), path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

#[delete("/tasks/{id}")]
pub async fn delete_task(
    _user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<impl Responder, HttpAppError> {
    let response = DeleteTaskUseCase::execute(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
