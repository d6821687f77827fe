use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use application::files::{
    dtos::CreateFileRequest,
    use_cases::{CreateFileUseCase, DeleteFileUseCase, ListFilesUseCase, StorageStatsUseCase},
};
use sea_orm::DatabaseConnection;

#[post("/files")]
pub async fn create_file(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    req: web::Json<CreateFileRequest>,
) -> Result<impl Responder, HttpAppError> {
    let file = CreateFileUseCase::execute(db.get_ref(), user.caller(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(file))
}

#[get("/files")]
pub async fn list_files(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let files = ListFilesUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(files))
}

#[get("/files/storage")]
pub async fn storage_stats(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let stats = StorageStatsUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[delete("/files/{id}")]
pub async fn delete_file(
    _user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<impl Responder, HttpAppError> {
    let response = DeleteFileUseCase::execute(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
