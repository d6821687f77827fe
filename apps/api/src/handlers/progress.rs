use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{get, post, web, HttpResponse, Responder};
use application::progress::{
    dtos::CreateProgressRequest,
    use_cases::{ListProgressUseCase, ProgressStatsUseCase, RecordProgressUseCase},
};
use sea_orm::DatabaseConnection;

#[post("/progress")]
pub async fn record_progress(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    req: web::Json<CreateProgressRequest>,
) -> Result<impl Responder, HttpAppError> {
    let entry =
        RecordProgressUseCase::execute(db.get_ref(), user.caller(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(entry))
}

#[get("/progress")]
pub async fn list_progress(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let entries = ListProgressUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[get("/progress/stats")]
pub async fn progress_stats(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let stats = ProgressStatsUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(stats))
}
