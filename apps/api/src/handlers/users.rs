use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use application::users::{
    dtos::{CreateStudentRequest, UpdateNameRequest},
    use_cases::{
        CreateStudentUseCase, DeleteAccountUseCase, GetCodeUseCase, ListStudentsUseCase,
        UpdateNameUseCase,
    },
};
use sea_orm::DatabaseConnection;

#[get("/users/code")]
pub async fn get_code(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let response = GetCodeUseCase::execute(db.get_ref(), user.sub).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/users/students")]
pub async fn list_students(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let students = ListStudentsUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(students))
}

#[post("/users/students")]
pub async fn create_student(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    req: web::Json<CreateStudentRequest>,
) -> Result<impl Responder, HttpAppError> {
    let student =
        CreateStudentUseCase::execute(db.get_ref(), user.caller(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(student))
}

#[put("/users/profile/name")]
pub async fn update_name(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    req: web::Json<UpdateNameRequest>,
) -> Result<impl Responder, HttpAppError> {
    let updated = UpdateNameUseCase::execute(db.get_ref(), user.sub, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/users/profile")]
pub async fn delete_account(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let response = DeleteAccountUseCase::execute(db.get_ref(), user.sub).await?;
    Ok(HttpResponse::Ok().json(response))
}
