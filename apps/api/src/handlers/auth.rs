use crate::config::Config;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{post, web, HttpResponse, Responder};
use application::auth::{
    dtos::{LoginRequest, RegisterRequest},
    use_cases::{AuthConfig, LoginUseCase, RegisterUseCase},
};
use sea_orm::DatabaseConnection;

#[post("/auth/register")]
pub async fn register(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    req: web::Json<RegisterRequest>,
) -> Result<impl Responder, HttpAppError> {
    let auth_config = AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        jwt_expiration: config.jwt_expiration,
    };

    let response = RegisterUseCase::execute(db.get_ref(), &auth_config, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/auth/login")]
pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<impl Responder, HttpAppError> {
    let auth_config = AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        jwt_expiration: config.jwt_expiration,
    };

    let response = LoginUseCase::execute(db.get_ref(), &auth_config, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
