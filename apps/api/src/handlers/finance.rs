use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{get, post, put, web, HttpResponse, Responder};
use application::finance::{
    dtos::CreateTransactionRequest,
    use_cases::{
        ClearHistoryUseCase, ConfirmPaymentUseCase, CreateTransactionUseCase, FinanceStatsUseCase,
        ListTransactionsUseCase,
    },
};
use sea_orm::DatabaseConnection;

#[post("/finance")]
pub async fn create_transaction(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    req: web::Json<CreateTransactionRequest>,
) -> Result<impl Responder, HttpAppError> {
    let transaction =
        CreateTransactionUseCase::execute(db.get_ref(), user.caller(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(transaction))
}

#[get("/finance")]
pub async fn list_transactions(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let transactions = ListTransactionsUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(transactions))
}

#[get("/finance/stats")]
pub async fn finance_stats(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let stats = FinanceStatsUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[put("/finance/{id}/confirm")]
pub async fn confirm_payment(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<impl Responder, HttpAppError> {
    let transaction =
        ConfirmPaymentUseCase::execute(db.get_ref(), user.caller(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(transaction))
}

#[put("/finance/history")]
pub async fn clear_history(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let response = ClearHistoryUseCase::execute(db.get_ref(), user.caller()).await?;
    Ok(HttpResponse::Ok().json(response))
}
