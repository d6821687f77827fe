use crate::connections::{counterparty_ids, is_connected};
use crate::finance::dtos::*;
use crate::finance::reconcile::BackfillLessonBillingUseCase;
use crate::users::use_cases::load_user_summaries;
use crate::{AppError, AppResult, Caller};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument};
use tutorhub_core::entities::events;
use tutorhub_core::entities::transactions::{self, TransactionStatus};
use validator::Validate;

#[cfg(test)]
#[path = "use_cases_test.rs"]
mod tests;

// ============ Shared Lookups ============

/// Transactions visible to the caller: their own side of the ledger,
/// restricted to currently connected counterparties, newest first.
pub(crate) async fn visible_transactions(
    db: &DatabaseConnection,
    caller: Caller,
) -> AppResult<Vec<transactions::Model>> {
    let others = counterparty_ids(db, caller).await?;
    if others.is_empty() {
        return Ok(Vec::new());
    }

    let query = if caller.is_tutor() {
        transactions::Entity::find()
            .filter(transactions::Column::TutorId.eq(caller.user_id))
            .filter(transactions::Column::StudentId.is_in(others))
    } else {
        transactions::Entity::find()
            .filter(transactions::Column::StudentId.eq(caller.user_id))
            .filter(transactions::Column::TutorId.is_in(others))
    };

    query
        .order_by_desc(transactions::Column::CreatedAt)
        .all(db)
        .await
        .map_err(AppError::from)
}

// ============ Create Transaction Use Case ============

pub struct CreateTransactionUseCase;

impl CreateTransactionUseCase {
    #[instrument(skip(db, req), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        req: CreateTransactionRequest,
    ) -> AppResult<TransactionDto> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let (tutor_id, student_id) = caller.resolve_pair(req.tutor_id, req.student_id)?;
        if !is_connected(db, tutor_id, student_id).await? {
            return Err(AppError::Validation(
                "Can only create transactions with connected students".to_string(),
            ));
        }

        let transaction = transactions::ActiveModel {
            amount: Set(req.amount),
            status: Set(req.status.unwrap_or(TransactionStatus::Pending)),
            subject: Set(req.subject),
            tutor_id: Set(tutor_id),
            student_id: Set(student_id),
            due_date: Set(req.due_date),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let transaction = transaction.insert(db).await.map_err(AppError::from)?;

        info!(transaction_id = transaction.id, "transaction created");
        Ok(TransactionDto::from_model(transaction))
    }
}

// ============ List Transactions Use Case ============

pub struct ListTransactionsUseCase;

impl ListTransactionsUseCase {
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
    ) -> AppResult<Vec<TransactionDto>> {
        // Catch up on lessons that ended without a transaction before
        // showing the ledger.
        BackfillLessonBillingUseCase::execute(db, Utc::now().naive_utc()).await?;

        let rows = visible_transactions(db, caller).await?;

        let counterparty = |t: &transactions::Model| {
            if caller.is_tutor() {
                t.student_id
            } else {
                t.tutor_id
            }
        };
        let summaries = load_user_summaries(db, rows.iter().map(counterparty)).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let other = summaries.get(&counterparty(&row)).cloned();
                let dto = TransactionDto::from_model(row);
                if caller.is_tutor() {
                    dto.with_student(other)
                } else {
                    dto.with_tutor(other)
                }
            })
            .collect())
    }
}

// ============ Confirm Payment Use Case ============

pub struct ConfirmPaymentUseCase;

impl ConfirmPaymentUseCase {
    /// Marks a payment received and clears the pending flag on any lesson
    /// linked to it.
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        transaction_id: i32,
    ) -> AppResult<TransactionDto> {
        if !caller.is_tutor() {
            return Err(AppError::Authorization(
                "Only tutors can confirm payments".to_string(),
            ));
        }

        let transaction = transactions::Entity::find_by_id(transaction_id)
            .one(db)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        if transaction.tutor_id != caller.user_id {
            return Err(AppError::Authorization(
                "You can only confirm payments for your own transactions".to_string(),
            ));
        }

        let mut active: transactions::ActiveModel = transaction.into();
        active.status = Set(TransactionStatus::Completed);
        let updated = active.update(db).await.map_err(AppError::from)?;

        events::Entity::update_many()
            .col_expr(
                events::Column::PaymentPending,
                sea_orm::sea_query::Expr::value(false),
            )
            .filter(events::Column::TransactionId.eq(transaction_id))
            .exec(db)
            .await
            .map_err(AppError::from)?;

        info!(transaction_id, "payment confirmed");

        let mut summaries = load_user_summaries(db, [updated.tutor_id, updated.student_id]).await?;
        let (tutor, student) = (
            summaries.remove(&updated.tutor_id),
            summaries.remove(&updated.student_id),
        );
        Ok(TransactionDto::from_model(updated)
            .with_tutor(tutor)
            .with_student(student))
    }
}

// ============ Stats Use Case ============

pub struct FinanceStatsUseCase;

impl FinanceStatsUseCase {
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(db: &DatabaseConnection, caller: Caller) -> AppResult<FinanceStats> {
        BackfillLessonBillingUseCase::execute(db, Utc::now().naive_utc()).await?;

        let rows = visible_transactions(db, caller).await?;
        Ok(compute_stats(&rows, Utc::now()))
    }
}

/// Buckets transactions into the dashboard rollup. Completed amounts land
/// in the month their row was created, not the lesson's due date.
pub(crate) fn compute_stats(
    transactions: &[transactions::Model],
    now: DateTime<Utc>,
) -> FinanceStats {
    let (this_month_start, last_month_start) = month_bounds(now);

    let mut stats = FinanceStats {
        this_month: 0.0,
        last_month: 0.0,
        pending: 0.0,
        pending_count: 0,
    };
    for t in transactions {
        let created = t.created_at.with_timezone(&Utc);
        match t.status {
            TransactionStatus::Completed => {
                if created >= this_month_start {
                    stats.this_month += t.amount;
                } else if created >= last_month_start {
                    stats.last_month += t.amount;
                }
            }
            TransactionStatus::Pending => {
                stats.pending += t.amount;
                stats.pending_count += 1;
            }
        }
    }
    stats
}

/// Midnight UTC on the first of the current month and of the month before.
pub(crate) fn month_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let (last_year, last_month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    (
        month_start(now.year(), now.month()),
        month_start(last_year, last_month),
    )
}

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    // The first of a real month always exists; the fallback is unreachable.
    let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

// ============ Clear History Use Case ============

pub struct ClearHistoryUseCase;

impl ClearHistoryUseCase {
    /// Wipes the tutor's entire ledger. Lessons keep their transaction_id,
    /// so they are not re-billed by the backfill sweep.
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(db: &DatabaseConnection, caller: Caller) -> AppResult<ClearHistoryResponse> {
        if !caller.is_tutor() {
            return Err(AppError::Authorization(
                "Only tutors can clear finance history".to_string(),
            ));
        }

        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::TutorId.eq(caller.user_id))
            .exec(db)
            .await
            .map_err(AppError::from)?;

        info!(deleted = result.rows_affected, "finance history cleared");
        Ok(ClearHistoryResponse {
            message: "Finance history cleared".to_string(),
            deleted: result.rows_affected,
        })
    }
}
