//! Lesson billing. Every lesson is supposed to carry a pending
//! transaction from the moment it is scheduled; this module owns both
//! that link and the sweep that repairs lessons which missed it.

use crate::connections::is_connected;
use crate::{AppError, AppResult};
use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{debug, instrument, warn};
use tutorhub_core::entities::events;
use tutorhub_core::entities::transactions::{self, TransactionStatus};
use tutorhub_core::lesson_time;

/// Creates the pending transaction for a lesson and links the two rows.
/// Amount starts at zero; the tutor sets the fee on their side later.
pub(crate) async fn create_pending_for_event(
    db: &DatabaseConnection,
    event: &events::Model,
) -> AppResult<events::Model> {
    let transaction = transactions::ActiveModel {
        amount: Set(0.0),
        status: Set(TransactionStatus::Pending),
        subject: Set(Some(
            event.subject.clone().unwrap_or_else(|| event.title.clone()),
        )),
        tutor_id: Set(event.tutor_id),
        student_id: Set(event.student_id),
        due_date: Set(Some(event.date.clone())),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    let transaction = transaction.insert(db).await.map_err(AppError::from)?;

    let mut active: events::ActiveModel = event.clone().into();
    active.transaction_id = Set(Some(transaction.id));
    active.payment_pending = Set(true);
    let linked = active.update(db).await.map_err(AppError::from)?;
    Ok(linked)
}

pub struct BackfillLessonBillingUseCase;

impl BackfillLessonBillingUseCase {
    /// Sweeps lessons with no linked transaction whose hour has fully
    /// passed by `now`, and bills each one. Runs ahead of every finance
    /// listing so the ledger is complete by the time anyone reads it.
    /// Returns the number of lessons billed.
    ///
    /// A lesson is swept only while its pair is still connected; lessons
    /// from severed pairs stay unbilled rather than charging a student
    /// who can no longer see the tutor.
    #[instrument(skip(db))]
    pub async fn execute(db: &DatabaseConnection, now: NaiveDateTime) -> AppResult<u32> {
        let unbilled = events::Entity::find()
            .filter(events::Column::TransactionId.is_null())
            .all(db)
            .await
            .map_err(AppError::from)?;

        let mut created = 0;
        for event in unbilled {
            let ended = match lesson_time::is_past_end(&event.date, &event.time, now) {
                Ok(ended) => ended,
                Err(e) => {
                    warn!(
                        event_id = event.id,
                        "skipping lesson with bad date or time: {}", e
                    );
                    continue;
                }
            };
            if !ended {
                continue;
            }

            match is_connected(db, event.tutor_id, event.student_id).await {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!(event_id = event.id, "connection check failed: {}", e);
                    continue;
                }
            }

            match create_pending_for_event(db, &event).await {
                Ok(_) => created += 1,
                Err(e) => warn!(event_id = event.id, "backfill failed for lesson: {}", e),
            }
        }

        if created > 0 {
            debug!(created, "backfilled lesson transactions");
        }
        Ok(created)
    }
}
