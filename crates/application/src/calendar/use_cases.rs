use crate::calendar::dtos::*;
use crate::connections::{counterparty_ids, is_connected};
use crate::finance::reconcile::create_pending_for_event;
use crate::users::use_cases::load_user_summaries;
use crate::{AppError, AppResult, Caller};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument, warn};
use tutorhub_core::entities::events;
use tutorhub_core::lesson_time;
use validator::Validate;

#[cfg(test)]
#[path = "use_cases_test.rs"]
mod tests;

const NOT_CONNECTED_MESSAGE: &str = "Tutor and student must be connected to schedule lessons";

// ============ Create Event Use Case ============

pub struct CreateEventUseCase;

impl CreateEventUseCase {
    #[instrument(skip(db, req), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        req: CreateEventRequest,
    ) -> AppResult<EventDto> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let (tutor_id, student_id) = caller.resolve_pair(req.tutor_id, req.student_id)?;
        if !is_connected(db, tutor_id, student_id).await? {
            return Err(AppError::Validation(NOT_CONNECTED_MESSAGE.to_string()));
        }

        let event = events::ActiveModel {
            title: Set(req.title),
            date: Set(req.date),
            time: Set(req.time),
            color: Set(req.color),
            tutor_id: Set(tutor_id),
            student_id: Set(student_id),
            subject: Set(req.subject),
            payment_pending: Set(false),
            transaction_id: Set(None),
            ..Default::default()
        };
        let mut event = event.insert(db).await.map_err(AppError::from)?;

        // Billing is best-effort; the lesson stands even when the
        // transaction insert fails, and the backfill pass catches it later.
        match create_pending_for_event(db, &event).await {
            Ok(linked) => event = linked,
            Err(e) => warn!(
                event_id = event.id,
                "could not create billing transaction for lesson: {}", e
            ),
        }

        info!(event_id = event.id, tutor_id, student_id, "lesson scheduled");
        Ok(EventDto::from_model(event))
    }
}

// ============ List Events Use Case ============

pub struct ListEventsUseCase;

impl ListEventsUseCase {
    /// Lessons the caller shares with their approved counterparties, in
    /// chronological order. "3:00 PM" sorts after "10:00 AM" on the same
    /// day, which a plain string sort on the time column gets wrong.
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(db: &DatabaseConnection, caller: Caller) -> AppResult<Vec<EventDto>> {
        let others = counterparty_ids(db, caller).await?;
        if others.is_empty() {
            return Ok(Vec::new());
        }

        let query = if caller.is_tutor() {
            events::Entity::find()
                .filter(events::Column::TutorId.eq(caller.user_id))
                .filter(events::Column::StudentId.is_in(others))
        } else {
            events::Entity::find()
                .filter(events::Column::StudentId.eq(caller.user_id))
                .filter(events::Column::TutorId.is_in(others))
        };

        let mut rows = query
            .order_by_asc(events::Column::Date)
            .all(db)
            .await
            .map_err(AppError::from)?;
        rows.sort_by_cached_key(|e| lesson_time::sort_key(&e.date, &e.time));

        let counterparty = |e: &events::Model| {
            if caller.is_tutor() {
                e.student_id
            } else {
                e.tutor_id
            }
        };
        let summaries = load_user_summaries(db, rows.iter().map(counterparty)).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let other = summaries.get(&counterparty(&row)).cloned();
                let dto = EventDto::from_model(row);
                if caller.is_tutor() {
                    dto.with_student(other)
                } else {
                    dto.with_tutor(other)
                }
            })
            .collect())
    }
}

// ============ Update Event Use Case ============

pub struct UpdateEventUseCase;

impl UpdateEventUseCase {
    /// Tutors may edit only their own lessons. A connected student may edit
    /// lessons shared with them, matching how a reschedule request from
    /// either side lands on the same row.
    #[instrument(skip(db, req), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        event_id: i32,
        req: UpdateEventRequest,
    ) -> AppResult<EventDto> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let (tutor_id, student_id) = caller.resolve_pair(req.tutor_id, req.student_id)?;
        if !is_connected(db, tutor_id, student_id).await? {
            return Err(AppError::Validation(NOT_CONNECTED_MESSAGE.to_string()));
        }

        let event = events::Entity::find_by_id(event_id)
            .one(db)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if caller.is_tutor() && event.tutor_id != caller.user_id {
            return Err(AppError::Authorization(
                "You can only edit your own lessons".to_string(),
            ));
        }

        let mut active: events::ActiveModel = event.into();
        if let Some(title) = req.title {
            active.title = Set(title);
        }
        if let Some(date) = req.date {
            active.date = Set(date);
        }
        if let Some(time) = req.time {
            active.time = Set(time);
        }
        if let Some(color) = req.color {
            active.color = Set(Some(color));
        }
        if let Some(subject) = req.subject {
            active.subject = Set(Some(subject));
        }
        active.tutor_id = Set(tutor_id);
        active.student_id = Set(student_id);
        let updated = active.update(db).await.map_err(AppError::from)?;

        info!(event_id, "lesson updated");

        let mut summaries = load_user_summaries(db, [updated.tutor_id, updated.student_id]).await?;
        let (tutor, student) = (
            summaries.remove(&updated.tutor_id),
            summaries.remove(&updated.student_id),
        );
        Ok(EventDto::from_model(updated)
            .with_tutor(tutor)
            .with_student(student))
    }
}

// ============ Delete Event Use Case ============

pub struct DeleteEventUseCase;

impl DeleteEventUseCase {
    /// Deleting an id that is already gone reports success, so a double
    /// click on the frontend never surfaces an error.
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        event_id: i32,
        recurring: bool,
    ) -> AppResult<DeleteEventResponse> {
        if !caller.is_tutor() {
            return Err(AppError::Authorization(
                "Only tutors can delete lessons".to_string(),
            ));
        }

        let event = match events::Entity::find_by_id(event_id)
            .one(db)
            .await
            .map_err(AppError::from)?
        {
            Some(event) => event,
            None => {
                return Ok(DeleteEventResponse {
                    message: "Event already deleted".to_string(),
                })
            }
        };

        if event.tutor_id != caller.user_id {
            return Err(AppError::Authorization(
                "You can only delete your own lessons".to_string(),
            ));
        }

        if recurring {
            Self::remove_recurring(db, &event).await?;
            Ok(DeleteEventResponse {
                message: "Recurring events deleted successfully".to_string(),
            })
        } else {
            events::Entity::delete_by_id(event.id)
                .exec(db)
                .await
                .map_err(AppError::from)?;
            info!(event_id, "lesson deleted");
            Ok(DeleteEventResponse {
                message: "Event deleted successfully".to_string(),
            })
        }
    }

    /// Removes every lesson in the weekly series anchored at `reference`:
    /// same pair, same time slot, same weekday, on or after the anchor date.
    async fn remove_recurring(db: &DatabaseConnection, reference: &events::Model) -> AppResult<()> {
        let anchor_weekday = match lesson_time::weekday_of(&reference.date) {
            Ok(weekday) => weekday,
            // Unparseable anchor date means no series to match against.
            Err(_) => return Ok(()),
        };

        let candidates = events::Entity::find()
            .filter(events::Column::TutorId.eq(reference.tutor_id))
            .filter(events::Column::StudentId.eq(reference.student_id))
            .filter(events::Column::Time.eq(reference.time.clone()))
            .filter(events::Column::Date.gte(reference.date.clone()))
            .all(db)
            .await
            .map_err(AppError::from)?;

        let ids: Vec<i32> = candidates
            .iter()
            .filter(|e| {
                lesson_time::weekday_of(&e.date)
                    .map(|w| w == anchor_weekday)
                    .unwrap_or(false)
            })
            .map(|e| e.id)
            .collect();
        if ids.is_empty() {
            return Ok(());
        }

        let deleted = events::Entity::delete_many()
            .filter(events::Column::Id.is_in(ids))
            .exec(db)
            .await
            .map_err(AppError::from)?;
        info!(
            event_id = reference.id,
            deleted = deleted.rows_affected,
            "recurring lessons deleted"
        );
        Ok(())
    }
}
