use crate::connections::{counterparty_ids, is_connected};
use crate::tasks::dtos::*;
use crate::users::use_cases::load_user_summaries;
use crate::{AppError, AppResult, Caller};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{info, instrument};
use tutorhub_core::entities::tasks;
use validator::Validate;

// ============ Create Task Use Case ============

pub struct CreateTaskUseCase;

impl CreateTaskUseCase {
    #[instrument(skip(db, req), fields(user_id = caller.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        caller: Caller,
        req: CreateTaskRequest,
    ) -> AppResult<TaskDto> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(assigned_to_id) = req.assigned_to_id {
            let allowed =
                caller.is_tutor() && is_connected(db, caller.user_id, assigned_to_id).await?;
            if !allowed {
                return Err(AppError::Validation(
                    "Can only assign tasks to connected students".to_string(),
                ));
            }
        }

        let task = tasks::ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date),
            status: Set(req.status),
            priority: Set(req.priority),
            user_id: Set(caller.user_id),
            assigned_to_id: Set(req.assigned_to_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let task = task.insert(db).await.map_err(AppError::from)?;

        info!(task_id = task.id, "task created");
        Ok(TaskDto::from_model(task))
    }
}

// ============ List Tasks Use Case ============

pub struct ListTasksUseCase;

impl ListTasksUseCase {
    /// A tutor sees tasks they created plus anything assigned to a
    /// connected student; a student sees what is assigned to them. Either
    /// way nothing shows without at least one approved connection.
    #[instrument(skip(db), fields(user_id = caller.user_id))]
    pub async fn execute(db: &DatabaseConnection, caller: Caller) -> AppResult<Vec<TaskDto>> {
        let others = counterparty_ids(db, caller).await?;
        if others.is_empty() {
            return Ok(Vec::new());
        }

        let query = if caller.is_tutor() {
            tasks::Entity::find().filter(
                Condition::any()
                    .add(tasks::Column::UserId.eq(caller.user_id))
                    .add(tasks::Column::AssignedToId.is_in(others)),
            )
        } else {
            tasks::Entity::find().filter(tasks::Column::AssignedToId.eq(caller.user_id))
        };

        let rows = query
            .order_by_desc(tasks::Column::CreatedAt)
            .all(db)
            .await
            .map_err(AppError::from)?;

        let ids = rows
            .iter()
            .flat_map(|t| std::iter::once(t.user_id).chain(t.assigned_to_id));
        let summaries = load_user_summaries(db, ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let user = summaries.get(&row.user_id).cloned();
                let assigned_to = row
                    .assigned_to_id
                    .and_then(|id| summaries.get(&id).cloned());
                TaskDto::from_model(row)
                    .with_user(user)
                    .with_assigned_to(assigned_to)
            })
            .collect())
    }
}

// ============ Update Task Use Case ============

pub struct UpdateTaskUseCase;

impl UpdateTaskUseCase {
    /// Applies a partial edit by id. Any signed-in user may move a task
    /// they can address, which is how students tick off their homework.
    #[instrument(skip(db, req))]
    pub async fn execute(
        db: &DatabaseConnection,
        task_id: i32,
        req: UpdateTaskRequest,
    ) -> AppResult<TaskDto> {
        // Validate input
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let task = tasks::Entity::find_by_id(task_id)
            .one(db)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

        let mut active: tasks::ActiveModel = task.into();
        if let Some(title) = req.title {
            active.title = Set(title);
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(due_date) = req.due_date {
            active.due_date = Set(Some(due_date));
        }
        if let Some(status) = req.status {
            active.status = Set(status);
        }
        if let Some(priority) = req.priority {
            active.priority = Set(priority);
        }
        if let Some(assigned_to_id) = req.assigned_to_id {
            active.assigned_to_id = Set(Some(assigned_to_id));
        }
        let updated = active.update(db).await.map_err(AppError::from)?;

        info!(task_id, "task updated");
        Ok(TaskDto::from_model(updated))
    }
}

// ============ Delete Task Use Case ============

pub struct DeleteTaskUseCase;

impl DeleteTaskUseCase {
    /// Deletes by id; removing an id that is already gone succeeds.
    #[instrument(skip(db))]
    pub async fn execute(db: &DatabaseConnection, task_id: i32) -> AppResult<DeleteTaskResponse> {
        tasks::Entity::delete_by_id(task_id)
            .exec(db)
            .await
            .map_err(AppError::from)?;

        info!(task_id, "task deleted");
        Ok(DeleteTaskResponse {
            message: "Task deleted successfully".to_string(),
        })
    }
}
