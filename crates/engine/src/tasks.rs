//! Task service: CRUD operations for user-owned tasks.
//!
//! Every query except [`TaskService::find`] is scoped to the owning user, so a
//! task belonging to someone else is indistinguishable from a missing one.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use taskflow_common::error::AppError;
use taskflow_common::types::Task;

/// Service layer for task CRUD operations.
pub struct TaskService;

/// Parameters for creating a new task.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateTaskParams {
    pub title: String,
    /// RFC 3339 timestamp. Empty or unparseable values leave the task without a due time.
    pub due_at: Option<String>,
}

/// Parameters for updating an existing task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateTaskParams {
    pub title: Option<String>,
    pub done: Option<bool>,
    /// RFC 3339 timestamp; `""` clears the due time.
    pub due_at: Option<String>,
}

impl TaskService {
    /// Create a new task for a user.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        params: &CreateTaskParams,
    ) -> Result<Task, AppError> {
        let title = validate_title(&params.title)?;
        let due_at = params
            .due_at
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(parse_due_at);

        let task: Task = sqlx::query_as(
            r#"
            INSERT INTO tasks (id, user_id, title, done, due_at)
            VALUES ($1, $2, $3, false, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(title)
        .bind(due_at)
        .fetch_one(pool)
        .await?;

        tracing::info!(
            task_id = %task.id,
            user_id = %user_id,
            has_due_at = task.due_at.is_some(),
            "Task created"
        );

        Ok(task)
    }

    /// List all tasks for a user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks: Vec<Task> =
            sqlx::query_as("SELECT * FROM tasks WHERE user_id = $1 ORDER BY created_at DESC")
                .bind(user_id)
                .fetch_all(pool)
                .await?;

        Ok(tasks)
    }

    /// Get a task owned by `user_id`.
    pub async fn get(pool: &PgPool, task_id: Uuid, user_id: Uuid) -> Result<Task, AppError> {
        let task: Task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", task_id)))?;

        Ok(task)
    }

    /// Fetch the latest committed state of a task regardless of owner.
    pub async fn find(pool: &PgPool, task_id: Uuid) -> Result<Option<Task>, AppError> {
        let task: Option<Task> = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(task_id)
            .fetch_optional(pool)
            .await?;

        Ok(task)
    }

    /// Apply a partial update to a task owned by `user_id`.
    pub async fn update(
        pool: &PgPool,
        task_id: Uuid,
        user_id: Uuid,
        params: &UpdateTaskParams,
    ) -> Result<Task, AppError> {
        let existing = Self::get(pool, task_id, user_id).await?;

        let title = match params.title.as_deref() {
            Some(raw) => validate_title(raw)?.to_string(),
            None => existing.title,
        };
        let done = params.done.unwrap_or(existing.done);
        let due_at = match params.due_at.as_deref() {
            None => existing.due_at,
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => parse_due_at(raw).or(existing.due_at),
        };

        let task: Task = sqlx::query_as(
            r#"
            UPDATE tasks
            SET title = $1, done = $2, due_at = $3
            WHERE id = $4 AND user_id = $5
            RETURNING *
            "#,
        )
        .bind(&title)
        .bind(done)
        .bind(due_at)
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task {} not found", task_id)))?;

        tracing::info!(
            task_id = %task_id,
            done = task.done,
            has_due_at = task.due_at.is_some(),
            "Task updated"
        );

        Ok(task)
    }

    /// Delete a task owned by `user_id`. Returns `false` if nothing was deleted.
    pub async fn delete(pool: &PgPool, task_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(task_id = %task_id, user_id = %user_id, "Task deleted");
        }

        Ok(deleted)
    }
}

fn validate_title(raw: &str) -> Result<&str, AppError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    Ok(title)
}

/// Parse an RFC 3339 due time. Unparseable input is logged and ignored.
pub fn parse_due_at(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(due_at = raw, error = %e, "Ignoring unparseable due_at");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_due_at_normalizes_to_utc() {
        let parsed = parse_due_at("2026-03-01T10:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_due_at_rejects_garbage() {
        assert!(parse_due_at("tomorrow at noon").is_none());
        assert!(parse_due_at("2026-03-01").is_none());
    }

    #[test]
    fn test_validate_title_trims() {
        assert_eq!(validate_title("  Buy milk ").unwrap(), "Buy milk");
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_update_params_default_to_absent() {
        let params: UpdateTaskParams = serde_json::from_str("{}").unwrap();
        assert!(params.title.is_none());
        assert!(params.done.is_none());
        assert!(params.due_at.is_none());

        let clear: UpdateTaskParams = serde_json::from_str(r#"{"due_at": ""}"#).unwrap();
        assert_eq!(clear.due_at.as_deref(), Some(""));
    }
}
