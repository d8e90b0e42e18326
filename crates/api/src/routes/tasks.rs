//! Task CRUD routes.
//!
//! Create and update hand the resulting task to the reminder queue when it has
//! a due time and is not done. Queueing never fails the request.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use uuid::Uuid;

use taskflow_common::error::AppError;
use taskflow_common::types::Task;
use taskflow_engine::tasks::{CreateTaskParams, TaskService, UpdateTaskParams};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", patch(update_task).delete(delete_task))
}

/// GET /api/tasks: List the authenticated user's tasks, newest first.
async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = TaskService::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(tasks))
}

/// POST /api/tasks: Create a task.
async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(params): Json<CreateTaskParams>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let task = TaskService::create(&state.pool, auth.user_id, &params).await?;
    state.reminders.notify(&task).await;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/tasks/{id}: Update title, completion or due time.
async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateTaskParams>,
) -> Result<Json<Task>, AppError> {
    let task = TaskService::update(&state.pool, id, auth.user_id, &params).await?;
    state.reminders.notify(&task).await;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}: Delete a task.
///
/// A reminder already armed for the task still fires.
async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = TaskService::delete(&state.pool, id, auth.user_id).await?;
    if deleted {
        Ok(Json(serde_json::json!({"deleted": id})))
    } else {
        Err(AppError::NotFound(format!("Task {} not found", id)))
    }
}
