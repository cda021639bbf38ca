//! Task handlers — the protected endpoints exercising the auth gateway.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use taskhub_core::error::AppError;
use taskhub_core::pagination::Page;

use crate::dto::request::CreateTaskRequest;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;
use crate::tasks::Task;

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<Task>>, ApiError> {
    let page = params.into_page_request();
    Ok(Json(state.tasks.list(auth.id, &page)))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let task = state.tasks.create(auth.id, req.title, req.priority);
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/tasks/{id}/toggle
pub async fn toggle_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .tasks
        .toggle(auth.id, id)
        .ok_or_else(|| AppError::not_found("Task not found"))?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.tasks.delete(auth.id, id) {
        return Err(AppError::not_found("Task not found").into());
    }
    Ok(StatusCode::NO_CONTENT)
}
