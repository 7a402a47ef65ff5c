use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{patch, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::*;
use crate::services::{Filter, visible_todos};
use crate::state::AppState;

#[derive(Deserialize)]
struct TodoQueryParams {
    #[serde(default)]
    filter: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", patch(update_status))
        .route("/todos/{id}/toggle", post(toggle_todo))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<TodoQueryParams>
) -> Result<Json<Vec<TodoRecord>>, AppError> {
    let filter = match params.filter.as_deref() {
        Some(raw) => raw.parse::<Filter>()?,
        None => Filter::All,
    };
    let records = state.store.list_all().await?;
    Ok(Json(visible_todos(&records, filter)))
}

async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<NewTodoRequest>
) -> Result<(StatusCode, Json<TodoRecord>), AppError> {
    let todo = state.store.insert(&req.text).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>
) -> Result<StatusCode, AppError> {
    state.store.update_status(&id, req.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<Json<TodoRecord>, AppError> {
    let current = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(AppError::NotFound)?;

    state.store.update_status(&id, current.status.toggled()).await?;

    let todo = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(todo))
}
