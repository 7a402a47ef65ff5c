use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{TodoRecord, TodoStatus, format_timestamp};

pub async fn fetch_todos(db: &SqlitePool) -> Result<Vec<TodoRecord>, sqlx::Error> {
    sqlx::query_as::<_, TodoRecord>("SELECT id, text, status, createdAt FROM todos")
        .fetch_all(db)
        .await
}

pub async fn find_todo_by_id(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<TodoRecord>, sqlx::Error> {
    sqlx::query_as::<_, TodoRecord>(
        "SELECT id, text, status, createdAt FROM todos WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub fn validate_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::BadRequest("todo text must not be empty".to_string()));
    }
    Ok(())
}

/// Runs against the pool or inside a migration transaction.
pub async fn insert_todo<'e, E>(db: E, text: &str) -> Result<TodoRecord, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    validate_text(text)?;

    let id = Uuid::new_v4().to_string();
    let now = format_timestamp(Utc::now());
    let status = TodoStatus::Pending;

    sqlx::query(
        r#"
        INSERT INTO todos (id, text, status, createdAt)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&id)
    .bind(text)
    .bind(status)
    .bind(&now)
    .execute(db)
    .await?;

    debug!("inserted todo {}", id);

    Ok(TodoRecord {
        id,
        text: text.to_string(),
        status,
        created_at: now,
    })
}

/// Returns whether a row matched `id`.
pub async fn update_todo_status(
    db: &SqlitePool,
    id: &str,
    status: TodoStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE todos
        SET status = ?1
        WHERE id = ?2
        "#,
    )
    .bind(status)
    .bind(id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}
