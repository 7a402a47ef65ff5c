use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::{repository, schema};
use crate::error::AppError;
use crate::models::{TodoRecord, TodoStatus};

/// Storage operations the list screen and the HTTP layer depend on.
///
/// Data calls run a single statement; nothing spans calls.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn migrate(&self, target_version: i64) -> Result<(), AppError>;
    async fn schema_version(&self) -> Result<i64, AppError>;
    async fn list_all(&self) -> Result<Vec<TodoRecord>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TodoRecord>, AppError>;
    async fn insert(&self, text: &str) -> Result<TodoRecord, AppError>;
    /// Unknown ids are a silent no-op.
    async fn update_status(&self, id: &str, status: TodoStatus) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct SqliteTodoStore {
    db: SqlitePool,
    seed: Vec<String>,
}

impl SqliteTodoStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db, seed: Vec::new() }
    }

    /// Rows inserted by the first migration only.
    pub fn with_seed(mut self, seed: Vec<String>) -> Self {
        self.seed = seed;
        self
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn migrate(&self, target_version: i64) -> Result<(), AppError> {
        schema::migrate(&self.db, target_version, &self.seed).await
    }

    async fn schema_version(&self) -> Result<i64, AppError> {
        Ok(schema::schema_version(&self.db).await?)
    }

    async fn list_all(&self) -> Result<Vec<TodoRecord>, AppError> {
        Ok(repository::fetch_todos(&self.db).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TodoRecord>, AppError> {
        Ok(repository::find_todo_by_id(&self.db, id).await?)
    }

    async fn insert(&self, text: &str) -> Result<TodoRecord, AppError> {
        repository::insert_todo(&self.db, text).await
    }

    async fn update_status(&self, id: &str, status: TodoStatus) -> Result<(), AppError> {
        let matched = repository::update_todo_status(&self.db, id, status).await?;
        if !matched {
            debug!("update_status: no todo with id {}", id);
        }
        Ok(())
    }
}
