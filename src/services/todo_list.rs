use std::sync::Arc;

use tracing::{debug, info};

use crate::db::TodoStore;
use crate::error::AppError;
use crate::models::TodoRecord;
use crate::services::filter::{Filter, visible_todos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unloaded,
    Loaded,
}

/// Headless controller behind the todo list screen.
///
/// Holds only a display copy of the records. Every mutation goes to the
/// store and is followed by a full reload; nothing is patched locally.
/// On error the previous copy and phase are left as they were.
pub struct TodoListService {
    store: Arc<dyn TodoStore>,
    records: Vec<TodoRecord>,
    filter: Filter,
    phase: Phase,
}

impl TodoListService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            store,
            records: Vec::new(),
            filter: Filter::All,
            phase: Phase::Unloaded,
        }
    }

    pub async fn load(&mut self) -> Result<(), AppError> {
        let records = self.store.list_all().await?;
        debug!("loaded {} todos", records.len());
        self.records = records;
        self.phase = Phase::Loaded;
        Ok(())
    }

    /// Blank input is dropped here without reaching the store.
    pub async fn add_item(&mut self, text: &str) -> Result<bool, AppError> {
        if text.trim().is_empty() {
            return Ok(false);
        }

        let created = self.store.insert(text).await?;
        info!("added todo {}", created.id);
        self.load().await?;
        Ok(true)
    }

    pub async fn toggle(&mut self, id: &str) -> Result<(), AppError> {
        let current = self
            .records
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.status)
            .ok_or(AppError::NotFound)?;

        let next = current.toggled();
        self.store.update_status(id, next).await?;
        info!("todo {} -> {}", id, next);
        self.load().await
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Full record set from the last load, in storage order.
    pub fn records(&self) -> &[TodoRecord] {
        &self.records
    }

    pub fn visible(&self) -> Vec<TodoRecord> {
        visible_todos(&self.records, self.filter)
    }
}
