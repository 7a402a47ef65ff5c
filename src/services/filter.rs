use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{TodoRecord, TodoStatus};

/// View-only filter over the loaded records. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Done,
}

impl Filter {
    pub fn matches(&self, record: &TodoRecord) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => record.status == TodoStatus::Pending,
            Filter::Done => record.status == TodoStatus::Done,
        }
    }

    pub fn apply<'a>(&self, records: &'a [TodoRecord]) -> Vec<&'a TodoRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

impl FromStr for Filter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "pending" => Ok(Filter::Pending),
            "done" => Ok(Filter::Done),
            other => Err(AppError::BadRequest(format!("unknown filter: {}", other))),
        }
    }
}

/// Pending before done, newest first within a group, then by id.
pub fn display_order(a: &TodoRecord, b: &TodoRecord) -> Ordering {
    status_rank(a.status)
        .cmp(&status_rank(b.status))
        .then_with(|| b.created_instant().cmp(&a.created_instant()))
        .then_with(|| a.id.cmp(&b.id))
}

fn status_rank(status: TodoStatus) -> u8 {
    match status {
        TodoStatus::Pending => 0,
        TodoStatus::Done => 1,
    }
}

/// Filtered and sorted view of `records`, ready to render.
pub fn visible_todos(records: &[TodoRecord], filter: Filter) -> Vec<TodoRecord> {
    let mut visible: Vec<TodoRecord> = filter.apply(records).into_iter().cloned().collect();
    visible.sort_by(display_order);
    visible
}
