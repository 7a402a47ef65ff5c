pub mod filter;
pub mod todo_list;

pub use filter::{Filter, display_order, visible_todos};
pub use todo_list::{Phase, TodoListService};
