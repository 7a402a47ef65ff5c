pub mod todo;

pub use todo::{
    NewTodoRequest, TodoRecord, TodoStatus, UpdateStatusRequest, format_timestamp,
    parse_timestamp,
};
