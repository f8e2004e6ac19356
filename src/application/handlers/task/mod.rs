//! Task handlers.

mod add_task;
mod change_task_status;
mod delete_task;

pub use add_task::{AddTaskCommand, AddTaskHandler, AddTaskResult};
pub use change_task_status::{
    ChangeTaskStatusCommand, ChangeTaskStatusHandler, ChangeTaskStatusResult,
};
pub use delete_task::{DeleteTaskCommand, DeleteTaskHandler, DeleteTaskResult};
