//! Durable task tracking.

pub mod store;
pub mod types;

pub use store::{StatusChange, TaskStore};
pub use types::{NewTask, StatusFilter, Task, TaskPriority, TaskStatus};
