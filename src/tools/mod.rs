//! The tool surface exposed to the external dispatch layer.

pub mod assistant;
pub mod params;
pub mod render;

pub use assistant::Assistant;
pub use params::{
    AddTaskParams, CreateEventParams, DeleteTaskParams, FreeTimeParams, GetEventsParams,
    ListTasksParams, UpdateTaskStatusParams,
};
