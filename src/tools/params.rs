//! Parameter types for the assistant tool surface.
//!
//! One struct per tool, shaped for the external dispatch layer: every
//! optional field defaults, and the derived JSON schemas double as the
//! tool documentation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for finding free time slots on a day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FreeTimeParams {
    /// The date to check, in YYYY-MM-DD format (required).
    pub date: String,
}

/// Parameters for creating a calendar event.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateEventParams {
    /// Title of the event (required).
    pub title: String,
    /// Start time: YYYY-MM-DDTHH:MM:SS, or YYYY-MM-DD for all-day events (required).
    pub start: String,
    /// End time, in the same format as the start time (required).
    pub end: String,
    /// Description of the event.
    #[serde(default)]
    pub description: Option<String>,
    /// Location of the event.
    #[serde(default)]
    pub location: Option<String>,
}

/// Parameters for listing upcoming events.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetEventsParams {
    /// Number of days to look ahead, between 1 and 30 (default: 7).
    #[serde(default)]
    pub days: Option<i64>,
}

/// Parameters for listing tasks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListTasksParams {
    /// Filter by status: "all", "pending", "in_progress", or "completed" (default: "all").
    #[serde(default)]
    pub status: Option<String>,
}

/// Parameters for adding a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddTaskParams {
    /// Title of the task (required).
    pub title: String,
    /// Description of the task.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority level: "low", "medium", or "high" (default: "medium").
    #[serde(default)]
    pub priority: Option<String>,
    /// Due date in YYYY-MM-DD format.
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Parameters for updating a task's status.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskStatusParams {
    /// The ID of the task to update (required).
    pub id: u64,
    /// New status: "pending", "in_progress", or "completed" (required).
    pub status: String,
}

/// Parameters for deleting a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteTaskParams {
    /// The ID of the task to delete (required).
    pub id: u64,
}
