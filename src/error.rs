//! Error types for the valet assistant core.

use thiserror::Error;

/// Main error type for valet operations.
#[derive(Error, Debug)]
pub enum ValetError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ValetError {
    /// The user-facing message for this error, without the enclosing
    /// category prefix. Tool responses surface this text directly.
    pub fn user_message(&self) -> String {
        match self {
            ValetError::Config(e) => e.to_string(),
            ValetError::Calendar(e) => e.to_string(),
            ValetError::Task(e) => e.to_string(),
            ValetError::Service(e) => e.to_string(),
            ValetError::Io(e) => format!("An unexpected error occurred: {e}."),
            ValetError::Serialization(e) => format!("An unexpected error occurred: {e}."),
        }
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Calendar-related errors.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Unable to parse timestamp: {0}.")]
    MalformedTimestamp(String),

    #[error("Invalid date format: {0}. Please use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error(
        "Invalid {which} time format. Use YYYY-MM-DD for all-day events \
         or YYYY-MM-DDTHH:MM:SS for specific times."
    )]
    InvalidEventTime { which: &'static str },

    #[error(
        "Both start and end times must be in the same format \
         (either both dates or both date-times)."
    )]
    InconsistentEventShape,

    #[error("Event title cannot be empty.")]
    EmptyTitle,

    #[error("Days parameter must be between 1 and 30.")]
    DaysOutOfRange,
}

/// Task-related errors.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Task title cannot be empty.")]
    EmptyTitle,

    #[error("Invalid priority: {0}. Must be one of: low, medium, high.")]
    InvalidPriority(String),

    #[error("Invalid status: {0}. Must be one of: pending, in_progress, completed.")]
    InvalidStatus(String),

    #[error("Invalid due date: {0}. Please use a valid date in YYYY-MM-DD format.")]
    InvalidDueDate(String),

    #[error("Task with ID {0} not found.")]
    NotFound(u64),

    #[error("Failed to save tasks: {0}.")]
    Persistence(#[source] std::io::Error),
}

/// Errors from external collaborators.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0} is not available. Please check your credentials.")]
    Unavailable(&'static str),

    #[error("An error occurred while contacting the service: {0}.")]
    Remote(String),
}

/// Result type alias for valet operations.
pub type Result<T> = std::result::Result<T, ValetError>;
