//! The assistant tool surface.
//!
//! Each method maps one dispatchable tool: raw parameters in, rendered text
//! out. Every error is converted to a user-facing message here; nothing
//! propagates to the dispatch layer as a fault.

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use tracing::{error, info};

use crate::calendar::{
    availability, validate_event_request, AvailabilityOptions, NewEvent,
};
use crate::config::Config;
use crate::error::{CalendarError, Result, ServiceError, TaskError};
use crate::sources::EventSource;
use crate::tasks::{NewTask, StatusFilter, TaskPriority, TaskStatus, TaskStore};
use crate::utils::parse_strict_date;

use super::params::{
    AddTaskParams, CreateEventParams, DeleteTaskParams, FreeTimeParams, GetEventsParams,
    ListTasksParams, UpdateTaskStatusParams,
};
use super::render;

/// Holds the configured collaborators and dispatches tool calls.
pub struct Assistant {
    config: Config,
    source: Option<Arc<dyn EventSource>>,
    store: TaskStore,
}

impl Assistant {
    /// Create an assistant over the given configuration. `source` is the
    /// calendar collaborator, absent when not configured.
    pub fn new(config: Config, source: Option<Arc<dyn EventSource>>) -> Self {
        let store = TaskStore::new(config.tasks.data_path());
        Self {
            config,
            source,
            store,
        }
    }

    /// The underlying task store.
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    // ========================================================================
    // Calendar Tools
    // ========================================================================

    /// Find free time slots in the calendar for a specific date.
    pub async fn get_free_time(&self, params: FreeTimeParams) -> String {
        respond(self.free_time(params).await)
    }

    async fn free_time(&self, params: FreeTimeParams) -> Result<String> {
        info!(date = %params.date, "finding free time slots");
        let day = parse_strict_date(&params.date)
            .ok_or_else(|| CalendarError::InvalidDate(params.date.clone()))?;

        let source = self.source()?;
        let options = AvailabilityOptions::from_config(&self.config.calendar);
        let (time_min, time_max) = day_bounds(day, options.utc_offset);
        let events = source.list_events(time_min, time_max).await?;

        let result = availability::compute(&events, day, &options);
        Ok(render::free_time_report(day, &result, &options))
    }

    /// Create a new calendar event.
    pub async fn create_event(&self, params: CreateEventParams) -> String {
        respond(self.create(params).await)
    }

    async fn create(&self, params: CreateEventParams) -> Result<String> {
        info!(title = %params.title, "creating calendar event");
        if params.title.trim().is_empty() {
            return Err(CalendarError::EmptyTitle.into());
        }

        let shape = validate_event_request(&params.start, &params.end)?;
        let source = self.source()?;

        let (start, end) = shape.event_times(&self.config.calendar.timezone);
        let link = source
            .insert_event(NewEvent {
                summary: params.title,
                location: params.location,
                description: params.description,
                start,
                end,
            })
            .await?;

        Ok(format!("Event created successfully: {link}"))
    }

    /// List upcoming calendar events.
    pub async fn get_events(&self, params: GetEventsParams) -> String {
        respond(self.events(params).await)
    }

    async fn events(&self, params: GetEventsParams) -> Result<String> {
        let days = params.days.unwrap_or(7);
        info!(days, "getting calendar events");
        if !(1..=30).contains(&days) {
            return Err(CalendarError::DaysOutOfRange.into());
        }

        let source = self.source()?;
        let offset = self.config.calendar.utc_offset();
        let now = Utc::now().with_timezone(&offset);
        let events = source.list_events(now, now + Duration::days(days)).await?;

        if events.is_empty() {
            return Ok(format!("No upcoming events found in the next {days} days."));
        }
        Ok(render::event_list(&events, offset))
    }

    // ========================================================================
    // Task Tools
    // ========================================================================

    /// List tasks with optional filtering by status.
    pub async fn list_tasks(&self, params: ListTasksParams) -> String {
        respond(self.tasks(params).await)
    }

    async fn tasks(&self, params: ListTasksParams) -> Result<String> {
        let raw = params.status.unwrap_or_else(|| "all".to_string());
        info!(status = %raw, "listing tasks");
        let filter = StatusFilter::parse(&raw)
            .ok_or_else(|| TaskError::InvalidStatus(raw.clone()))?;

        let tasks = self.store.list(filter).await?;
        if tasks.is_empty() {
            return Ok(match filter {
                StatusFilter::All => "No tasks found.".to_string(),
                StatusFilter::Status(_) => format!("No tasks with status '{raw}' found."),
            });
        }
        Ok(render::task_list(&tasks))
    }

    /// Add a new task.
    pub async fn add_task(&self, params: AddTaskParams) -> String {
        respond(self.add(params).await)
    }

    async fn add(&self, params: AddTaskParams) -> Result<String> {
        info!(title = %params.title, "adding new task");
        let priority = match params.priority.as_deref() {
            None | Some("") => TaskPriority::default(),
            Some(raw) => TaskPriority::parse(raw)
                .ok_or_else(|| TaskError::InvalidPriority(raw.to_string()))?,
        };
        let due_date = match params.due_date.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                parse_strict_date(raw).ok_or_else(|| TaskError::InvalidDueDate(raw.to_string()))?,
            ),
        };

        let task = self
            .store
            .add(NewTask {
                title: params.title,
                description: params.description.unwrap_or_default(),
                priority,
                due_date,
            })
            .await?;

        Ok(format!(
            "Task '{}' added successfully with ID {}.",
            task.title, task.id
        ))
    }

    /// Update the status of a task.
    pub async fn update_task_status(&self, params: UpdateTaskStatusParams) -> String {
        respond(self.update_status(params).await)
    }

    async fn update_status(&self, params: UpdateTaskStatusParams) -> Result<String> {
        info!(id = params.id, status = %params.status, "updating task status");
        let status = TaskStatus::parse(&params.status)
            .ok_or_else(|| TaskError::InvalidStatus(params.status.clone()))?;

        let change = self.store.update_status(params.id, status).await?;
        Ok(format!(
            "Task #{} status updated from '{}' to '{}'.",
            params.id,
            change.previous.as_str(),
            change.task.status.as_str()
        ))
    }

    /// Delete a task.
    pub async fn delete_task(&self, params: DeleteTaskParams) -> String {
        respond(self.delete(params).await)
    }

    async fn delete(&self, params: DeleteTaskParams) -> Result<String> {
        info!(id = params.id, "deleting task");
        self.store.delete(params.id).await?;
        Ok(format!("Task #{} deleted successfully.", params.id))
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Report which external collaborators are configured.
    pub fn service_status(&self) -> String {
        render::connector_status(&self.config.integrations, self.source.is_some())
    }

    fn source(&self) -> Result<&Arc<dyn EventSource>> {
        self.source
            .as_ref()
            .ok_or_else(|| ServiceError::Unavailable("Calendar service").into())
    }
}

/// Convert a tool outcome into its user-facing text.
fn respond(result: Result<String>) -> String {
    match result {
        Ok(message) => message,
        Err(e) => {
            error!(error = %e, "tool call failed");
            e.user_message()
        }
    }
}

/// The half-open range covering one calendar day in the given zone.
fn day_bounds(day: NaiveDate, offset: FixedOffset) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
    let start = day
        .and_time(NaiveTime::MIN)
        .and_local_timezone(offset)
        .unwrap();
    (start, start + Duration::days(1))
}
