//! Text rendering for tool responses.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::calendar::{parse_instant, AvailabilityOptions, DayAvailability, EventTime, RemoteEvent};
use crate::config::IntegrationsConfig;
use crate::tasks::Task;

/// Render the free-time report for a day.
pub fn free_time_report(
    date: NaiveDate,
    availability: &DayAvailability,
    options: &AvailabilityOptions,
) -> String {
    match availability {
        DayAvailability::FreeAllDay => {
            format!("You have no events on {date}. The entire day is free!")
        }
        DayAvailability::FullyBooked => format!(
            "You're fully booked on {date}. No free slots available during business hours ({} - {}).",
            options.business_start.format("%I:%M %p"),
            options.business_end.format("%I:%M %p"),
        ),
        DayAvailability::GapsTooShort => format!(
            "You have some gaps on {date}, but they're all shorter than {} minutes.",
            options.min_gap_minutes
        ),
        DayAvailability::Slots(slots) => {
            let lines: Vec<String> = slots
                .iter()
                .map(|slot| {
                    format!(
                        "{} - {} ({} minutes)",
                        clock(slot.start),
                        clock(slot.end),
                        slot.duration_minutes
                    )
                })
                .collect();
            format!("Free time slots on {date}:\n\n{}", lines.join("\n"))
        }
    }
}

/// Render a list of fetched events.
pub fn event_list(events: &[RemoteEvent], utc_offset: FixedOffset) -> String {
    let blocks: Vec<String> = events
        .iter()
        .map(|event| {
            format!(
                "Event: {}\nTime: {} to {}\nLocation: {}\nDescription: {}",
                event.summary_or("Untitled Event"),
                event_time_display(&event.start, utc_offset),
                event_time_display(&event.end, utc_offset),
                event.location.as_deref().unwrap_or("No location specified"),
                event
                    .description
                    .as_deref()
                    .unwrap_or("No description provided"),
            )
        })
        .collect();
    blocks.join("\n---\n")
}

/// Display an event boundary, falling back to the raw string when the
/// timestamp cannot be parsed.
pub fn event_time_display(time: &EventTime, utc_offset: FixedOffset) -> String {
    match time {
        EventTime::Date { date } => date.format("%Y-%m-%d").to_string(),
        EventTime::Timestamp { date_time, .. } => match parse_instant(date_time, utc_offset) {
            Ok(instant) => instant.format("%Y-%m-%d %H:%M").to_string(),
            Err(_) => date_time.clone(),
        },
    }
}

/// Render a list of tasks.
pub fn task_list(tasks: &[Task]) -> String {
    let blocks: Vec<String> = tasks
        .iter()
        .map(|task| {
            let due = task
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "No due date".to_string());
            let description = if task.description.is_empty() {
                "No description provided"
            } else {
                &task.description
            };
            let updated = task
                .updated_at
                .unwrap_or(task.created_at)
                .format("%Y-%m-%d %H:%M");
            format!(
                "Task #{}: {}\nStatus: {}\nPriority: {}\nDue Date: {}\nDescription: {}\nCreated: {}\nLast Updated: {}",
                task.id,
                task.title,
                task.status.as_str(),
                task.priority.as_str(),
                due,
                description,
                task.created_at.format("%Y-%m-%d %H:%M"),
                updated,
            )
        })
        .collect();
    blocks.join("\n---\n")
}

/// Render which external collaborators are configured.
pub fn connector_status(integrations: &IntegrationsConfig, calendar_connected: bool) -> String {
    let flag = |on: bool| if on { "configured" } else { "not configured" };
    format!(
        "Calendar source: {}\nGoogle Calendar credentials: {}\nGmail credentials: {}\nHome Assistant: {}",
        if calendar_connected { "connected" } else { "not connected" },
        flag(integrations.google_calendar),
        flag(integrations.gmail),
        flag(integrations.home_assistant),
    )
}

fn clock(instant: DateTime<FixedOffset>) -> String {
    instant.format("%I:%M %p").to_string()
}
