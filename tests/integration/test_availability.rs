//! End-to-end availability scenarios over a fixture calendar.

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use valet::tools::FreeTimeParams;
use valet::{
    Assistant, AttendeeResponse, Config, EventSource, FixtureEventSource, RemoteEvent,
};

fn assistant(events: Vec<RemoteEvent>) -> (TempDir, Assistant) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.tasks.data_file = dir
        .path()
        .join("tasks_data.json")
        .to_string_lossy()
        .into_owned();
    let source: Arc<dyn EventSource> = Arc::new(FixtureEventSource::new(
        events,
        config.calendar.utc_offset(),
    ));
    (dir, Assistant::new(config, Some(source)))
}

async fn free_time(assistant: &Assistant, date: &str) -> String {
    assistant
        .get_free_time(FreeTimeParams {
            date: date.to_string(),
        })
        .await
}

fn timed(summary: &str, start: &str, end: &str) -> RemoteEvent {
    RemoteEvent::timed(
        summary,
        format!("2024-03-01T{start}:00Z"),
        format!("2024-03-01T{end}:00Z"),
    )
}

#[tokio::test]
async fn two_meetings_leave_two_slots() {
    let (_dir, assistant) = assistant(vec![
        timed("Standup", "09:00", "10:00"),
        timed("Design review", "11:30", "12:00"),
    ]);

    let report = free_time(&assistant, "2024-03-01").await;
    assert_eq!(
        report,
        "Free time slots on 2024-03-01:\n\n\
         10:00 AM - 11:30 AM (90 minutes)\n\
         12:00 PM - 05:00 PM (300 minutes)"
    );
}

#[tokio::test]
async fn all_day_event_reports_entire_day_free() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let (_dir, assistant) = assistant(vec![RemoteEvent::all_day(
        "Conference",
        day,
        day.succ_opt().unwrap(),
    )]);

    let report = free_time(&assistant, "2024-03-01").await;
    assert_eq!(
        report,
        "You have no events on 2024-03-01. The entire day is free!"
    );
}

#[tokio::test]
async fn business_spanning_event_reports_fully_booked() {
    let (_dir, assistant) = assistant(vec![timed("Offsite", "09:00", "17:00")]);

    let report = free_time(&assistant, "2024-03-01").await;
    assert_eq!(
        report,
        "You're fully booked on 2024-03-01. No free slots available \
         during business hours (09:00 AM - 05:00 PM)."
    );
}

#[tokio::test]
async fn sub_threshold_gaps_report_distinctly() {
    let (_dir, assistant) = assistant(vec![
        timed("Morning block", "09:00", "12:50"),
        timed("Afternoon block", "13:00", "17:00"),
    ]);

    let report = free_time(&assistant, "2024-03-01").await;
    assert_eq!(
        report,
        "You have some gaps on 2024-03-01, but they're all shorter than 15 minutes."
    );
}

#[tokio::test]
async fn declined_events_are_ignored() {
    let (_dir, assistant) = assistant(vec![
        timed("Keeper", "09:00", "10:00"),
        timed("Declined sync", "10:00", "16:00").with_self_response(AttendeeResponse::Declined),
    ]);

    let report = free_time(&assistant, "2024-03-01").await;
    assert_eq!(
        report,
        "Free time slots on 2024-03-01:\n\n10:00 AM - 05:00 PM (420 minutes)"
    );
}

#[tokio::test]
async fn malformed_event_degrades_without_failing_the_request() {
    let (_dir, assistant) = assistant(vec![
        RemoteEvent::timed("Glitch", "whenever", "later"),
        timed("Real meeting", "09:00", "13:00"),
    ]);

    let report = free_time(&assistant, "2024-03-01").await;
    assert_eq!(
        report,
        "Free time slots on 2024-03-01:\n\n01:00 PM - 05:00 PM (240 minutes)"
    );
}

#[tokio::test]
async fn events_on_other_days_do_not_bleed_in() {
    let (_dir, assistant) = assistant(vec![RemoteEvent::timed(
        "Tomorrow",
        "2024-03-02T09:00:00Z",
        "2024-03-02T17:00:00Z",
    )]);

    let report = free_time(&assistant, "2024-03-01").await;
    assert_eq!(
        report,
        "You have no events on 2024-03-01. The entire day is free!"
    );
}

#[tokio::test]
async fn business_hours_follow_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.tasks.data_file = dir
        .path()
        .join("tasks_data.json")
        .to_string_lossy()
        .into_owned();
    config.calendar.business_start = "08:00".to_string();
    config.calendar.business_end = "12:00".to_string();
    let source: Arc<dyn EventSource> = Arc::new(FixtureEventSource::new(
        vec![timed("Morning", "08:00", "09:00")],
        config.calendar.utc_offset(),
    ));
    let assistant = Assistant::new(config, Some(source));

    let report = free_time(&assistant, "2024-03-01").await;
    assert_eq!(
        report,
        "Free time slots on 2024-03-01:\n\n09:00 AM - 12:00 PM (180 minutes)"
    );
}
