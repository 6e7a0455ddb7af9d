//! Seams to the external calendar collaborator.
//!
//! The authenticated HTTP client lives outside this crate; the core only
//! ever sees this trait. Errors surface immediately with no retry, which
//! is acceptable because every call is a one-shot tool invocation.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use tokio::sync::RwLock;

use crate::calendar::{normalize, NewEvent, RemoteEvent};
use crate::error::Result;

/// Narrow interface of the external calendar service.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch events overlapping `[time_min, time_max)`.
    async fn list_events(
        &self,
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> Result<Vec<RemoteEvent>>;

    /// Create an event, returning a reference to it (a link or id).
    async fn insert_event(&self, event: NewEvent) -> Result<String>;
}

/// In-memory event source backed by a plain list, for tests and for
/// driving the tools from a local events file.
pub struct FixtureEventSource {
    utc_offset: FixedOffset,
    events: RwLock<Vec<RemoteEvent>>,
}

impl FixtureEventSource {
    /// Create a source over the given events.
    pub fn new(events: Vec<RemoteEvent>, utc_offset: FixedOffset) -> Self {
        Self {
            utc_offset,
            events: RwLock::new(events),
        }
    }

    /// Load events from a JSON file holding an array of [`RemoteEvent`]s.
    pub async fn from_file(
        path: impl AsRef<std::path::Path>,
        utc_offset: FixedOffset,
    ) -> Result<Self> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        let events: Vec<RemoteEvent> = serde_json::from_slice(&bytes)?;
        Ok(Self::new(events, utc_offset))
    }

    /// Whether an event overlaps the queried range. Events with boundaries
    /// that fail normalization are returned anyway; downstream consumers
    /// degrade them individually.
    fn overlaps(
        &self,
        event: &RemoteEvent,
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> bool {
        let (Ok(start), Ok(end)) = (
            normalize(&event.start, self.utc_offset),
            normalize(&event.end, self.utc_offset),
        ) else {
            return true;
        };
        start.instant < time_max && end.instant > time_min
    }
}

#[async_trait]
impl EventSource for FixtureEventSource {
    async fn list_events(
        &self,
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> Result<Vec<RemoteEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| self.overlaps(e, time_min, time_max))
            .cloned()
            .collect())
    }

    async fn insert_event(&self, event: NewEvent) -> Result<String> {
        let mut events = self.events.write().await;
        events.push(RemoteEvent {
            summary: Some(event.summary),
            location: event.location,
            description: event.description,
            start: event.start,
            end: event.end,
            attendees: Vec::new(),
        });
        Ok(format!("local-event-{}", events.len()))
    }
}
