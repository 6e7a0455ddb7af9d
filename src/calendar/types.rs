//! Calendar types for availability computation and event creation.
//!
//! Events are never owned by this crate: they are fetched per call from an
//! external calendar collaborator and mapped into the strict representations
//! below at the boundary.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Remote Event Types (wire shape)
// ============================================================================

/// An event boundary as calendar APIs encode it: either an all-day marker
/// (a calendar date, no time component) or a timestamp.
///
/// The timestamp is kept as the raw string so that malformed values survive
/// to the display fallback instead of failing the whole fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum EventTime {
    /// All-day marker.
    Date {
        /// The calendar date.
        date: NaiveDate,
    },
    /// A precise instant.
    Timestamp {
        /// RFC 3339 timestamp, possibly without an offset.
        #[serde(rename = "dateTime")]
        date_time: String,
        /// Zone identifier passed through to the remote service.
        #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
        time_zone: Option<String>,
    },
}

impl EventTime {
    /// Create an all-day marker.
    pub fn date(date: NaiveDate) -> Self {
        Self::Date { date }
    }

    /// Create a timestamp boundary.
    pub fn timestamp(date_time: impl Into<String>) -> Self {
        Self::Timestamp {
            date_time: date_time.into(),
            time_zone: None,
        }
    }

    /// Whether this boundary is a date-only all-day marker.
    pub fn is_date_only(&self) -> bool {
        matches!(self, Self::Date { .. })
    }
}

/// An attendee's recorded response on a fetched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Attendee {
    /// Whether this attendee entry refers to the calendar owner.
    #[serde(default, rename = "self")]
    pub is_self: bool,
    /// The attendee's response status.
    #[serde(default, rename = "responseStatus")]
    pub response: AttendeeResponse,
}

/// Response status of an attendee. Unknown wire values resolve to
/// [`AttendeeResponse::NeedsAction`] rather than failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum AttendeeResponse {
    /// Attendance confirmed.
    Accepted,
    /// Attendance declined.
    Declined,
    /// Tentatively attending.
    Tentative,
    /// No response recorded yet.
    #[default]
    NeedsAction,
}

impl<'de> Deserialize<'de> for AttendeeResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "accepted" => Self::Accepted,
            "declined" => Self::Declined,
            "tentative" => Self::Tentative,
            _ => Self::NeedsAction,
        })
    }
}

/// A calendar event as fetched from the external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RemoteEvent {
    /// Event title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Event location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Event description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start boundary.
    pub start: EventTime,
    /// End boundary.
    pub end: EventTime,
    /// Attendees with their responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<Attendee>,
}

impl RemoteEvent {
    /// Create a timed event from raw timestamp strings.
    pub fn timed(
        summary: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            summary: Some(summary.into()),
            location: None,
            description: None,
            start: EventTime::timestamp(start),
            end: EventTime::timestamp(end),
            attendees: Vec::new(),
        }
    }

    /// Create an all-day event spanning `[start, end)` in calendar dates.
    pub fn all_day(summary: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            summary: Some(summary.into()),
            location: None,
            description: None,
            start: EventTime::date(start),
            end: EventTime::date(end),
            attendees: Vec::new(),
        }
    }

    /// Mark the calendar owner's response on this event.
    pub fn with_self_response(mut self, response: AttendeeResponse) -> Self {
        self.attendees.push(Attendee {
            is_self: true,
            response,
        });
        self
    }

    /// An event is all-day iff both boundaries are date-only.
    pub fn is_all_day(&self) -> bool {
        self.start.is_date_only() && self.end.is_date_only()
    }

    /// Whether the calendar owner declined this event.
    pub fn declined_by_self(&self) -> bool {
        self.attendees
            .iter()
            .any(|a| a.is_self && a.response == AttendeeResponse::Declined)
    }

    /// The event title, or a placeholder when absent.
    pub fn summary_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.summary.as_deref().unwrap_or(default)
    }
}

/// Outgoing payload for event creation, in the same wire shape fetched
/// events arrive in.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NewEvent {
    /// Event title.
    pub summary: String,
    /// Event location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Event description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start boundary.
    pub start: EventTime,
    /// End boundary.
    pub end: EventTime,
}

// ============================================================================
// Availability Types
// ============================================================================

/// A concrete time range during which the user is unavailable, derived from
/// a non-all-day event. Zero or negative length is tolerated; the sweep in
/// [`super::availability`] absorbs such intervals without emitting slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyInterval {
    /// Start instant.
    pub start: DateTime<FixedOffset>,
    /// End instant.
    pub end: DateTime<FixedOffset>,
    /// Title of the originating event.
    pub summary: String,
}

/// A free time slot within business hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FreeSlot {
    /// Start of the free time.
    pub start: DateTime<FixedOffset>,
    /// End of the free time.
    pub end: DateTime<FixedOffset>,
    /// Duration in minutes.
    pub duration_minutes: i64,
}

impl FreeSlot {
    /// Create a new free slot, capturing its duration.
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        let duration = end - start;
        Self {
            start,
            end,
            duration_minutes: duration.num_minutes(),
        }
    }
}

/// Outcome of an availability computation for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DayAvailability {
    /// No timed, non-declined events: the whole business window is open.
    FreeAllDay,
    /// Busy intervals cover the business window with no gaps at all.
    FullyBooked,
    /// Gaps exist but every one is shorter than the minimum.
    GapsTooShort,
    /// The ordered free slots meeting the minimum duration.
    Slots(Vec<FreeSlot>),
}

/// Options for the availability sweep. Defaults mirror the standard
/// business day: 09:00-17:00 with a 15 minute minimum gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityOptions {
    /// Start of business hours.
    pub business_start: NaiveTime,
    /// End of business hours.
    pub business_end: NaiveTime,
    /// Gaps shorter than this are dropped, not truncated.
    pub min_gap_minutes: u32,
    /// Offset used for date-only boundaries and offset-less timestamps.
    pub utc_offset: FixedOffset,
}

impl Default for AvailabilityOptions {
    fn default() -> Self {
        Self {
            business_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            business_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            min_gap_minutes: 15,
            utc_offset: FixedOffset::east_opt(0).unwrap(),
        }
    }
}

impl AvailabilityOptions {
    /// Build options from the calendar section of the configuration.
    pub fn from_config(config: &crate::config::CalendarConfig) -> Self {
        Self {
            business_start: config.business_start_time(),
            business_end: config.business_end_time(),
            min_gap_minutes: config.min_gap_minutes,
            utc_offset: config.utc_offset(),
        }
    }
}
