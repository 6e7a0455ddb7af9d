//! Validation of requested event times ahead of creation.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CalendarError;
use crate::utils::parse_strict_date;

use super::types::EventTime;

/// A validated event creation request, classified by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    /// All-day span; `end` is exclusive, per calendar-API convention.
    AllDay { start: NaiveDate, end: NaiveDate },
    /// Timed span, interpreted in the configured zone.
    Timed {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl EventShape {
    /// Render this shape as outgoing wire boundaries. Timed events carry
    /// the configured zone identifier.
    pub fn event_times(&self, time_zone: &str) -> (EventTime, EventTime) {
        match *self {
            EventShape::AllDay { start, end } => (EventTime::date(start), EventTime::date(end)),
            EventShape::Timed { start, end } => {
                let stamp = |dt: NaiveDateTime| EventTime::Timestamp {
                    date_time: dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
                    time_zone: Some(time_zone.to_string()),
                };
                (stamp(start), stamp(end))
            }
        }
    }
}

/// One lexical boundary of an event request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

/// Validate and classify the start/end strings of an event request.
///
/// Both must be `YYYY-MM-DD` or both `YYYY-MM-DDTHH:MM[:SS]`; mixing the
/// two forms is rejected. Equal all-day dates are normalized to a one-day
/// span by advancing the exclusive end date.
pub fn validate_event_request(start: &str, end: &str) -> Result<EventShape, CalendarError> {
    let start_bound =
        classify(start).ok_or(CalendarError::InvalidEventTime { which: "start" })?;
    let end_bound = classify(end).ok_or(CalendarError::InvalidEventTime { which: "end" })?;

    match (start_bound, end_bound) {
        (Bound::Date(s), Bound::Date(e)) => {
            let end = if s == e {
                e.succ_opt()
                    .ok_or(CalendarError::InvalidEventTime { which: "end" })?
            } else {
                e
            };
            Ok(EventShape::AllDay { start: s, end })
        }
        (Bound::DateTime(s), Bound::DateTime(e)) => Ok(EventShape::Timed { start: s, end: e }),
        _ => Err(CalendarError::InconsistentEventShape),
    }
}

fn classify(raw: &str) -> Option<Bound> {
    if let Some(date) = parse_strict_date(raw) {
        return Some(Bound::Date(date));
    }
    // Length pins zero-padded components, which chrono alone is lenient about.
    for (format, len) in [("%Y-%m-%dT%H:%M:%S", 19), ("%Y-%m-%dT%H:%M", 16)] {
        if raw.len() != len {
            continue;
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Bound::DateTime(dt));
        }
    }
    None
}
