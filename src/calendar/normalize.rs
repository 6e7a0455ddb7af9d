//! Normalization of raw event boundaries into comparable instants.

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime};

use crate::error::CalendarError;

use super::types::EventTime;

/// A normalized event boundary: a comparable instant plus all-day tagging.
///
/// The instant of an all-day boundary is that date at local midnight; it is
/// used only for day bucketing and never enters slot math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedTime {
    /// The comparable instant.
    pub instant: DateTime<FixedOffset>,
    /// Whether this boundary was a date-only all-day marker.
    pub all_day: bool,
}

/// Normalize an event boundary against the configured fixed offset.
pub fn normalize(
    time: &EventTime,
    utc_offset: FixedOffset,
) -> Result<NormalizedTime, CalendarError> {
    match time {
        EventTime::Date { date } => {
            let midnight = date.and_time(NaiveTime::MIN);
            Ok(NormalizedTime {
                instant: local_instant(midnight, utc_offset),
                all_day: true,
            })
        }
        EventTime::Timestamp { date_time, .. } => Ok(NormalizedTime {
            instant: parse_instant(date_time, utc_offset)?,
            all_day: false,
        }),
    }
}

/// Parse a timestamp string into an offset-aware instant.
///
/// RFC 3339 forms carry their own offset (a trailing `Z` is the explicit
/// UTC offset); offset-less timestamps are interpreted in the configured
/// zone. Anything else is a [`CalendarError::MalformedTimestamp`].
pub fn parse_instant(
    raw: &str,
    utc_offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, CalendarError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant);
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(local_instant(naive, utc_offset));
        }
    }

    Err(CalendarError::MalformedTimestamp(raw.to_string()))
}

/// Attach a fixed offset to a naive local time. Infallible for fixed
/// offsets, which have no DST folds.
fn local_instant(naive: NaiveDateTime, utc_offset: FixedOffset) -> DateTime<FixedOffset> {
    naive.and_local_timezone(utc_offset).unwrap()
}
