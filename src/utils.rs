//! Small parsing helpers shared across modules.

use chrono::{FixedOffset, NaiveDate, NaiveTime};

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// Rejects non-padded components and trailing garbage that chrono's
/// lenient parser would otherwise accept.
pub fn parse_strict_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Parse a time of day in `HH:MM` format.
pub fn parse_hhmm(raw: &str) -> Option<NaiveTime> {
    let (hour, minute) = raw.split_once(':')?;
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

/// Parse a fixed UTC offset in `±HH:MM` format (e.g. `-07:00`).
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let (sign, rest) = if let Some(rest) = raw.strip_prefix('+') {
        (1i32, rest)
    } else if let Some(rest) = raw.strip_prefix('-') {
        (-1i32, rest)
    } else {
        return None;
    };
    let time = parse_hhmm(rest)?;
    use chrono::Timelike;
    let secs = sign * (time.hour() as i32 * 3600 + time.minute() as i32 * 60);
    FixedOffset::east_opt(secs)
}
