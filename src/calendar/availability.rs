//! Free-slot computation over a day's fetched events.
//!
//! The computation is pure and synchronous: callers fetch events, hand them
//! in together with the day and options, and get the day's availability
//! back. Nothing here touches shared state.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use tracing::debug;

use super::normalize::normalize;
use super::types::{AvailabilityOptions, BusyInterval, DayAvailability, FreeSlot, RemoteEvent};

/// Derive busy intervals from a day's events.
///
/// All-day events and events the calendar owner declined never contribute.
/// Events whose boundaries fail normalization degrade to a skipped interval
/// rather than failing the computation.
pub fn busy_intervals(events: &[RemoteEvent], options: &AvailabilityOptions) -> Vec<BusyInterval> {
    events
        .iter()
        .filter(|event| !event.is_all_day())
        .filter(|event| !event.declined_by_self())
        .filter_map(|event| {
            let start = normalize(&event.start, options.utc_offset)
                .map_err(|e| debug!(event = event.summary_or("(untitled)"), "skipping event: {e}"))
                .ok()?;
            let end = normalize(&event.end, options.utc_offset).ok()?;
            // A date-only boundary paired with a timestamp carries no usable
            // time of day; such events stay out of slot math entirely.
            if start.all_day || end.all_day {
                return None;
            }
            Some(BusyInterval {
                start: start.instant,
                end: end.instant,
                summary: event.summary_or("Busy").to_string(),
            })
        })
        .collect()
}

/// Compute the availability of `day` given its fetched events.
///
/// Busy intervals are swept in start order with a forward-only cursor;
/// overlapping and contained intervals are absorbed because the cursor
/// never moves backwards. Candidate gaps shorter than the minimum are
/// dropped, not truncated.
pub fn compute(
    events: &[RemoteEvent],
    day: NaiveDate,
    options: &AvailabilityOptions,
) -> DayAvailability {
    let busy = busy_intervals(events, options);
    if busy.is_empty() {
        return DayAvailability::FreeAllDay;
    }

    let candidates = sweep(busy, day, options);
    if candidates.is_empty() {
        return DayAvailability::FullyBooked;
    }

    let min_gap = Duration::minutes(options.min_gap_minutes as i64);
    let slots: Vec<FreeSlot> = candidates
        .into_iter()
        .filter(|slot| slot.end - slot.start >= min_gap)
        .collect();

    if slots.is_empty() {
        DayAvailability::GapsTooShort
    } else {
        DayAvailability::Slots(slots)
    }
}

/// The interval sweep: emit each gap between the cursor and the next busy
/// interval, clamped to the business window.
fn sweep(
    mut busy: Vec<BusyInterval>,
    day: NaiveDate,
    options: &AvailabilityOptions,
) -> Vec<FreeSlot> {
    // Stable sort keeps fetch order for intervals that start together.
    busy.sort_by_key(|interval| interval.start);

    let business_start = at(day, options, options.business_start);
    let business_end = at(day, options, options.business_end);

    let mut slots = Vec::new();
    let mut cursor = business_start;

    // Zero and negative-length intervals occupy no time; skipping them here
    // keeps emitted slots maximal and non-overlapping.
    for interval in busy.iter().filter(|i| i.end > i.start) {
        if cursor < interval.start && cursor < business_end {
            slots.push(FreeSlot::new(cursor, interval.start.min(business_end)));
        }
        cursor = cursor.max(interval.end);
    }

    if cursor < business_end {
        slots.push(FreeSlot::new(cursor, business_end));
    }

    slots
}

fn at(
    day: NaiveDate,
    options: &AvailabilityOptions,
    time: chrono::NaiveTime,
) -> DateTime<FixedOffset> {
    day.and_time(time).and_local_timezone(options.utc_offset).unwrap()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use crate::calendar::types::AttendeeResponse;

    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn options() -> AvailabilityOptions {
        AvailabilityOptions::default()
    }

    fn timed(summary: &str, start: &str, end: &str) -> RemoteEvent {
        RemoteEvent::timed(
            summary,
            format!("2024-03-01T{start}:00Z"),
            format!("2024-03-01T{end}:00Z"),
        )
    }

    fn slot_times(availability: &DayAvailability) -> Vec<(NaiveTime, NaiveTime, i64)> {
        match availability {
            DayAvailability::Slots(slots) => slots
                .iter()
                .map(|s| (s.start.time(), s.end.time(), s.duration_minutes))
                .collect(),
            other => panic!("expected slots, got {other:?}"),
        }
    }

    fn t(hhmm: &str) -> NaiveTime {
        NaiveTime::parse_from_str(hhmm, "%H:%M").unwrap()
    }

    #[test]
    fn test_two_meetings_leave_two_slots() {
        let events = vec![
            timed("Standup", "09:00", "10:00"),
            timed("Review", "11:30", "12:00"),
        ];

        let availability = compute(&events, day(), &options());
        assert_eq!(
            slot_times(&availability),
            vec![(t("10:00"), t("11:30"), 90), (t("12:00"), t("17:00"), 300)]
        );
    }

    #[test]
    fn test_no_events_is_free_all_day() {
        assert_eq!(compute(&[], day(), &options()), DayAvailability::FreeAllDay);
    }

    #[test]
    fn test_all_day_event_alone_is_free_all_day() {
        let events = vec![RemoteEvent::all_day(
            "Conference",
            day(),
            day().succ_opt().unwrap(),
        )];
        assert_eq!(
            compute(&events, day(), &options()),
            DayAvailability::FreeAllDay
        );
    }

    #[test]
    fn test_exact_business_span_is_fully_booked() {
        let events = vec![timed("Offsite", "09:00", "17:00")];
        assert_eq!(
            compute(&events, day(), &options()),
            DayAvailability::FullyBooked
        );
    }

    #[test]
    fn test_short_gaps_are_dropped() {
        let events = vec![
            timed("A", "09:00", "12:50"),
            timed("B", "13:00", "17:00"),
        ];
        assert_eq!(
            compute(&events, day(), &options()),
            DayAvailability::GapsTooShort
        );
    }

    #[test]
    fn test_declined_events_do_not_affect_slots() {
        let events = vec![timed("Busy", "09:00", "10:00")];
        let mut with_declined = events.clone();
        with_declined.push(
            timed("Optional sync", "10:00", "16:00").with_self_response(AttendeeResponse::Declined),
        );

        assert_eq!(
            compute(&events, day(), &options()),
            compute(&with_declined, day(), &options())
        );
    }

    #[test]
    fn test_declined_by_someone_else_still_counts() {
        let mut event = timed("Busy", "10:00", "11:00");
        event.attendees.push(crate::calendar::types::Attendee {
            is_self: false,
            response: AttendeeResponse::Declined,
        });

        let availability = compute(&[event], day(), &options());
        assert_eq!(
            slot_times(&availability),
            vec![(t("09:00"), t("10:00"), 60), (t("11:00"), t("17:00"), 360)]
        );
    }

    #[test]
    fn test_overlapping_intervals_merge() {
        let events = vec![
            timed("A", "10:00", "12:00"),
            timed("B", "11:00", "13:00"),
            timed("C", "11:30", "11:45"),
        ];

        let availability = compute(&events, day(), &options());
        assert_eq!(
            slot_times(&availability),
            vec![(t("09:00"), t("10:00"), 60), (t("13:00"), t("17:00"), 240)]
        );
    }

    #[test]
    fn test_out_of_order_fetch_is_sorted() {
        let events = vec![
            timed("Late", "14:00", "15:00"),
            timed("Early", "09:30", "10:00"),
        ];

        let availability = compute(&events, day(), &options());
        assert_eq!(
            slot_times(&availability),
            vec![
                (t("09:00"), t("09:30"), 30),
                (t("10:00"), t("14:00"), 240),
                (t("15:00"), t("17:00"), 120),
            ]
        );
    }

    #[test]
    fn test_negative_length_interval_is_a_no_op() {
        let events = vec![
            timed("Glitch", "12:00", "11:00"),
            timed("Real", "10:00", "10:30"),
        ];
        let plain = vec![timed("Real", "10:00", "10:30")];

        assert_eq!(
            compute(&events, day(), &options()),
            compute(&plain, day(), &options())
        );
    }

    #[test]
    fn test_zero_length_interval_is_a_no_op() {
        let events = vec![timed("Ping", "10:00", "10:00")];

        let availability = compute(&events, day(), &options());
        assert_eq!(slot_times(&availability), vec![(t("09:00"), t("17:00"), 480)]);
    }

    #[test]
    fn test_event_outside_business_hours_leaves_day_open() {
        let events = vec![timed("Dinner", "18:00", "20:00")];

        let availability = compute(&events, day(), &options());
        assert_eq!(slot_times(&availability), vec![(t("09:00"), t("17:00"), 480)]);
    }

    #[test]
    fn test_event_spanning_business_start_clamps() {
        let events = vec![timed("Breakfast", "08:00", "09:30")];

        let availability = compute(&events, day(), &options());
        assert_eq!(slot_times(&availability), vec![(t("09:30"), t("17:00"), 450)]);
    }

    #[test]
    fn test_malformed_timestamp_excludes_single_event() {
        let mut glitched = RemoteEvent::timed("Glitch", "not-a-time", "also-not");
        glitched.description = Some("imported from a bad feed".to_string());
        let events = vec![glitched, timed("Real", "09:00", "10:00")];

        let availability = compute(&events, day(), &options());
        assert_eq!(slot_times(&availability), vec![(t("10:00"), t("17:00"), 420)]);
    }

    #[test]
    fn test_slots_tile_business_window_with_busy_time() {
        // Union of free slots and clamped busy intervals must cover the
        // window exactly, with free slots pairwise disjoint.
        let events = vec![
            timed("A", "08:30", "09:45"),
            timed("B", "11:00", "11:20"),
            timed("C", "11:10", "12:00"),
            timed("D", "16:30", "18:00"),
        ];
        let opts = AvailabilityOptions {
            min_gap_minutes: 1,
            ..options()
        };

        let slots = match compute(&events, day(), &opts) {
            DayAvailability::Slots(slots) => slots,
            other => panic!("expected slots, got {other:?}"),
        };

        for pair in slots.windows(2) {
            assert!(pair[0].end <= pair[1].start, "free slots overlap");
        }

        let busy = busy_intervals(&events, &opts);
        let free_minutes: i64 = slots.iter().map(|s| s.duration_minutes).sum();
        let mut covered = 0i64;
        let mut cursor = at(day(), &opts, opts.business_start);
        let business_end = at(day(), &opts, opts.business_end);
        let mut sorted = busy.clone();
        sorted.sort_by_key(|b| b.start);
        for interval in sorted {
            let start = interval.start.max(cursor).min(business_end);
            let end = interval.end.max(cursor).min(business_end);
            covered += (end - start).num_minutes();
            cursor = cursor.max(interval.end);
        }
        assert_eq!(free_minutes + covered, 480);
    }
}
