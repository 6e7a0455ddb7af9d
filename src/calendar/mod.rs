//! Calendar availability engine and event validation.
//!
//! Events are fetched fresh from an external source on every call; this
//! module owns the math and validation in between, never the data.

pub mod availability;
pub mod normalize;
pub mod types;
pub mod validate;

pub use normalize::{normalize, parse_instant, NormalizedTime};
pub use types::{
    Attendee, AttendeeResponse, AvailabilityOptions, BusyInterval, DayAvailability, EventTime,
    FreeSlot, NewEvent, RemoteEvent,
};
pub use validate::{validate_event_request, EventShape};
