//! Configuration for the valet assistant.

mod settings;

pub use settings::{CalendarConfig, Config, IntegrationsConfig, TasksConfig};
