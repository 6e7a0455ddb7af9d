//! Configuration settings for the valet assistant.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::utils::{parse_hhmm, parse_utc_offset};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calendar: CalendarConfig,
    pub tasks: TasksConfig,
    pub integrations: IntegrationsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calendar: CalendarConfig::default(),
            tasks: TasksConfig::default(),
            integrations: IntegrationsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            // Current directory
            PathBuf::from("valet.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("valet/config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".valet/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if parse_utc_offset(&self.calendar.timezone).is_none() {
            return Err(ConfigError::Invalid(format!(
                "calendar.timezone must be a UTC offset like +00:00, got {:?}",
                self.calendar.timezone
            ))
            .into());
        }

        let start = parse_hhmm(&self.calendar.business_start).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "calendar.business_start must be HH:MM, got {:?}",
                self.calendar.business_start
            ))
        })?;
        let end = parse_hhmm(&self.calendar.business_end).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "calendar.business_end must be HH:MM, got {:?}",
                self.calendar.business_end
            ))
        })?;
        if start >= end {
            return Err(ConfigError::Invalid(
                "calendar.business_start must be before calendar.business_end".to_string(),
            )
            .into());
        }

        if self.calendar.min_gap_minutes == 0 {
            return Err(
                ConfigError::Invalid("calendar.min_gap_minutes must be > 0".to_string()).into(),
            );
        }

        if self.tasks.data_file.trim().is_empty() {
            return Err(ConfigError::Invalid("tasks.data_file must be set".to_string()).into());
        }

        Ok(())
    }
}

/// Calendar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Fixed UTC offset applied to event creation and to timestamps that
    /// arrive without one, as `±HH:MM`. No timezone database is consulted.
    pub timezone: String,
    /// Start of business hours (`HH:MM`).
    pub business_start: String,
    /// End of business hours (`HH:MM`).
    pub business_end: String,
    /// Free gaps shorter than this many minutes are not reported.
    pub min_gap_minutes: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: "+00:00".to_string(),
            business_start: "09:00".to_string(),
            business_end: "17:00".to_string(),
            min_gap_minutes: 15,
        }
    }
}

impl CalendarConfig {
    /// The configured zone as a fixed offset. Validated at load time.
    pub fn utc_offset(&self) -> FixedOffset {
        parse_utc_offset(&self.timezone).unwrap_or_else(|| FixedOffset::east_opt(0).unwrap())
    }

    /// Start of business hours. Validated at load time.
    pub fn business_start_time(&self) -> NaiveTime {
        parse_hhmm(&self.business_start).unwrap_or_else(|| NaiveTime::from_hms_opt(9, 0, 0).unwrap())
    }

    /// End of business hours. Validated at load time.
    pub fn business_end_time(&self) -> NaiveTime {
        parse_hhmm(&self.business_end).unwrap_or_else(|| NaiveTime::from_hms_opt(17, 0, 0).unwrap())
    }
}

/// Task store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// Path of the persisted task collection. Tilde-expanded.
    pub data_file: String,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            data_file: "tasks_data.json".to_string(),
        }
    }
}

impl TasksConfig {
    /// Expanded path of the task data file.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_file).as_ref())
    }
}

/// Which external collaborators are configured. The concrete clients live
/// outside this crate; the core only ever consults these flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    /// Google Calendar credentials are present.
    pub google_calendar: bool,
    /// Gmail credentials are present.
    pub gmail: bool,
    /// A Home Assistant endpoint and token are configured.
    pub home_assistant: bool,
}
