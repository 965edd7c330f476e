//! Configuration file parsing and structures.
//!
//! smarthome reads an optional TOML file. Every section has defaults, so an
//! empty file (or no file at all) gives the built-in house with the standard
//! assistant settings.

use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use tracing_subscriber::filter::LevelFilter;

use crate::home::seed_collection;
use crate::home::Control;
use crate::home::DeviceCollection;
use crate::home::DeviceState;
use crate::home::DeviceType;
use crate::home::Room;
use crate::home::MAX_BRIGHTNESS;
use crate::home::MAX_SPEED;

pub const DEFAULT_WAKE_PHRASE: &str = "hey home";
pub const DEFAULT_FEEDBACK_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_GREETING: &str =
    "Welcome to your Smart Home! Try saying \"Turn on living room lights\"";

/// Top-level configuration structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Replaces the built-in devices when present.
    #[serde(default)]
    pub devices: Option<Vec<DeviceEntry>>,
}

/// One `[[devices]]` table.
///
/// Brightness and speed are both optional here so that a value given for
/// the wrong kind of device reaches validation instead of being dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DeviceEntry {
    pub id: String,
    pub room: Room,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub name: String,
    #[serde(default)]
    pub is_on: bool,
    pub brightness: Option<u8>,
    pub speed: Option<u8>,
}

impl DeviceEntry {
    /// Build the device, or list why this entry does not describe one.
    pub fn to_device(&self) -> Result<DeviceState, Vec<String>> {
        let mut errors = Vec::new();

        if self.device_type != DeviceType::Light && self.brightness.is_some() {
            errors.push(format!("brightness is only valid for lights, not a {}", self.device_type));
        }
        if self.device_type != DeviceType::Fan && self.speed.is_some() {
            errors.push(format!("speed is only valid for fans, not a {}", self.device_type));
        }

        let control = match self.device_type {
            DeviceType::Light => match self.brightness {
                Some(brightness) if brightness > MAX_BRIGHTNESS => {
                    errors.push(format!("brightness {} is above {}", brightness, MAX_BRIGHTNESS));
                    None
                }
                Some(brightness) => Some(Control::Light { brightness }),
                None => {
                    errors.push("brightness is required for a light".to_string());
                    None
                }
            },
            DeviceType::Fan => match self.speed {
                Some(speed) if speed > MAX_SPEED => {
                    errors.push(format!("speed {} is above {}", speed, MAX_SPEED));
                    None
                }
                Some(speed) => Some(Control::Fan { speed }),
                None => {
                    errors.push("speed is required for a fan".to_string());
                    None
                }
            },
            DeviceType::Switch => Some(Control::Switch),
        };

        match control {
            Some(control) if errors.is_empty() => Ok(DeviceState {
                id: self.id.clone(),
                room: self.room,
                name: self.name.clone(),
                is_on: self.is_on,
                control,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default)]
    pub level: LogLevel,

    /// Per-target levels, e.g. "smarthome::home" = "debug"
    #[serde(default)]
    pub overrides: HashMap<String, LogLevel>,
}

/// Voice assistant behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Phrase that opens a listening window for speech. An empty phrase
    /// means every transcript is treated as a command.
    pub wake_phrase: Option<String>,

    /// How long feedback stays visible, in milliseconds
    pub feedback_timeout_ms: u64,

    /// Feedback shown at startup
    pub greeting: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            wake_phrase: Some(DEFAULT_WAKE_PHRASE.to_string()),
            feedback_timeout_ms: DEFAULT_FEEDBACK_TIMEOUT_MS,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

impl AssistantConfig {
    pub fn feedback_timeout(&self) -> Duration {
        Duration::from_millis(self.feedback_timeout_ms)
    }
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().to_path_buf(), e))?;

        contents.parse()
    }

    /// Load `path` if given, else `default_path` if it exists, else defaults.
    pub fn load(path: Option<&Path>, default_path: &Path) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if default_path.exists() => Self::from_file(default_path),
            None => Ok(Self::default()),
        }
    }

    /// The devices the house starts with.
    pub fn device_collection(&self) -> DeviceCollection {
        match &self.devices {
            // Entries that fail validation never get this far through `parse`.
            Some(devices) => devices
                .iter()
                .filter_map(|entry| entry.to_device().ok())
                .collect(),
            None => seed_collection(),
        }
    }

    /// Validate the configuration, reporting every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.assistant.feedback_timeout_ms == 0 {
            errors.push("assistant.feedback_timeout_ms must be greater than zero".to_string());
        }

        if let Some(devices) = &self.devices {
            if devices.is_empty() {
                errors.push("devices must list at least one device".to_string());
            }

            let mut seen = HashSet::new();
            for (idx, device) in devices.iter().enumerate() {
                if device.id.trim().is_empty() {
                    errors.push(format!("devices[{}].id must not be empty", idx));
                } else if !seen.insert(device.id.as_str()) {
                    errors.push(format!("devices[{}].id '{}' is a duplicate", idx, device.id));
                }

                if let Err(problems) = device.to_device() {
                    errors.extend(
                        problems
                            .into_iter()
                            .map(|problem| format!("devices[{}].{}", idx, problem)),
                    );
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration:\n  {}", .0.join("\n  "))]
    Validation(Vec<String>),
}
