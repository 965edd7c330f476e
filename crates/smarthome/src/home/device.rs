use serde::Deserialize;
use serde::Serialize;
use strum::Display;
use strum::EnumIter;

/// Brightness ceiling for lights, in percent.
pub const MAX_BRIGHTNESS: u8 = 100;

/// Amount a single increase/decrease moves a light's brightness.
pub const BRIGHTNESS_STEP: u8 = 20;

/// Highest fan speed setting.
pub const MAX_SPEED: u8 = 3;

/// A room of the house. Every device lives in exactly one.
///
/// Declaration order is the order rooms are listed in the device panel.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Room {
    Living,
    Kitchen,
    Bedroom,
    Bathroom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceType {
    Light,
    Fan,
    Switch,
}

/// Type-specific device state.
///
/// Only lights carry a brightness and only fans carry a speed; a switch is
/// just on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Control {
    Light { brightness: u8 },
    Fan { speed: u8 },
    Switch,
}

impl Control {
    pub fn device_type(&self) -> DeviceType {
        match self {
            Control::Light { .. } => DeviceType::Light,
            Control::Fan { .. } => DeviceType::Fan,
            Control::Switch => DeviceType::Switch,
        }
    }
}

/// State of a single simulated device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceState {
    /// Stable identifier, unique within a collection.
    pub id: String,

    pub room: Room,

    /// Display label.
    pub name: String,

    /// Sole source of truth for on/off rendering.
    #[serde(default)]
    pub is_on: bool,

    #[serde(flatten)]
    pub control: Control,
}

impl DeviceState {
    pub fn light(id: impl Into<String>, room: Room, name: impl Into<String>, brightness: u8) -> Self {
        Self::new(id, room, name, Control::Light { brightness })
    }

    pub fn fan(id: impl Into<String>, room: Room, name: impl Into<String>, speed: u8) -> Self {
        Self::new(id, room, name, Control::Fan { speed })
    }

    pub fn switch(id: impl Into<String>, room: Room, name: impl Into<String>) -> Self {
        Self::new(id, room, name, Control::Switch)
    }

    fn new(id: impl Into<String>, room: Room, name: impl Into<String>, control: Control) -> Self {
        Self {
            id: id.into(),
            room,
            name: name.into(),
            is_on: false,
            control,
        }
    }

    pub fn device_type(&self) -> DeviceType {
        self.control.device_type()
    }

    /// Brightness in percent, lights only.
    pub fn brightness(&self) -> Option<u8> {
        match self.control {
            Control::Light { brightness } => Some(brightness),
            _ => None,
        }
    }

    /// Fan speed setting, fans only.
    pub fn speed(&self) -> Option<u8> {
        match self.control {
            Control::Fan { speed } => Some(speed),
            _ => None,
        }
    }
}
