//! Structured commands and the rule-based interpreter that produces them from
//! free-text utterances.

mod interpreter;
mod rules;


use std::fmt;

use serde::Serialize;
use serde::Serializer;
use strum::Display;

use crate::home::DeviceType;
use crate::home::Room;

pub use interpreter::interpret;
pub use interpreter::interpret_with_matches;
pub use interpreter::Interpretation;
pub use interpreter::MatchKind;
pub use interpreter::RuleMatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    TurnOn,
    TurnOff,
    Increase,
    Decrease,
    Set,
    Status,
}

/// Which device types a command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceTarget {
    /// Every device type.
    All,
    Only(DeviceType),
}

/// An explicit room filter. A command with no room filter at all carries
/// `None` rather than `RoomTarget::All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomTarget {
    /// The user asked for every room.
    All,
    Only(Room),
}

impl fmt::Display for DeviceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceTarget::All => write!(f, "all"),
            DeviceTarget::Only(device_type) => write!(f, "{}", device_type),
        }
    }
}

impl fmt::Display for RoomTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomTarget::All => write!(f, "all"),
            RoomTarget::Only(room) => write!(f, "{}", room),
        }
    }
}

impl Serialize for DeviceTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for RoomTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The structured reading of one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub action: Action,
    pub device: DeviceTarget,

    /// `None` means no room was mentioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomTarget>,

    /// Number taken from a percentage in the utterance, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,

    /// The utterance exactly as received.
    pub raw: String,
}
