//! Ordered rule tables for the interpreter.
//!
//! Each table is scanned top to bottom and the first entry that matches wins,
//! so the order of entries is part of the behaviour. Matching is done on
//! lower-cased text and is substring based: "start" also matches "restart".

use super::Action;
use crate::home::DeviceType;
use crate::home::Room;

pub(crate) struct ActionRule {
    pub action: Action,
    pub pattern: &'static str,
}

/// Falls back to `Action::Status` when nothing matches.
pub(crate) const ACTION_RULES: &[ActionRule] = &[
    ActionRule {
        action: Action::TurnOn,
        pattern: r"(turn|switch) on|activate|start",
    },
    ActionRule {
        action: Action::TurnOff,
        pattern: r"(turn|switch) off|deactivate|stop",
    },
    ActionRule {
        action: Action::Increase,
        pattern: r"increase|raise|higher|brighter|faster",
    },
    ActionRule {
        action: Action::Decrease,
        pattern: r"decrease|lower|dimmer|slower",
    },
    ActionRule {
        action: Action::Set,
        pattern: r"set|change|make",
    },
];

pub(crate) const DEVICE_SYNONYMS: &[(&str, DeviceType)] = &[
    ("light", DeviceType::Light),
    ("lights", DeviceType::Light),
    ("lamp", DeviceType::Light),
    ("lamps", DeviceType::Light),
    ("fan", DeviceType::Fan),
    ("fans", DeviceType::Fan),
    ("switch", DeviceType::Switch),
    ("switches", DeviceType::Switch),
];

/// Checked before `ROOM_SYNONYMS`.
pub(crate) const ALL_ROOMS_PHRASE: &str = "all rooms";

pub(crate) const ROOM_SYNONYMS: &[(&str, Room)] = &[
    ("living", Room::Living),
    ("living room", Room::Living),
    ("kitchen", Room::Kitchen),
    ("bedroom", Room::Bedroom),
    ("bathroom", Room::Bathroom),
];

/// A run of digits followed by a percent sign or the word "percent".
/// Only the digits are captured.
pub(crate) const VALUE_PATTERN: &str = r"(?i)([0-9]+)\s*(%|percent)";
