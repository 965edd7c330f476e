//! Human-readable acknowledgements for processed commands.

use serde::Serialize;
use strum::Display;

use crate::command::Action;
use crate::command::Command;
use crate::command::DeviceTarget;
use crate::command::RoomTarget;
use crate::home::DeviceType;

/// Symbolic emoji codes. `symbol()` gives the glyph to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Emoji {
    LightBulb,
    NewMoon,
    Wind,
    Muted,
    Plug,
    HighVoltage,
    CheckMark,
    CrossMark,
    WavingHand,
}

impl Emoji {
    pub fn symbol(self) -> &'static str {
        match self {
            Emoji::LightBulb => "💡",
            Emoji::NewMoon => "🌑",
            Emoji::Wind => "💨",
            Emoji::Muted => "🔇",
            Emoji::Plug => "🔌",
            Emoji::HighVoltage => "⚡",
            Emoji::CheckMark => "✅",
            Emoji::CrossMark => "❌",
            Emoji::WavingHand => "👋",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub message: String,
    pub emoji: Emoji,
}

/// Describe what a command is about to do.
pub fn describe(command: &Command) -> Description {
    Description {
        message: message_for(command),
        emoji: emoji_for(command),
    }
}

fn action_verb(action: Action) -> &'static str {
    match action {
        Action::TurnOn => "Turning on",
        Action::TurnOff => "Turning off",
        Action::Increase => "Increasing",
        Action::Decrease => "Decreasing",
        Action::Set => "Setting",
        Action::Status => "Checking status of",
    }
}

fn message_for(command: &Command) -> String {
    // Plurals are a bare "s" suffix: "switch" becomes "switchs".
    let device_text = match command.device {
        DeviceTarget::All => "all devices".to_string(),
        DeviceTarget::Only(device_type) => format!("{}s", device_type),
    };
    let location = match command.room {
        None => String::new(),
        Some(RoomTarget::All) => " in all rooms".to_string(),
        Some(RoomTarget::Only(room)) => format!(" in the {} room", room),
    };
    format!("{} {}{}", action_verb(command.action), device_text, location)
}

fn emoji_for(command: &Command) -> Emoji {
    let on = command.action == Action::TurnOn;
    match (command.device, on) {
        (DeviceTarget::Only(DeviceType::Light), true) => Emoji::LightBulb,
        (DeviceTarget::Only(DeviceType::Light), false) => Emoji::NewMoon,
        (DeviceTarget::Only(DeviceType::Fan), true) => Emoji::Wind,
        (DeviceTarget::Only(DeviceType::Fan), false) => Emoji::Muted,
        (DeviceTarget::Only(DeviceType::Switch), true) => Emoji::Plug,
        (DeviceTarget::Only(DeviceType::Switch), false) => Emoji::HighVoltage,
        (DeviceTarget::All, true) => Emoji::CheckMark,
        (DeviceTarget::All, false) => Emoji::CrossMark,
    }
}

/// The feedback bubble: the latest description and whether it is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantFeedback {
    pub message: String,
    pub emoji: Emoji,
    pub is_visible: bool,
}

impl AssistantFeedback {
    pub fn shown(description: Description) -> Self {
        Self {
            message: description.message,
            emoji: description.emoji,
            is_visible: true,
        }
    }

    pub fn greeting(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            emoji: Emoji::WavingHand,
            is_visible: true,
        }
    }
}

/// The assistant's expression, picked from the text of what it last said.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mood {
    #[default]
    Happy,
    Thinking,
    Confused,
    Excited,
}

impl Mood {
    pub fn for_message(message: &str) -> Mood {
        if message.contains("didn't understand") {
            Mood::Confused
        } else if message.contains("Turning on") {
            Mood::Excited
        } else if message.contains("Checking") {
            Mood::Thinking
        } else {
            Mood::Happy
        }
    }

    /// Mood after `feedback` arrives. Hidden feedback keeps the current mood.
    pub fn react(self, feedback: &AssistantFeedback) -> Mood {
        if feedback.is_visible {
            Mood::for_message(&feedback.message)
        } else {
            self
        }
    }

    pub fn face(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Thinking => "💭",
            Mood::Confused => "🤔",
            Mood::Excited => "😃",
        }
    }
}
