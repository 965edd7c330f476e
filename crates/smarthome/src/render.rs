//! Text presentation of device state and assistant feedback.
//!
//! Renderers only read snapshots; nothing flows back into the engine.

use std::fmt::Write as _;
use std::io;
use std::io::Write;

use strum::IntoEnumIterator;

use crate::feedback::AssistantFeedback;
use crate::feedback::Mood;
use crate::home::Control;
use crate::home::DeviceCollection;
use crate::home::DeviceState;
use crate::home::DeviceType;
use crate::home::Room;

pub trait Renderer {
    fn render(&mut self, devices: &DeviceCollection) -> io::Result<()>;

    fn show_feedback(&mut self, feedback: &AssistantFeedback, mood: Mood) -> io::Result<()>;
}

/// Writes the device panel and feedback bubble as plain lines.
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, devices: &DeviceCollection) -> io::Result<()> {
        write!(self.out, "{}", device_panel(devices))?;
        self.out.flush()
    }

    fn show_feedback(&mut self, feedback: &AssistantFeedback, mood: Mood) -> io::Result<()> {
        if let Some(line) = feedback_line(feedback, mood) {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }
}

pub fn device_icon(device_type: DeviceType) -> &'static str {
    match device_type {
        DeviceType::Light => "💡",
        DeviceType::Fan => "💨",
        DeviceType::Switch => "🔌",
    }
}

/// Devices grouped by room, rooms in house order, empty rooms skipped.
pub fn device_panel(devices: &DeviceCollection) -> String {
    let mut out = String::new();
    for room in Room::iter() {
        let mut in_room = devices.in_room(room).peekable();
        if in_room.peek().is_none() {
            continue;
        }

        let _ = writeln!(out, "{} Room", title_case(room));
        for device in in_room {
            let _ = writeln!(out, "  {}", device_line(device));
        }
    }
    out
}

fn device_line(device: &DeviceState) -> String {
    let power = if device.is_on { "ON" } else { "OFF" };
    let detail = match device.control {
        Control::Light { brightness } => format!(" ({}%)", brightness),
        Control::Fan { speed } => format!(" (speed {})", speed),
        Control::Switch => String::new(),
    };
    format!(
        "{} {}: {}{}",
        device_icon(device.device_type()),
        device.name,
        power,
        detail
    )
}

/// `None` while the feedback is hidden.
pub fn feedback_line(feedback: &AssistantFeedback, mood: Mood) -> Option<String> {
    if !feedback.is_visible {
        return None;
    }
    Some(format!(
        "{} {} {}",
        mood.face(),
        feedback.message,
        feedback.emoji.symbol()
    ))
}

fn title_case(room: Room) -> String {
    let name = room.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Emoji;
    use crate::home::seed_collection;

    #[test]
    fn test_seed_panel() {
        insta::assert_snapshot!(device_panel(&seed_collection()), @r"
        Living Room
          💨 Living Room Fan: OFF (speed 1)
          💡 Living Room Light: OFF (100%)
        Kitchen Room
          💡 Kitchen Light: OFF (100%)
          🔌 Kitchen Outlet: OFF
        Bedroom Room
          💨 Bedroom Fan: OFF (speed 1)
          💡 Bedroom Light: OFF (80%)
        Bathroom Room
          💡 Bathroom Light: OFF (100%)
        ");
    }

    #[test]
    fn test_empty_rooms_are_skipped() {
        let devices: DeviceCollection = [DeviceState::switch("s", Room::Kitchen, "Outlet")]
            .into_iter()
            .collect();
        let devices = devices.toggle_by_id("s");
        assert_eq!(device_panel(&devices), "Kitchen Room\n  🔌 Outlet: ON\n");
    }

    #[test]
    fn test_feedback_line() {
        let feedback = AssistantFeedback {
            message: "Turning on lights".to_string(),
            emoji: Emoji::LightBulb,
            is_visible: true,
        };
        assert_eq!(
            feedback_line(&feedback, Mood::Excited).as_deref(),
            Some("😃 Turning on lights 💡")
        );

        let hidden = AssistantFeedback {
            is_visible: false,
            ..feedback
        };
        assert_eq!(feedback_line(&hidden, Mood::Excited), None);
    }

    #[test]
    fn test_text_renderer_writes_lines() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer
            .show_feedback(&AssistantFeedback::greeting("Hello"), Mood::Happy)
            .unwrap();
        let written = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(written, "😊 Hello 👋\n");
    }
}
