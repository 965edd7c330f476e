use std::io;
use std::time::Duration;

use tokio::time::Instant;
use tracing::info;
use tracing::warn;

use super::input::InputSurface;
use super::message::InputEvent;
use super::message::InputReceiver;
use crate::command::interpret;
use crate::command::Command;
use crate::config::AssistantConfig;
use crate::feedback::describe;
use crate::feedback::AssistantFeedback;
use crate::feedback::Mood;
use crate::home::DeviceCollection;
use crate::render::Renderer;

/// What handling one input event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The event produced no utterance (blank text, speech outside a listening
    /// window, speech errors...).
    Ignored,

    /// An utterance was interpreted and applied.
    Commanded(Command),

    /// A device panel toggle. `known` is false for ids not in the house.
    Toggled { id: String, known: bool },
}

/// smarthome engine
///
/// Owns the device collection and the assistant feedback, and is the only
/// place either is replaced. Every change goes through `handle_command` or
/// `toggle_device`.
pub struct Engine {
    devices: DeviceCollection,
    feedback: AssistantFeedback,
    mood: Mood,
    input: InputSurface,

    /// How long feedback stays visible after it is shown
    feedback_timeout: Duration,

    /// When the visible feedback should be hidden
    hide_at: Option<Instant>,
}

impl Engine {
    /// Create an engine that greets the user with the configured message.
    pub fn new(devices: DeviceCollection, assistant: &AssistantConfig) -> Self {
        let mut engine = Self {
            devices,
            feedback: AssistantFeedback::greeting(assistant.greeting.clone()),
            mood: Mood::default(),
            input: InputSurface::new(assistant.wake_phrase.as_deref()),
            feedback_timeout: assistant.feedback_timeout(),
            hide_at: None,
        };
        engine.mood = engine.mood.react(&engine.feedback);
        engine.arm_feedback_timer();
        engine
    }

    /// Current device snapshot.
    pub fn devices(&self) -> &DeviceCollection {
        &self.devices
    }

    pub fn feedback(&self) -> &AssistantFeedback {
        &self.feedback
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn is_listening(&self) -> bool {
        self.input.is_listening()
    }

    /// Interpret an utterance and apply it.
    pub fn handle_utterance(&mut self, raw: &str) -> Command {
        let command = interpret(raw);
        self.handle_command(&command);
        command
    }

    /// Apply a command and show feedback for it.
    pub fn handle_command(&mut self, command: &Command) -> &AssistantFeedback {
        self.devices = self.devices.apply(command);

        let description = describe(command);
        info!(
            "Command {:?}: {} {}",
            command.raw,
            description.message,
            description.emoji.symbol()
        );

        self.feedback = AssistantFeedback::shown(description);
        self.mood = self.mood.react(&self.feedback);
        self.arm_feedback_timer();
        &self.feedback
    }

    /// Flip a single device on or off. Returns false if the id is unknown.
    pub fn toggle_device(&mut self, id: &str) -> bool {
        if !self.devices.contains(id) {
            warn!("Cannot toggle unknown device {}", id);
            return false;
        }
        self.devices = self.devices.toggle_by_id(id);
        true
    }

    /// Hide the feedback if its display time is over at `now`.
    ///
    /// Returns true if this call hid it.
    pub fn hide_feedback_if_due(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide_at = None;
                self.feedback.is_visible = false;
                true
            }
            _ => false,
        }
    }

    /// Route one input event.
    pub fn handle_event(&mut self, event: InputEvent) -> Outcome {
        let utterance = match event {
            InputEvent::Text(text) => self.input.typed(&text),
            InputEvent::Transcript(transcript) => self.input.transcript(&transcript),
            InputEvent::StartListening => {
                self.input.start_listening();
                None
            }
            InputEvent::SpeechError(error) => {
                self.input.speech_error(&error);
                None
            }
            InputEvent::SpeechEnded => {
                self.input.speech_ended();
                None
            }
            InputEvent::Toggle(id) => {
                let known = self.toggle_device(&id);
                return Outcome::Toggled { id, known };
            }
        };

        match utterance {
            Some(utterance) => Outcome::Commanded(self.handle_utterance(&utterance)),
            None => Outcome::Ignored,
        }
    }

    /// Run the engine's main event loop
    ///
    /// Events are handled strictly in the order they arrive. The loop ends once
    /// every sender has been dropped, returning the final device collection.
    pub async fn run<R: Renderer>(
        mut self,
        mut rx: InputReceiver,
        renderer: &mut R,
    ) -> io::Result<DeviceCollection> {
        info!("Engine starting");

        renderer.render(&self.devices)?;
        renderer.show_feedback(&self.feedback, self.mood)?;

        loop {
            let deadline = self.hide_at;
            tokio::select! {
                event = rx.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    match self.handle_event(event) {
                        Outcome::Commanded(_) => {
                            renderer.render(&self.devices)?;
                            renderer.show_feedback(&self.feedback, self.mood)?;
                        }
                        Outcome::Toggled { known: true, .. } => {
                            renderer.render(&self.devices)?;
                        }
                        Outcome::Toggled { known: false, .. } | Outcome::Ignored => {}
                    }
                }
                _ = wait_until(deadline) => {
                    if self.hide_feedback_if_due(Instant::now()) {
                        renderer.show_feedback(&self.feedback, self.mood)?;
                    }
                }
            }
        }

        info!("Engine shutting down");
        Ok(self.devices)
    }

    fn arm_feedback_timer(&mut self) {
        self.hide_at = Some(Instant::now() + self.feedback_timeout);
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
