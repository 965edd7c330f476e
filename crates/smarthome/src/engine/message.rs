//! Events delivered to the engine by its input sources.
//!
//! Typed text and the device panel are synchronous UI sources; speech arrives
//! through callbacks at arbitrary times. All of them funnel into one ordered
//! channel so the engine stays the single writer of device state.

use tokio::sync::mpsc;

/// Capacity for the input→engine channel.
/// Input sources wait when the engine falls this far behind.
pub const INPUT_CHANNEL_SIZE: usize = 64;

pub type InputSender = mpsc::Sender<InputEvent>;
pub type InputReceiver = mpsc::Receiver<InputEvent>;

pub fn input_channel() -> (InputSender, InputReceiver) {
    mpsc::channel(INPUT_CHANNEL_SIZE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A command typed into the text box.
    Text(String),

    /// A speech-to-text result.
    Transcript(String),

    /// The microphone button was pressed.
    StartListening,

    /// Speech capture failed (permission denied, no speech, unsupported...).
    SpeechError(String),

    /// Speech capture stopped.
    SpeechEnded,

    /// A device was clicked in the device panel.
    Toggle(String),
}
