mod engine;
mod input;
mod message;

#[cfg(test)]
mod tests;

pub use engine::Engine;
pub use engine::Outcome;
pub use input::InputSurface;
pub use message::input_channel;
pub use message::InputEvent;
pub use message::InputReceiver;
pub use message::InputSender;
pub use message::INPUT_CHANNEL_SIZE;
