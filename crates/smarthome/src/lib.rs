pub mod command;
pub mod config;
pub mod engine;
pub mod explain;
pub mod feedback;
pub mod home;
pub mod render;

pub use command::interpret;
pub use command::Command;
pub use config::Config;
pub use config::ConfigError;
pub use config::LogLevel;
pub use engine::Engine;
pub use engine::InputEvent;
pub use feedback::describe;
pub use feedback::AssistantFeedback;
pub use home::DeviceCollection;
pub use home::DeviceState;
