//! Device model and the reducers that move it from one snapshot to the next.

mod device;
mod seed;
mod store;


pub use device::Control;
pub use device::DeviceState;
pub use device::DeviceType;
pub use device::Room;
pub use device::BRIGHTNESS_STEP;
pub use device::MAX_BRIGHTNESS;
pub use device::MAX_SPEED;
pub use seed::seed_collection;
pub use seed::seed_devices;
pub use store::is_selected;
pub use store::DeviceCollection;
