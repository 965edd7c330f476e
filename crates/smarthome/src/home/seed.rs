use super::device::DeviceState;
use super::device::Room;
use super::store::DeviceCollection;

/// The devices a fresh house starts with: at least one per room, all off.
pub fn seed_devices() -> Vec<DeviceState> {
    vec![
        DeviceState::light("light_living", Room::Living, "Living Room Light", 100),
        DeviceState::fan("fan_living", Room::Living, "Living Room Fan", 1),
        DeviceState::light("light_kitchen", Room::Kitchen, "Kitchen Light", 100),
        DeviceState::switch("switch_kitchen", Room::Kitchen, "Kitchen Outlet"),
        DeviceState::light("light_bedroom", Room::Bedroom, "Bedroom Light", 80),
        DeviceState::fan("fan_bedroom", Room::Bedroom, "Bedroom Fan", 1),
        DeviceState::light("light_bathroom", Room::Bathroom, "Bathroom Light", 100),
    ]
}

pub fn seed_collection() -> DeviceCollection {
    seed_devices().into_iter().collect()
}
