use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;
use tracing::info;

use super::device::Control;
use super::device::DeviceState;
use super::device::Room;
use super::device::BRIGHTNESS_STEP;
use super::device::MAX_BRIGHTNESS;
use super::device::MAX_SPEED;
use crate::command::Action;
use crate::command::Command;
use crate::command::DeviceTarget;
use crate::command::RoomTarget;

/// Every device in the house, keyed by id.
///
/// Collections are values: `apply` and `toggle_by_id` return a new collection
/// and leave the receiver untouched, so a caller can hold on to any snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeviceCollection {
    devices: BTreeMap<String, DeviceState>,
}

impl DeviceCollection {
    pub fn get(&self, id: &str) -> Option<&DeviceState> {
        self.devices.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.devices.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Devices in id order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceState> {
        self.devices.values()
    }

    pub fn in_room(&self, room: Room) -> impl Iterator<Item = &DeviceState> {
        self.iter().filter(move |d| d.room == room)
    }

    /// Apply a command to every device it selects.
    ///
    /// Devices outside the selection are carried over unchanged.
    pub fn apply(&self, command: &Command) -> DeviceCollection {
        info!(
            action = %command.action,
            device = %command.device,
            room = ?command.room,
            "Applying command"
        );

        let devices = self
            .devices
            .iter()
            .map(|(id, device)| {
                let next = if is_selected(command, device) {
                    apply_action(device, command.action)
                } else {
                    device.clone()
                };
                if next != *device {
                    debug!("Device {} changed: {:?} -> {:?}", id, device, next);
                }
                (id.clone(), next)
            })
            .collect();

        DeviceCollection { devices }
    }

    /// Flip `is_on` for a single device.
    ///
    /// Unknown ids leave the collection as it was.
    pub fn toggle_by_id(&self, id: &str) -> DeviceCollection {
        let mut next = self.clone();
        if let Some(device) = next.devices.get_mut(id) {
            device.is_on = !device.is_on;
            info!("Toggled {} -> on={}", id, device.is_on);
        } else {
            debug!("Toggle ignored, no device with id {}", id);
        }
        next
    }
}

impl FromIterator<DeviceState> for DeviceCollection {
    /// Later devices replace earlier ones with the same id.
    fn from_iter<I: IntoIterator<Item = DeviceState>>(iter: I) -> Self {
        let devices = iter
            .into_iter()
            .map(|device| (device.id.clone(), device))
            .collect();
        DeviceCollection { devices }
    }
}

/// Whether `command` affects `device`.
///
/// An absent room and the `all` room both leave the room unfiltered.
pub fn is_selected(command: &Command, device: &DeviceState) -> bool {
    let matches_device = match command.device {
        DeviceTarget::All => true,
        DeviceTarget::Only(device_type) => device.device_type() == device_type,
    };
    let matches_room = match command.room {
        None | Some(RoomTarget::All) => true,
        Some(RoomTarget::Only(room)) => device.room == room,
    };
    matches_device && matches_room
}

fn apply_action(device: &DeviceState, action: Action) -> DeviceState {
    let mut next = device.clone();
    match action {
        Action::TurnOn => next.is_on = true,
        Action::TurnOff => next.is_on = false,
        Action::Increase => match &mut next.control {
            Control::Light { brightness } => {
                *brightness = brightness.saturating_add(BRIGHTNESS_STEP).min(MAX_BRIGHTNESS);
                next.is_on = true;
            }
            Control::Fan { speed } => {
                *speed = speed.saturating_add(1).min(MAX_SPEED);
                next.is_on = true;
            }
            Control::Switch => {}
        },
        Action::Decrease => match &mut next.control {
            Control::Light { brightness } => {
                *brightness = brightness.saturating_sub(BRIGHTNESS_STEP);
                next.is_on = *brightness > 0;
            }
            Control::Fan { speed } => {
                *speed = speed.saturating_sub(1);
                next.is_on = *speed > 0;
            }
            Control::Switch => {}
        },
        // Reserved: neither reads nor writes device state yet.
        Action::Set | Action::Status => {}
    }
    next
}
