//! Bounded arena of attached-device records.
//!
//! One slot per mounted HID interface, capacity
//! [`MAX_HID_DEVICES`](crate::config::MAX_HID_DEVICES). When the pool
//! is exhausted a newly mounted device is simply not tracked - its
//! reports are ignored until a slot frees up and it re-enumerates.
//! Lookups are a linear scan, which is fine at this capacity.

use crate::config::MAX_HID_DEVICES;
use crate::hid::report_protocol::ParsedDescriptor;
use crate::host::ItfProtocol;

/// Per-attached-interface record.
#[derive(Clone, Debug)]
pub struct DeviceSlot {
    pub address: u8,
    pub instance: u8,
    pub protocol: ItfProtocol,
    pub connected: bool,
    /// Field table from the device's report descriptor, when one was
    /// supplied at mount time and yielded at least one field.
    pub descriptor: Option<ParsedDescriptor>,
    pub has_keyboard: bool,
    pub has_mouse: bool,
}

/// Fixed-capacity pool of device slots.
#[derive(Default)]
pub struct SlotPool {
    slots: [Option<DeviceSlot>; MAX_HID_DEVICES],
}

impl SlotPool {
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; MAX_HID_DEVICES],
        }
    }

    /// Claim a slot for a newly mounted interface.
    ///
    /// Any stale record for the same (address, instance) is released
    /// first, so at most one connected slot exists per pair. Returns
    /// `None` when every slot is taken by a connected device.
    pub fn claim(
        &mut self,
        address: u8,
        instance: u8,
        protocol: ItfProtocol,
    ) -> Option<&mut DeviceSlot> {
        self.release(address, instance);

        let idx = self
            .slots
            .iter()
            .position(|s| !matches!(s, Some(slot) if slot.connected))?;

        self.slots[idx] = Some(DeviceSlot {
            address,
            instance,
            protocol,
            connected: true,
            descriptor: None,
            has_keyboard: false,
            has_mouse: false,
        });
        self.slots[idx].as_mut()
    }

    /// The connected slot for (address, instance), if tracked.
    pub fn find(&self, address: u8, instance: u8) -> Option<&DeviceSlot> {
        self.slots.iter().flatten().find(|slot| {
            slot.connected && slot.address == address && slot.instance == instance
        })
    }

    /// Mark the matching slot disconnected, making it reusable.
    pub fn release(&mut self, address: u8, instance: u8) {
        if let Some(slot) = self.slots.iter_mut().flatten().find(|slot| {
            slot.connected && slot.address == address && slot.instance == instance
        }) {
            slot.connected = false;
        }
    }

    pub fn connected_count(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|slot| slot.connected)
            .count()
    }
}
