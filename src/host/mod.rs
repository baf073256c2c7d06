//! Host-role subsystem - tracks attached HID devices and turns their
//! raw reports into canonical input events.
//!
//! The USB host transport (PIO-USB + enumeration) is an external
//! collaborator. It is consumed purely through notifications -
//! device mounted, report received, device unmounted - and driven
//! through the [`HostBus`] capability. Everything in this module is
//! host-testable; the embedded wiring in `main.rs` feeds it
//! [`HostEvent`] messages from the transport task.

pub mod classifier;
pub mod slots;

use heapless::Vec;

use crate::config::{MAX_DESCRIPTOR_LEN, MAX_REPORT_LEN, TICK_INTERVAL_US};
use crate::error::Error;
use crate::events::TickInfo;

/// Boot protocol declared by an attached HID interface.
///
/// Composite devices (trackpoint keyboards, vendor HID) declare no
/// protocol; their report layout has to come from the descriptor or
/// from length heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ItfProtocol {
    None,
    Keyboard,
    Mouse,
}

impl ItfProtocol {
    /// From the interface descriptor's bInterfaceProtocol value.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => ItfProtocol::Keyboard,
            2 => ItfProtocol::Mouse,
            _ => ItfProtocol::None,
        }
    }
}

/// Capability handed to the classifier for calling back into the
/// transport.
pub trait HostBus {
    /// Arm the interface to deliver its next report. Returns `false`
    /// when the transport could not schedule the transfer.
    fn request_next_report(&mut self, address: u8, instance: u8) -> bool;
}

/// Notification from the host transport, as delivered over the
/// transport → pipeline channel in the embedded build.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    Mount {
        address: u8,
        instance: u8,
        protocol: ItfProtocol,
        descriptor: Vec<u8, MAX_DESCRIPTOR_LEN>,
    },
    Report {
        address: u8,
        instance: u8,
        data: Vec<u8, MAX_REPORT_LEN>,
    },
    Unmount {
        address: u8,
        instance: u8,
    },
}

impl HostEvent {
    /// Build a mount notification from transport-owned buffers.
    ///
    /// A descriptor longer than [`MAX_DESCRIPTOR_LEN`] is a device we
    /// cannot parse anyway; the transport should treat the error as
    /// fatal for that interface.
    pub fn mount(
        address: u8,
        instance: u8,
        protocol: ItfProtocol,
        descriptor: &[u8],
    ) -> Result<Self, Error> {
        Ok(HostEvent::Mount {
            address,
            instance,
            protocol,
            descriptor: Vec::from_slice(descriptor).map_err(|()| Error::PayloadTooLarge)?,
        })
    }

    /// Build a report notification from a transport-owned buffer.
    pub fn report(address: u8, instance: u8, data: &[u8]) -> Result<Self, Error> {
        Ok(HostEvent::Report {
            address,
            instance,
            data: Vec::from_slice(data).map_err(|()| Error::PayloadTooLarge)?,
        })
    }
}

/// Produces one tick per millisecond from a wrapping 32-bit
/// microsecond clock, independent of device activity.
#[derive(Default)]
pub struct TickSource {
    last_us: u32,
    count: u32,
}

impl TickSource {
    pub const fn new() -> Self {
        Self { last_us: 0, count: 0 }
    }

    /// Poll the clock; returns a tick when at least 1 ms has elapsed
    /// since the previous one.
    pub fn poll(&mut self, now_us: u32) -> Option<TickInfo> {
        let delta_us = now_us.wrapping_sub(self.last_us);
        if delta_us < TICK_INTERVAL_US {
            return None;
        }
        self.last_us = now_us;
        self.count = self.count.wrapping_add(1);
        Some(TickInfo {
            count: self.count,
            delta_us,
        })
    }
}
