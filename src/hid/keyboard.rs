//! Keyboard report - inbound boot layout and outbound wire format.
//!
//! Inbound (from an attached keyboard, 8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```
//!
//! Outbound (to the downstream host, 17 bytes): the combined
//! interface advertises an NKRO-style bitmap instead of the 6-slot
//! array, so every pressed key becomes one set bit:
//! ```text
//! Byte 0:    Report ID (2)
//! Byte 1:    Modifier keys (same bitfield as above)
//! Byte 2-15: 112-bit key bitmap, bit index = keycode - 0x04,
//!            covering keycodes 0x04..=0x73
//! Byte 16:   Reserved usages / padding (always 0)
//! ```
//! A release is an all-zero bitmap with the current modifier state.

use crate::config::{KEYBOARD_WIRE_LEN, REPORT_ID_KEYBOARD};

/// Boot-protocol keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Canonical keyboard state: the payload of keyboard events.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            keycodes: [0; 6],
        }
    }

    /// Parse from a boot-protocol report as delivered by an attached
    /// keyboard. The reserved byte at index 1 is skipped.
    pub fn from_boot_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < KEYBOARD_REPORT_SIZE {
            return None;
        }
        Some(Self {
            modifier: data[0],
            keycodes: [data[2], data[3], data[4], data[5], data[6], data[7]],
        })
    }

    /// Serialise into the outbound bitmap wire format.
    /// Returns the number of bytes written (17), or 0 when `buf` is
    /// too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_WIRE_LEN {
            return 0;
        }
        buf[..KEYBOARD_WIRE_LEN].fill(0);
        buf[0] = REPORT_ID_KEYBOARD;
        buf[1] = self.modifier;
        for &keycode in &self.keycodes {
            if (0x04..=0x73).contains(&keycode) {
                let bit = keycode - 0x04;
                buf[2 + (bit / 8) as usize] |= 1 << (bit % 8);
            }
        }
        KEYBOARD_WIRE_LEN
    }

    /// Returns `true` if no keys and no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}
