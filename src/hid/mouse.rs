//! Mouse report - inbound boot layout and outbound wire format.
//!
//! Inbound (from an attached mouse, 3-4 bytes):
//! ```text
//! Byte 0: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle
//! Byte 1: X displacement (signed, -127..127)
//! Byte 2: Y displacement (signed, -127..127)
//! Byte 3: Scroll wheel  (signed, optional)
//! ```
//!
//! Outbound (to the downstream host, 10 bytes): the combined
//! interface advertises 16-bit axes, so the 8-bit inbound deltas are
//! sign-extended:
//! ```text
//! Byte 0:   Report ID (1)
//! Byte 1:   Button bitfield (8 buttons)
//! Byte 2-3: X delta,  i16 little-endian
//! Byte 4-5: Y delta,  i16 little-endian
//! Byte 6-7: Wheel,    i16 little-endian
//! Byte 8-9: AC Pan,   reserved, always 0
//! ```

use crate::config::{MOUSE_WIRE_LEN, REPORT_ID_MOUSE};

/// Boot-protocol mouse report size in bytes (with wheel).
pub const MOUSE_REPORT_SIZE: usize = 4;

/// Canonical mouse state: the payload of mouse events.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield (bit 0 = left, bit 1 = right, bit 2 = middle).
    pub buttons: u8,
    /// Relative X movement (signed).
    pub x: i8,
    /// Relative Y movement (signed).
    pub y: i8,
    /// Scroll wheel delta (signed).
    pub wheel: i8,
}

impl MouseReport {
    /// Create an idle (no movement, no buttons) report.
    pub const fn empty() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
        }
    }

    /// Parse from a boot-protocol report as delivered by an attached
    /// mouse. Accepts 3-byte (no wheel) or longer reports.
    pub fn from_boot_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 3 {
            return None;
        }
        Some(Self {
            buttons: data[0],
            x: data[1] as i8,
            y: data[2] as i8,
            wheel: if data.len() >= 4 { data[3] as i8 } else { 0 },
        })
    }

    /// Serialise into the outbound 16-bit wire format.
    /// Returns the number of bytes written (10), or 0 when `buf` is
    /// too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_WIRE_LEN {
            return 0;
        }
        buf[0] = REPORT_ID_MOUSE;
        buf[1] = self.buttons;
        buf[2..4].copy_from_slice(&(self.x as i16).to_le_bytes());
        buf[4..6].copy_from_slice(&(self.y as i16).to_le_bytes());
        buf[6..8].copy_from_slice(&(self.wheel as i16).to_le_bytes());
        // AC Pan is declared in the descriptor but never driven.
        buf[8] = 0;
        buf[9] = 0;
        MOUSE_WIRE_LEN
    }

    /// Returns `true` when no buttons are pressed and there is no
    /// movement.
    pub fn is_idle(&self) -> bool {
        self.buttons == 0 && self.x == 0 && self.y == 0 && self.wheel == 0
    }
}
