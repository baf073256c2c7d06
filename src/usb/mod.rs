//! USB Device subsystem - presents the combined HID identity to the
//! downstream host.
//!
//! The RP2040's built-in USB Full-Speed controller is driven by
//! `embassy-usb`. One HID interface carries every outbound report,
//! multiplexed by Report ID:
//!
//! - Report ID 1: Mouse (16-bit axes)
//! - Report ID 2: Keyboard (NKRO bitmap)
//! - Report ID 3: Consumer control (declared, never generated)
//!
//! The pure encoder stage lives in [`output`]; the Embassy wiring in
//! [`hid_device`] only exists in the embedded build.

pub mod output;

#[cfg(feature = "embedded")]
pub mod hid_device;
