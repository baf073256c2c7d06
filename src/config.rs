//! Application-wide constants and compile-time configuration.
//!
//! All capacities, report IDs, USB identity and timing parameters
//! live here so they can be tuned in one place.

// Event pipeline

/// Capacity of the input event queue (classifier → remap engine).
pub const INPUT_QUEUE_CAPACITY: usize = 32;

/// Capacity of the output event queue (remap engine → encoder).
pub const OUTPUT_QUEUE_CAPACITY: usize = 32;

/// Interval between synthetic tick events (microseconds).
pub const TICK_INTERVAL_US: u32 = 1000;

// Attached devices (host role)

/// Maximum number of attached HID interfaces tracked at once.
/// A device arriving when all slots are taken is left untracked.
pub const MAX_HID_DEVICES: usize = 4;

/// Maximum number of report fields retained per parsed descriptor.
pub const MAX_REPORT_FIELDS: usize = 32;

/// Largest report descriptor accepted from an attached device, bytes.
pub const MAX_DESCRIPTOR_LEN: usize = 256;

/// Largest input report accepted from an attached device, bytes.
pub const MAX_REPORT_LEN: usize = 64;

// Device role (downstream host)

/// USB VID/PID presented to the downstream host.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0xCAFE;
pub const USB_PID: u16 = 0xBAF2;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "usb2usb";
pub const USB_PRODUCT: &str = "USB-to-USB HID Bridge";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms). 1 ms = 1000 Hz for lowest latency.
pub const USB_HID_POLL_MS: u8 = 1;

/// Combined HID interface number on the device side.
pub const ITF_NUM_HID: u8 = 0;

// Report IDs on the combined interface. These must match the
// report descriptor advertised to the downstream host.

pub const REPORT_ID_MOUSE: u8 = 1;
pub const REPORT_ID_KEYBOARD: u8 = 2;
pub const REPORT_ID_CONSUMER: u8 = 3;
pub const REPORT_ID_LEDS: u8 = 98;
pub const REPORT_ID_MULTIPLIER: u8 = 99;

/// Outbound keyboard report length, report ID byte included.
pub const KEYBOARD_WIRE_LEN: usize = 17;

/// Outbound mouse report length, report ID byte included.
pub const MOUSE_WIRE_LEN: usize = 10;
