//! HID report types, descriptor parsing and the outbound wire format.
//!
//! Inbound reports from attached devices are decoded either by their
//! boot-protocol layout or through [`report_protocol`]'s parsed field
//! tables. Outbound reports to the downstream host follow the combined
//! keyboard+mouse+consumer descriptor below.

pub mod keyboard;
pub mod mouse;
pub mod report_protocol;

#[cfg(test)]
mod tests;

/// Report descriptor for the combined HID interface presented to the
/// downstream host.
///
/// This byte table is a fixed contract: the encoder's wire formats in
/// [`keyboard`] and [`mouse`] must match it bit for bit. It declares
/// three top-level collections:
///
/// - Keyboard (Report ID 2): modifier bitfield plus a 112-bit key
///   bitmap for keycodes 0x04..=0x73, with an LED output report
///   (Report ID 98)
/// - Mouse (Report ID 1): 8 buttons, 16-bit X/Y/wheel/AC-pan, with
///   resolution-multiplier feature reports (Report ID 99)
/// - Consumer Control (Report ID 3): media keys
///
/// The feature reports are acknowledged by the device glue but carry
/// no behaviour, and the consumer report is never generated by the
/// pipeline.
#[rustfmt::skip]
pub const COMBINED_REPORT_DESCRIPTOR: &[u8] = &[
    // - Keyboard (Report ID 2) -
    0x05, 0x01,       // Usage Page (Generic Desktop)
    0x09, 0x06,       // Usage (Keyboard)
    0xA1, 0x01,       // Collection (Application)
    0x85, 0x02,       //   Report ID (2)
    0x05, 0x07,       //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0,       //   Usage Minimum (Left Control)
    0x29, 0xE7,       //   Usage Maximum (Right GUI)
    0x15, 0x00,       //   Logical Minimum (0)
    0x25, 0x01,       //   Logical Maximum (1)
    0x75, 0x01,       //   Report Size (1)
    0x95, 0x08,       //   Report Count (8)
    0x81, 0x02,       //   Input (Data, Variable, Absolute)
    0x19, 0x04,       //   Usage Minimum (0x04)
    0x29, 0x73,       //   Usage Maximum (0x73)
    0x95, 0x70,       //   Report Count (112)
    0x81, 0x02,       //   Input (Data, Variable, Absolute)
    0x19, 0x87,       //   Usage Minimum (International1)
    0x29, 0x8B,       //   Usage Maximum (LANG2)
    0x95, 0x05,       //   Report Count (5)
    0x81, 0x02,       //   Input (Data, Variable, Absolute)
    0x09, 0x90,       //   Usage (LANG1)
    0x09, 0x91,       //   Usage (LANG2)
    0x95, 0x02,       //   Report Count (2)
    0x81, 0x02,       //   Input (Data, Variable, Absolute)
    0x95, 0x01,       //   Report Count (1)
    0x81, 0x03,       //   Input (Constant) - padding
    0x85, 0x62,       //   Report ID (98)
    0x05, 0x08,       //   Usage Page (LEDs)
    0x95, 0x05,       //   Report Count (5)
    0x19, 0x01,       //   Usage Minimum (Num Lock)
    0x29, 0x05,       //   Usage Maximum (Kana)
    0x91, 0x02,       //   Output (Data, Variable, Absolute)
    0x95, 0x01,       //   Report Count (1)
    0x75, 0x03,       //   Report Size (3)
    0x91, 0x03,       //   Output (Constant) - padding
    0xC0,             // End Collection
    //
    // - Mouse (Report ID 1) -
    0x05, 0x01,       // Usage Page (Generic Desktop)
    0x09, 0x02,       // Usage (Mouse)
    0xA1, 0x01,       // Collection (Application)
    0x05, 0x01,       //   Usage Page (Generic Desktop)
    0x09, 0x02,       //   Usage (Mouse)
    0xA1, 0x02,       //   Collection (Logical)
    0x85, 0x01,       //     Report ID (1)
    0x09, 0x01,       //     Usage (Pointer)
    0xA1, 0x00,       //     Collection (Physical)
    0x05, 0x09,       //       Usage Page (Button)
    0x19, 0x01,       //       Usage Minimum (Button 1)
    0x29, 0x08,       //       Usage Maximum (Button 8)
    0x95, 0x08,       //       Report Count (8)
    0x75, 0x01,       //       Report Size (1)
    0x25, 0x01,       //       Logical Maximum (1)
    0x81, 0x02,       //       Input (Data, Variable, Absolute)
    0x05, 0x01,       //       Usage Page (Generic Desktop)
    0x09, 0x30,       //       Usage (X)
    0x09, 0x31,       //       Usage (Y)
    0x95, 0x02,       //       Report Count (2)
    0x75, 0x10,       //       Report Size (16)
    0x16, 0x00, 0x80, //       Logical Minimum (-32768)
    0x26, 0xFF, 0x7F, //       Logical Maximum (32767)
    0x81, 0x06,       //       Input (Data, Variable, Relative)
    0xA1, 0x02,       //       Collection (Logical)
    0x85, 0x63,       //         Report ID (99)
    0x09, 0x48,       //         Usage (Resolution Multiplier)
    0x95, 0x01,       //         Report Count (1)
    0x75, 0x02,       //         Report Size (2)
    0x15, 0x00,       //         Logical Minimum (0)
    0x25, 0x01,       //         Logical Maximum (1)
    0x35, 0x01,       //         Physical Minimum (1)
    0x45, 0x78,       //         Physical Maximum (120)
    0xB1, 0x02,       //         Feature (Data, Variable, Absolute)
    0x85, 0x01,       //         Report ID (1)
    0x09, 0x38,       //         Usage (Wheel)
    0x35, 0x00,       //         Physical Minimum (0)
    0x45, 0x00,       //         Physical Maximum (0)
    0x16, 0x00, 0x80, //         Logical Minimum (-32768)
    0x26, 0xFF, 0x7F, //         Logical Maximum (32767)
    0x75, 0x10,       //         Report Size (16)
    0x81, 0x06,       //         Input (Data, Variable, Relative)
    0xC0,             //       End Collection
    0xA1, 0x02,       //       Collection (Logical)
    0x85, 0x63,       //         Report ID (99)
    0x09, 0x48,       //         Usage (Resolution Multiplier)
    0x75, 0x02,       //         Report Size (2)
    0x15, 0x00,       //         Logical Minimum (0)
    0x25, 0x01,       //         Logical Maximum (1)
    0x35, 0x01,       //         Physical Minimum (1)
    0x45, 0x78,       //         Physical Maximum (120)
    0xB1, 0x02,       //         Feature (Data, Variable, Absolute)
    0x35, 0x00,       //         Physical Minimum (0)
    0x45, 0x00,       //         Physical Maximum (0)
    0x75, 0x04,       //         Report Size (4)
    0xB1, 0x03,       //         Feature (Constant) - padding
    0x85, 0x01,       //         Report ID (1)
    0x05, 0x0C,       //         Usage Page (Consumer)
    0x16, 0x00, 0x80, //         Logical Minimum (-32768)
    0x26, 0xFF, 0x7F, //         Logical Maximum (32767)
    0x75, 0x10,       //         Report Size (16)
    0x0A, 0x38, 0x02, //         Usage (AC Pan)
    0x81, 0x06,       //         Input (Data, Variable, Relative)
    0xC0,             //       End Collection
    0xC0,             //     End Collection
    0xC0,             //   End Collection
    0xC0,             // End Collection
    //
    // - Consumer Control (Report ID 3) -
    0x05, 0x0C,       // Usage Page (Consumer)
    0x09, 0x01,       // Usage (Consumer Control)
    0xA1, 0x01,       // Collection (Application)
    0x85, 0x03,       //   Report ID (3)
    0x15, 0x00,       //   Logical Minimum (0)
    0x25, 0x01,       //   Logical Maximum (1)
    0x09, 0xB5,       //   Usage (Scan Next Track)
    0x09, 0xB6,       //   Usage (Scan Previous Track)
    0x09, 0xB7,       //   Usage (Stop)
    0x09, 0xCD,       //   Usage (Play/Pause)
    0x09, 0xE2,       //   Usage (Mute)
    0x09, 0xE9,       //   Usage (Volume Increment)
    0x09, 0xEA,       //   Usage (Volume Decrement)
    0x75, 0x01,       //   Report Size (1)
    0x95, 0x07,       //   Report Count (7)
    0x81, 0x02,       //   Input (Data, Variable, Absolute)
    0x05, 0x0B,       //   Usage Page (Telephony)
    0x09, 0x2F,       //   Usage (Phone Mute)
    0x95, 0x01,       //   Report Count (1)
    0x81, 0x02,       //   Input (Data, Variable, Absolute)
    0xC0,             // End Collection
];
