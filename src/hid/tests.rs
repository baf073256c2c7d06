//! Unit tests for HID descriptor parsing, field extraction and report
//! serialization.
//!
//! These tests run on the host (not embedded) and verify the pure
//! logic of the report protocol layer.

use super::keyboard::{KeyboardReport, KEYBOARD_REPORT_SIZE};
use super::mouse::MouseReport;
use super::report_protocol::{FieldDescriptor, FieldKind, ParsedDescriptor};
use super::COMBINED_REPORT_DESCRIPTOR;
use crate::config::{KEYBOARD_WIRE_LEN, MOUSE_WIRE_LEN};

/// Boot-style mouse descriptor without report IDs: one button byte,
/// then relative X and Y, all byte-aligned.
const MOUSE_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x05, 0x09, //   Usage Page (Button)
    0x09, 0x01, //   Usage (Button 1)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x02, //   Input (Data,Var,Abs)
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x30, //   Usage (X)
    0x15, 0x81, //   Logical Minimum (-127)
    0x25, 0x7F, //   Logical Maximum (127)
    0x81, 0x06, //   Input (Data,Var,Rel)
    0x09, 0x31, //   Usage (Y)
    0x81, 0x06, //   Input (Data,Var,Rel)
    0xC0, //       End Collection
];

// ═══════════════════════════════════════════════════════════════════════════
// Descriptor Parser Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn parse_empty_descriptor() {
    let parsed = ParsedDescriptor::parse(&[]);
    assert!(parsed.is_empty());
    assert_eq!(parsed.len(), 0);
}

#[test]
fn parse_mouse_descriptor_retains_three_fields() {
    let parsed = ParsedDescriptor::parse(MOUSE_DESCRIPTOR);
    assert_eq!(parsed.len(), 3);

    let fields = parsed.fields();
    assert_eq!(fields[0].kind(), FieldKind::MouseButton);
    assert_eq!(fields[0].bit_offset, 0);
    assert_eq!(fields[0].bit_width, 8);

    assert_eq!(fields[1].kind(), FieldKind::MouseX);
    assert_eq!(fields[1].bit_offset, 8);
    assert!(fields[1].is_relative);
    assert_eq!(fields[1].logical_min, -127);
    assert_eq!(fields[1].logical_max, 127);

    assert_eq!(fields[2].kind(), FieldKind::MouseY);
    assert_eq!(fields[2].bit_offset, 16);

    assert!(parsed.has_mouse_usages());
    assert!(!parsed.has_keyboard_usages());
}

#[test]
fn parse_skips_constant_padding_fields() {
    // Report Size 8, Report Count 1, Input (Const) on the button page.
    let desc = [
        0x05, 0x09, // Usage Page (Button)
        0x75, 0x08, // Report Size (8)
        0x95, 0x01, // Report Count (1)
        0x81, 0x01, // Input (Const)
    ];
    let parsed = ParsedDescriptor::parse(&desc);
    assert!(parsed.is_empty());
}

#[test]
fn parse_ignores_unretained_usage_pages() {
    // Consumer page (0x0C) input field: cursor advances, nothing kept.
    let desc = [
        0x05, 0x0C, // Usage Page (Consumer)
        0x09, 0xE9, // Usage (Volume Up)
        0x75, 0x01, // Report Size (1)
        0x95, 0x08, // Report Count (8)
        0x81, 0x02, // Input (Data,Var,Abs)
        0x05, 0x09, // Usage Page (Button)
        0x09, 0x01, // Usage (Button 1)
        0x81, 0x02, // Input (Data,Var,Abs)
    ];
    let parsed = ParsedDescriptor::parse(&desc);
    assert_eq!(parsed.len(), 1);
    // The consumer bits still occupy the first byte.
    assert_eq!(parsed.fields()[0].bit_offset, 8);
}

#[test]
fn parse_truncated_item_payload_stops_cleanly() {
    // Final item claims a 2-byte payload but only 1 byte remains.
    let desc = [0x05, 0x09, 0x75, 0x08, 0x95, 0x01, 0x26, 0xFF];
    let parsed = ParsedDescriptor::parse(&desc);
    assert!(parsed.is_empty());
}

#[test]
fn parse_report_id_offsets_bit_cursor() {
    let desc = [
        0x05, 0x01, // Usage Page (Generic Desktop)
        0x85, 0x01, // Report ID (1)
        0x09, 0x30, // Usage (X)
        0x15, 0x81, // Logical Minimum (-127)
        0x75, 0x08, // Report Size (8)
        0x95, 0x01, // Report Count (1)
        0x81, 0x06, // Input (Data,Var,Rel)
    ];
    let parsed = ParsedDescriptor::parse(&desc);
    assert_eq!(parsed.len(), 1);
    let field = parsed.fields()[0];
    assert_eq!(field.report_id, 1);
    // The ID byte is counted into the cursor.
    assert_eq!(field.bit_offset, 8);
}

#[test]
fn parse_collection_resets_bit_cursor() {
    let desc = [
        0x05, 0x09, // Usage Page (Button)
        0x75, 0x08, // Report Size (8)
        0x95, 0x02, // Report Count (2)
        0x09, 0x01, // Usage (Button 1)
        0x81, 0x02, // Input (Data,Var,Abs)  -> cursor now 16
        0xA1, 0x01, // Collection (Application)
        0x09, 0x01, // Usage (Button 1)
        0x81, 0x02, // Input (Data,Var,Abs)
    ];
    let parsed = ParsedDescriptor::parse(&desc);
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed.fields()[0].bit_offset, 0);
    // No report ID declared, so the collection rewinds to bit 0.
    assert_eq!(parsed.fields()[1].bit_offset, 0);
}

#[test]
fn parse_combined_descriptor() {
    let parsed = ParsedDescriptor::parse(COMBINED_REPORT_DESCRIPTOR);
    assert!(!parsed.is_empty());
    assert!(parsed.has_mouse_usages());
    assert!(parsed.has_keyboard_usages());
}

// ═══════════════════════════════════════════════════════════════════════════
// Field Extraction Tests
// ═══════════════════════════════════════════════════════════════════════════

fn field(bit_offset: u16, bit_width: u8, logical_min: i32) -> FieldDescriptor {
    FieldDescriptor {
        report_id: 0,
        bit_offset,
        bit_width,
        usage_page: 0x01,
        usage: 0x30,
        is_relative: true,
        logical_min,
        logical_max: 127,
    }
}

#[test]
fn extract_single_byte_field() {
    let f = field(8, 8, 0);
    assert_eq!(f.extract(&[0x00, 0x2A, 0x00]), Some(42));
}

#[test]
fn extract_sign_extends_when_signed() {
    let f = field(8, 8, -127);
    assert_eq!(f.extract(&[0x00, 0xFB, 0x00]), Some(-5));
}

#[test]
fn extract_unsigned_keeps_high_values() {
    // logical_min >= 0: 0xFB stays 251.
    let f = field(8, 8, 0);
    assert_eq!(f.extract(&[0x00, 0xFB, 0x00]), Some(251));
}

#[test]
fn extract_sub_byte_field() {
    let f = field(2, 1, 0);
    assert_eq!(f.extract(&[0b0000_0100]), Some(1));
    assert_eq!(f.extract(&[0b0000_0011]), Some(0));
}

#[test]
fn extract_16_bit_field_little_endian() {
    let f = field(0, 16, 0);
    assert_eq!(f.extract(&[0x34, 0x12]), Some(0x1234));
}

#[test]
fn extract_16_bit_field_negative() {
    let f = field(0, 16, -32767);
    assert_eq!(f.extract(&[0xFE, 0xFF]), Some(-2));
}

#[test]
fn extract_out_of_bounds_is_none() {
    let f = field(24, 8, 0);
    assert_eq!(f.extract(&[0x01, 0x02, 0x03]), None);
}

#[test]
fn extract_wider_than_16_bits_is_none() {
    let f = field(0, 32, 0);
    assert_eq!(f.extract(&[0x01, 0x02, 0x03, 0x04]), None);
}

#[test]
fn extract_checks_report_id() {
    let mut f = field(8, 8, 0);
    f.report_id = 2;
    // Wrong ID: the report belongs to a different layout.
    assert_eq!(f.extract(&[0x01, 0x00, 0x2A]), None);
    // Matching ID: the ID byte is skipped before indexing.
    assert_eq!(f.extract(&[0x02, 0x00, 0x2A]), Some(42));
}

#[test]
fn extract_from_parsed_mouse_report() {
    let parsed = ParsedDescriptor::parse(MOUSE_DESCRIPTOR);
    let report = [0x01, 0x05, 0xFB];

    assert_eq!(parsed.fields()[0].extract(&report), Some(1)); // buttons
    assert_eq!(parsed.fields()[1].extract(&report), Some(5)); // x
    assert_eq!(parsed.fields()[2].extract(&report), Some(-5)); // y
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn keyboard_report_empty() {
    let report = KeyboardReport::empty();
    assert!(report.is_empty());
    assert_eq!(report.modifier, 0);
    assert_eq!(report.keycodes, [0; 6]);
}

#[test]
fn keyboard_report_from_valid_boot_bytes() {
    // Modifier: Left Shift (0x02), Reserved: 0, Keys: 'A' (0x04)
    let data = [0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00];
    let report = KeyboardReport::from_boot_bytes(&data).unwrap();

    assert_eq!(report.modifier, 0x02);
    assert_eq!(report.keycodes[0], 0x04);
    assert!(!report.is_empty());
}

#[test]
fn keyboard_report_from_short_bytes_fails() {
    let data = [0x02, 0x00, 0x04]; // Only 3 bytes - too short
    assert!(KeyboardReport::from_boot_bytes(&data).is_none());
}

#[test]
fn keyboard_report_serialize_bitmap() {
    let report = KeyboardReport {
        modifier: 0x02,
        keycodes: [0x04, 0x1D, 0x00, 0x00, 0x00, 0x00],
    };

    let mut buf = [0u8; KEYBOARD_WIRE_LEN];
    let written = report.serialize(&mut buf);

    assert_eq!(written, KEYBOARD_WIRE_LEN);
    assert_eq!(buf[0], 0x02); // report ID
    assert_eq!(buf[1], 0x02); // modifier
    assert_eq!(buf[2], 0x01); // keycode 0x04 -> bit 0
    assert_eq!(buf[5], 0x02); // keycode 0x1D -> bit 25
    assert!(buf[3..5].iter().all(|&b| b == 0));
    assert!(buf[6..].iter().all(|&b| b == 0));
}

#[test]
fn keyboard_report_serialize_release() {
    let mut buf = [0xFFu8; KEYBOARD_WIRE_LEN];
    let written = KeyboardReport::empty().serialize(&mut buf);

    assert_eq!(written, KEYBOARD_WIRE_LEN);
    assert_eq!(buf[0], 0x02);
    assert!(buf[1..].iter().all(|&b| b == 0));
}

#[test]
fn keyboard_report_serialize_ignores_out_of_range_keycodes() {
    let report = KeyboardReport {
        modifier: 0,
        keycodes: [0x74, 0x01, 0x00, 0x00, 0x00, 0x00],
    };
    let mut buf = [0u8; KEYBOARD_WIRE_LEN];
    report.serialize(&mut buf);
    assert!(buf[2..].iter().all(|&b| b == 0));
}

#[test]
fn keyboard_report_serialize_buffer_too_small() {
    let report = KeyboardReport::empty();
    let mut small_buf = [0u8; KEYBOARD_REPORT_SIZE];
    let written = report.serialize(&mut small_buf);
    assert_eq!(written, 0); // Should fail gracefully
}

// ═══════════════════════════════════════════════════════════════════════════
// Mouse Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mouse_report_empty() {
    let report = MouseReport::empty();
    assert!(report.is_idle());
    assert_eq!(report.buttons, 0);
    assert_eq!(report.x, 0);
    assert_eq!(report.y, 0);
    assert_eq!(report.wheel, 0);
}

#[test]
fn mouse_report_from_3_byte_data() {
    // Left button pressed, X=10, Y=-5
    let data = [0x01, 0x0A, 0xFB]; // 0xFB = -5 as i8
    let report = MouseReport::from_boot_bytes(&data).unwrap();

    assert_eq!(report.buttons, 0x01);
    assert_eq!(report.x, 10);
    assert_eq!(report.y, -5);
    assert_eq!(report.wheel, 0); // Not provided, defaults to 0
}

#[test]
fn mouse_report_from_4_byte_data() {
    // Right button, X=0, Y=0, Wheel scroll up
    let data = [0x02, 0x00, 0x00, 0x01];
    let report = MouseReport::from_boot_bytes(&data).unwrap();

    assert_eq!(report.buttons, 0x02);
    assert_eq!(report.x, 0);
    assert_eq!(report.y, 0);
    assert_eq!(report.wheel, 1);
}

#[test]
fn mouse_report_from_short_bytes_fails() {
    let data = [0x01, 0x0A]; // Only 2 bytes - too short
    assert!(MouseReport::from_boot_bytes(&data).is_none());
}

#[test]
fn mouse_report_serialize_wire_format() {
    let report = MouseReport {
        buttons: 0x03,
        x: -2,
        y: 0,
        wheel: 1,
    };

    let mut buf = [0u8; MOUSE_WIRE_LEN];
    let written = report.serialize(&mut buf);

    assert_eq!(written, MOUSE_WIRE_LEN);
    assert_eq!(
        buf,
        [0x01, 0x03, 0xFE, 0xFF, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]
    );
}

#[test]
fn mouse_report_serialize_sign_extends_axes() {
    let report = MouseReport {
        buttons: 0,
        x: -100,
        y: 50,
        wheel: -2,
    };
    let mut buf = [0u8; MOUSE_WIRE_LEN];
    report.serialize(&mut buf);

    assert_eq!(i16::from_le_bytes([buf[2], buf[3]]), -100);
    assert_eq!(i16::from_le_bytes([buf[4], buf[5]]), 50);
    assert_eq!(i16::from_le_bytes([buf[6], buf[7]]), -2);
}

#[test]
fn mouse_report_serialize_buffer_too_small() {
    let report = MouseReport::empty();
    let mut small_buf = [0u8; 4];
    let written = report.serialize(&mut small_buf);
    assert_eq!(written, 0);
}

#[test]
fn mouse_report_is_not_idle_when_moving() {
    let report = MouseReport {
        buttons: 0,
        x: 1,
        y: 0,
        wheel: 0,
    };
    assert!(!report.is_idle());
}
