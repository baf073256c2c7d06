//! HID Report Protocol parser and field extractor.
//!
//! Parses HID Report Descriptors into a bounded table of field
//! locations, then pulls typed values out of raw report bytes using
//! those locations. This enables support for devices that do not
//! declare a boot protocol - composite trackpoint keyboards being the
//! motivating case.
//!
//! ## HID Report Descriptor Structure
//!
//! A Report Descriptor is a sequence of items that describe the
//! format of HID reports. Key items:
//! - Usage Page: category of usages (keyboard, mouse, consumer, etc.)
//! - Usage: specific function within a page
//! - Report ID: identifies which report follows (if multiple)
//! - Report Size / Report Count: bits per field, number of fields
//! - Input/Output/Feature: direction of the report
//!
//! ## Limitations
//!
//! This implementation handles common cases but not the full HID spec:
//! - Only Generic Desktop X/Y/Wheel, Button-page and Keyboard-page
//!   input fields are retained; everything else just advances the bit
//!   cursor
//! - Nested collections are flattened; a Collection item resets the
//!   bit cursor to the report origin
//! - Push/Pop state and Usage Minimum/Maximum ranges are not tracked
//! - Fields wider than 16 bits cannot be extracted

use heapless::Vec;

use crate::config::MAX_REPORT_FIELDS;

// Item prefixes with the size bits masked out.
const ITEM_INPUT: u8 = 0x80;
const ITEM_COLLECTION: u8 = 0xA0;
const ITEM_USAGE_PAGE: u8 = 0x04;
const ITEM_USAGE: u8 = 0x08;
const ITEM_LOGICAL_MINIMUM: u8 = 0x14;
const ITEM_LOGICAL_MAXIMUM: u8 = 0x24;
const ITEM_REPORT_SIZE: u8 = 0x74;
const ITEM_REPORT_ID: u8 = 0x84;
const ITEM_REPORT_COUNT: u8 = 0x94;

/// Usage pages retained by the parser.
pub const USAGE_PAGE_GENERIC_DESKTOP: u16 = 0x01;
pub const USAGE_PAGE_KEYBOARD: u16 = 0x07;
pub const USAGE_PAGE_BUTTON: u16 = 0x09;

/// Generic Desktop usages.
pub const USAGE_POINTER: u16 = 0x01;
pub const USAGE_MOUSE: u16 = 0x02;
pub const USAGE_KEYBOARD: u16 = 0x06;
pub const USAGE_X: u16 = 0x30;
pub const USAGE_Y: u16 = 0x31;
pub const USAGE_WHEEL: u16 = 0x38;

/// What a retained field means for event classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    MouseX,
    MouseY,
    MouseWheel,
    MouseButton,
    KeyboardModifier,
    KeyboardKey,
    Unknown,
}

/// Location and semantics of one input field, produced once at parse
/// time and immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldDescriptor {
    /// Report ID this field belongs to, 0 when the device uses none.
    pub report_id: u8,
    /// Bit position of the field within the report. When a report ID
    /// is declared the cursor starts at 8 to account for the ID byte.
    pub bit_offset: u16,
    /// Field width in bits (the declared Report Size).
    pub bit_width: u8,
    pub usage_page: u16,
    pub usage: u16,
    /// Item bit 2: relative (deltas) vs absolute.
    pub is_relative: bool,
    pub logical_min: i32,
    pub logical_max: i32,
}

impl FieldDescriptor {
    /// Classification of this field for the usage→event-kind table.
    pub fn kind(&self) -> FieldKind {
        match self.usage_page {
            USAGE_PAGE_GENERIC_DESKTOP => match self.usage {
                USAGE_X => FieldKind::MouseX,
                USAGE_Y => FieldKind::MouseY,
                USAGE_WHEEL => FieldKind::MouseWheel,
                _ => FieldKind::Unknown,
            },
            USAGE_PAGE_BUTTON => FieldKind::MouseButton,
            USAGE_PAGE_KEYBOARD => {
                if self.usage == 0xE0 {
                    FieldKind::KeyboardModifier
                } else if (0x04..=0x65).contains(&self.usage) {
                    FieldKind::KeyboardKey
                } else {
                    FieldKind::Unknown
                }
            }
            _ => FieldKind::Unknown,
        }
    }

    /// Extract this field's value from a raw report.
    ///
    /// Returns `None` when the report carries a different report ID,
    /// when the field lies outside the report, or when the field is
    /// wider than 16 bits. Pure: reads only its arguments.
    pub fn extract(&self, report: &[u8]) -> Option<i32> {
        let mut offset = 0usize;
        if !report.is_empty() && self.report_id != 0 {
            if report[0] != self.report_id {
                return None;
            }
            offset = 1;
        }

        let byte_pos = self.bit_offset as usize / 8 + offset;
        let bit_offset = self.bit_offset as usize % 8;
        let width = self.bit_width as usize;

        if byte_pos >= report.len() {
            return None;
        }

        // Fields of up to 8 bits that fit within a single byte.
        if width <= 8 && bit_offset + width <= 8 {
            let mask = (1u32 << width) - 1;
            let raw = (report[byte_pos] as u32 >> bit_offset) & mask;
            return Some(self.sign_extend(raw));
        }

        // Fields of up to 16 bits spanning two bytes, little-endian.
        if width <= 16 && byte_pos + 1 < report.len() {
            let raw16 = u16::from_le_bytes([report[byte_pos], report[byte_pos + 1]]);
            let mask = (1u32 << width) - 1;
            let raw = (raw16 as u32 >> bit_offset) & mask;
            return Some(self.sign_extend(raw));
        }

        None
    }

    fn sign_extend(&self, raw: u32) -> i32 {
        let width = self.bit_width as u32;
        if width == 0 || width >= 32 {
            return raw as i32;
        }
        if self.logical_min < 0 && raw & (1 << (width - 1)) != 0 {
            (raw | (u32::MAX << width)) as i32
        } else {
            raw as i32
        }
    }
}

/// Bounded table of retained input fields for one interface.
#[derive(Clone, Debug, Default)]
pub struct ParsedDescriptor {
    fields: Vec<FieldDescriptor, MAX_REPORT_FIELDS>,
}

impl ParsedDescriptor {
    /// Parse a report descriptor into a field table.
    ///
    /// Never fails: a malformed or truncated descriptor yields however
    /// many fields were found before the scan stopped, possibly zero.
    /// The scan stops at the end of the input, when an item's payload
    /// would run past it, or when the table is full. No index at or
    /// beyond `desc.len()` is ever read.
    pub fn parse(desc: &[u8]) -> Self {
        let mut table = Self::default();

        // Current global/local item state.
        let mut usage_page: u16 = 0;
        let mut usage: u16 = 0;
        let mut report_id: u8 = 0;
        let mut report_size: u8 = 0;
        let mut report_count: u8 = 0;
        let mut logical_min: i32 = 0;
        let mut logical_max: i32 = 0;
        let mut bit_pos: u16 = 0;
        let mut has_report_id = false;

        let mut pos = 0usize;
        while pos < desc.len() && !table.fields.is_full() {
            let item = desc[pos];
            let size = item_payload_size(item);

            if pos + size >= desc.len() {
                break;
            }

            let value = item_value(&desc[pos + 1..pos + 1 + size]);

            match item & 0xFC {
                ITEM_USAGE_PAGE => usage_page = value as u16,
                ITEM_USAGE => usage = value as u16,
                ITEM_REPORT_ID => {
                    report_id = value as u8;
                    has_report_id = true;
                    // The ID byte precedes every report using this id.
                    bit_pos = 8;
                }
                ITEM_REPORT_SIZE => report_size = value as u8,
                ITEM_REPORT_COUNT => report_count = value as u8,
                ITEM_LOGICAL_MINIMUM => logical_min = value,
                ITEM_LOGICAL_MAXIMUM => logical_max = value,
                ITEM_INPUT => {
                    // Bit 0 set marks constant (padding) fields.
                    if value & 0x01 == 0 && wanted(usage_page, usage) {
                        let _ = table.fields.push(FieldDescriptor {
                            report_id,
                            bit_offset: bit_pos,
                            bit_width: report_size,
                            usage_page,
                            usage,
                            is_relative: value & 0x04 != 0,
                            logical_min,
                            logical_max,
                        });
                    }

                    // The cursor advances whether or not the field was
                    // retained, and the transient usage is spent.
                    bit_pos = bit_pos.wrapping_add(report_size as u16 * report_count as u16);
                    usage = 0;
                }
                ITEM_COLLECTION => {
                    bit_pos = if has_report_id { 8 } else { 0 };
                }
                _ => {}
            }

            pos += size + 1;
        }

        table
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when any retained field sits on the keyboard usage page.
    pub fn has_keyboard_usages(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.usage_page == USAGE_PAGE_KEYBOARD)
    }

    /// True when any retained field is a pointer axis, wheel or button.
    pub fn has_mouse_usages(&self) -> bool {
        self.fields.iter().any(|f| {
            f.usage_page == USAGE_PAGE_BUTTON
                || (f.usage_page == USAGE_PAGE_GENERIC_DESKTOP
                    && matches!(f.usage, USAGE_X | USAGE_Y | USAGE_WHEEL))
        })
    }
}

fn wanted(usage_page: u16, usage: u16) -> bool {
    (usage_page == USAGE_PAGE_GENERIC_DESKTOP
        && matches!(usage, USAGE_X | USAGE_Y | USAGE_WHEEL))
        || usage_page == USAGE_PAGE_BUTTON
        || usage_page == USAGE_PAGE_KEYBOARD
}

/// Payload size encoded in an item's low two bits.
fn item_payload_size(item: u8) -> usize {
    match item & 0x03 {
        0 => 0,
        1 => 1,
        2 => 2,
        _ => 4,
    }
}

/// Item payload as a signed value (little-endian, sign-extended per
/// its declared size).
fn item_value(data: &[u8]) -> i32 {
    match data.len() {
        1 => data[0] as i8 as i32,
        2 => i16::from_le_bytes([data[0], data[1]]) as i32,
        4 => i32::from_le_bytes([data[0], data[1], data[2], data[3]]),
        _ => 0,
    }
}
