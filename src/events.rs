//! Canonical input/output events and the fixed-capacity event queue.
//!
//! The whole pipeline is built around two instances of [`EventQueue`]:
//!
//! ```text
//! classifier → input queue → remap engine → output queue → encoder
//! ```
//!
//! Both queues live on the single cooperative pipeline thread. Nothing
//! here blocks or allocates; when a queue is full the new event is
//! dropped (saturating, never overwrite-oldest), which is the only
//! backpressure mechanism the pipeline has.

use crate::hid::keyboard::KeyboardReport;
use crate::hid::mouse::MouseReport;

/// Broad class of an attached HID interface, from its declared boot
/// protocol or (for composites) a guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceKind {
    Keyboard,
    Mouse,
    /// No boot protocol declared (trackpoint keyboards, vendor HID).
    Composite,
}

/// Identity of an attached device interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    pub address: u8,
    pub instance: u8,
    pub kind: DeviceKind,
}

/// Periodic 1 ms tick, produced by the host-servicing loop whether or
/// not any device is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInfo {
    /// Running tick counter.
    pub count: u32,
    /// Microseconds since the previous tick.
    pub delta_us: u32,
}

/// Payload of an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputKind {
    Mouse(MouseReport),
    Keyboard(KeyboardReport),
    DeviceConnected(DeviceInfo),
    DeviceDisconnected(DeviceInfo),
    Tick(TickInfo),
}

/// One event on the classifier → remap engine queue.
///
/// Created by the classifier (or the ticker), consumed exactly once by
/// the remap engine, never mutated in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    pub timestamp_ms: u32,
    /// Monotonic per-producer sequence number.
    pub sequence_id: u32,
    /// Which attached HID interface produced this (0 for ticks).
    pub interface_id: u8,
    pub kind: InputKind,
}

/// One event on the remap engine → encoder queue.
///
/// Outbound events carry no provenance - timestamp and sequence id
/// end at the remap stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputEvent {
    Mouse(MouseReport),
    Keyboard(KeyboardReport),
}

/// Fixed-capacity circular FIFO.
///
/// `enqueue` saturates: a full queue rejects the new item rather than
/// overwriting the oldest. All operations are O(1) and allocation-free.
pub struct EventQueue<T, const N: usize> {
    slots: [Option<T>; N],
    head: usize,
    tail: usize,
    len: usize,
}

pub type InputQueue = EventQueue<InputEvent, { crate::config::INPUT_QUEUE_CAPACITY }>;
pub type OutputQueue = EventQueue<OutputEvent, { crate::config::OUTPUT_QUEUE_CAPACITY }>;

impl<T, const N: usize> EventQueue<T, N> {
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; N],
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Append an item. Returns `false` (dropping the item) when full.
    pub fn enqueue(&mut self, item: T) -> bool {
        if self.len == N {
            return false;
        }
        self.slots[self.tail] = Some(item);
        self.tail = (self.tail + 1) % N;
        self.len += 1;
        true
    }

    /// Remove and return the oldest item, `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.slots[self.head].take();
        self.head = (self.head + 1) % N;
        self.len -= 1;
        item
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }
}

impl<T, const N: usize> Default for EventQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Milliseconds elapsed from `start_ms` to `end_ms` on a wrapping
/// 32-bit clock.
pub fn time_delta_ms(start_ms: u32, end_ms: u32) -> u32 {
    end_ms.wrapping_sub(start_ms)
}
