//! Report classifier - the host-role half of the pipeline.
//!
//! Turns mount/report/unmount notifications into canonical
//! [`InputEvent`]s on the input queue. Interfaces with a declared boot
//! protocol decode by the fixed boot layout; protocol-less composite
//! interfaces go through the parsed descriptor field table; when not
//! even a usable descriptor exists, report-length heuristics take
//! over. The heuristics are a documented best effort for trackpoint
//! style composites, not a guarantee.

use crate::events::{DeviceInfo, DeviceKind, InputEvent, InputKind, InputQueue, TickInfo};
use crate::hid::keyboard::KeyboardReport;
use crate::hid::mouse::MouseReport;
use crate::hid::report_protocol::{FieldKind, ParsedDescriptor};
use crate::host::slots::SlotPool;
use crate::host::{HostBus, ItfProtocol};

pub struct Classifier {
    slots: SlotPool,
    sequence: u32,
}

impl Classifier {
    pub const fn new() -> Self {
        Self {
            slots: SlotPool::new(),
            sequence: 0,
        }
    }

    /// Number of interfaces currently tracked.
    pub fn device_count(&self) -> usize {
        self.slots.connected_count()
    }

    /// Handle a device-mount notification from the transport.
    ///
    /// Capability flags come from the declared protocol when there is
    /// one. Composite interfaces fall back to their descriptor, and
    /// when that yields nothing usable, to assuming both keyboard and
    /// mouse - trackpoint keyboards typically do both.
    pub fn on_device_mount(
        &mut self,
        address: u8,
        instance: u8,
        protocol: ItfProtocol,
        descriptor: &[u8],
        bus: &mut impl HostBus,
        queue: &mut InputQueue,
        now_ms: u32,
    ) {
        if let Some(slot) = self.slots.claim(address, instance, protocol) {
            match protocol {
                ItfProtocol::Keyboard => slot.has_keyboard = true,
                ItfProtocol::Mouse => slot.has_mouse = true,
                ItfProtocol::None => {
                    let parsed = ParsedDescriptor::parse(descriptor);
                    if parsed.is_empty() {
                        slot.has_keyboard = true;
                        slot.has_mouse = true;
                    } else {
                        slot.has_keyboard = parsed.has_keyboard_usages();
                        slot.has_mouse = parsed.has_mouse_usages();
                        slot.descriptor = Some(parsed);
                    }
                }
            }
        }
        // The connect event is emitted even when the pool was
        // exhausted; only the report stream is absent for untracked
        // devices.

        let info = DeviceInfo {
            address,
            instance,
            kind: device_kind(protocol),
        };
        self.emit(queue, instance, InputKind::DeviceConnected(info), now_ms);

        let _ = bus.request_next_report(address, instance);
    }

    /// Handle a report-received notification from the transport.
    pub fn on_report_received(
        &mut self,
        address: u8,
        instance: u8,
        report: &[u8],
        bus: &mut impl HostBus,
        queue: &mut InputQueue,
        now_ms: u32,
    ) {
        match self.slots.find(address, instance) {
            Some(slot) => match slot.protocol {
                ItfProtocol::Keyboard => {
                    if let Some(kbd) = KeyboardReport::from_boot_bytes(report) {
                        // Idle polls are filtered so the queue only
                        // carries actual activity.
                        if !kbd.is_empty() {
                            Self::push(
                                &mut self.sequence,
                                queue,
                                instance,
                                InputKind::Keyboard(kbd),
                                now_ms,
                            );
                        }
                    }
                }
                ItfProtocol::Mouse => {
                    if let Some(mouse) = MouseReport::from_boot_bytes(report) {
                        if !mouse.is_idle() {
                            Self::push(
                                &mut self.sequence,
                                queue,
                                instance,
                                InputKind::Mouse(mouse),
                                now_ms,
                            );
                        }
                    }
                }
                ItfProtocol::None => match &slot.descriptor {
                    Some(desc) => Self::classify_by_fields(
                        &mut self.sequence,
                        desc,
                        report,
                        queue,
                        instance,
                        now_ms,
                    ),
                    None => Self::classify_by_length(
                        &mut self.sequence,
                        report,
                        queue,
                        instance,
                        now_ms,
                    ),
                },
            },
            // Untracked device (pool was exhausted at mount time).
            None => {}
        }

        let _ = bus.request_next_report(address, instance);
    }

    /// Handle a device-unmount notification from the transport.
    pub fn on_device_unmount(
        &mut self,
        address: u8,
        instance: u8,
        queue: &mut InputQueue,
        now_ms: u32,
    ) {
        let kind = self
            .slots
            .find(address, instance)
            .map(|slot| device_kind(slot.protocol))
            .unwrap_or(DeviceKind::Composite);

        let info = DeviceInfo {
            address,
            instance,
            kind,
        };
        self.emit(queue, instance, InputKind::DeviceDisconnected(info), now_ms);

        self.slots.release(address, instance);
    }

    /// Emit the periodic tick produced by the host-servicing loop.
    pub fn on_tick(&mut self, tick: TickInfo, queue: &mut InputQueue, now_ms: u32) {
        self.emit(queue, 0, InputKind::Tick(tick), now_ms);
    }

    /// Classify using the parsed descriptor: one event per nonzero
    /// extracted field, mapped through the fixed usage→kind table.
    fn classify_by_fields(
        sequence: &mut u32,
        desc: &ParsedDescriptor,
        report: &[u8],
        queue: &mut InputQueue,
        interface_id: u8,
        now_ms: u32,
    ) {
        for field in desc.fields() {
            let Some(value) = field.extract(report) else {
                continue;
            };
            if value == 0 {
                continue;
            }

            let kind = match field.kind() {
                FieldKind::MouseX => InputKind::Mouse(MouseReport {
                    x: value as i8,
                    ..MouseReport::empty()
                }),
                FieldKind::MouseY => InputKind::Mouse(MouseReport {
                    y: value as i8,
                    ..MouseReport::empty()
                }),
                FieldKind::MouseWheel => InputKind::Mouse(MouseReport {
                    wheel: value as i8,
                    ..MouseReport::empty()
                }),
                FieldKind::MouseButton => InputKind::Mouse(MouseReport {
                    buttons: value as u8,
                    ..MouseReport::empty()
                }),
                FieldKind::KeyboardKey => InputKind::Keyboard(KeyboardReport {
                    modifier: 0,
                    keycodes: [value as u8, 0, 0, 0, 0, 0],
                }),
                FieldKind::KeyboardModifier => InputKind::Keyboard(KeyboardReport {
                    modifier: value as u8,
                    keycodes: [0; 6],
                }),
                FieldKind::Unknown => continue,
            };

            Self::push(sequence, queue, interface_id, kind, now_ms);
        }
    }

    /// Last-resort classification by report length and byte pattern.
    ///
    /// Composite trackpoint keyboards multiplex mouse motion into the
    /// 8-byte keyboard report shape; the byte-pattern checks below
    /// pull those apart. An approximation: a genuine lone keypress
    /// without modifier is indistinguishable from a small positive
    /// delta here.
    fn classify_by_length(
        sequence: &mut u32,
        report: &[u8],
        queue: &mut InputQueue,
        interface_id: u8,
        now_ms: u32,
    ) {
        match report.len() {
            8 => {
                let modifier = report[0];
                let keycode = report[2];

                let kind = if keycode != 0 && modifier == 0 {
                    // Motion byte in keyboard clothing.
                    InputKind::Mouse(MouseReport {
                        x: keycode as i8,
                        ..MouseReport::empty()
                    })
                } else if modifier != 0 && keycode == 0 {
                    InputKind::Mouse(MouseReport {
                        buttons: modifier,
                        ..MouseReport::empty()
                    })
                } else if modifier != 0 && keycode != 0 {
                    match KeyboardReport::from_boot_bytes(report) {
                        Some(kbd) => InputKind::Keyboard(kbd),
                        None => return,
                    }
                } else {
                    // Idle poll.
                    return;
                };

                Self::push(sequence, queue, interface_id, kind, now_ms);
            }
            3..=5 => {
                // Boot-mouse shape, unless the "deltas" look like a
                // lone keycode: no buttons, second byte in the keycode
                // range, no Y movement.
                let kind = if report[0] == 0
                    && (0x04..=0x65).contains(&report[1])
                    && report[2] == 0
                {
                    InputKind::Keyboard(KeyboardReport {
                        modifier: 0,
                        keycodes: [report[1], 0, 0, 0, 0, 0],
                    })
                } else {
                    match MouseReport::from_boot_bytes(report) {
                        Some(mouse) if !mouse.is_idle() => InputKind::Mouse(mouse),
                        _ => return,
                    }
                };

                Self::push(sequence, queue, interface_id, kind, now_ms);
            }
            _ => {
                #[cfg(feature = "defmt")]
                defmt::warn!("unclassifiable report length: {}", report.len());
            }
        }
    }

    fn emit(&mut self, queue: &mut InputQueue, interface_id: u8, kind: InputKind, now_ms: u32) {
        Self::push(&mut self.sequence, queue, interface_id, kind, now_ms);
    }

    fn push(
        sequence: &mut u32,
        queue: &mut InputQueue,
        interface_id: u8,
        kind: InputKind,
        now_ms: u32,
    ) {
        *sequence = sequence.wrapping_add(1);
        let event = InputEvent {
            timestamp_ms: now_ms,
            sequence_id: *sequence,
            interface_id,
            kind,
        };
        // A full queue drops the event; the pipeline never waits.
        let _ = queue.enqueue(event);
    }
}

fn device_kind(protocol: ItfProtocol) -> DeviceKind {
    match protocol {
        ItfProtocol::Keyboard => DeviceKind::Keyboard,
        ItfProtocol::Mouse => DeviceKind::Mouse,
        ItfProtocol::None => DeviceKind::Composite,
    }
}
