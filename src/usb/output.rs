//! Report encoder - the device-role end of the pipeline.
//!
//! Drains the output queue in FIFO order, serialises each event into
//! its wire format and hands it to the [`ReportSink`]. Delivery is
//! at-most-once: when the sink's interface is not ready the event is
//! dropped, never requeued - retrying would block the cooperative
//! loop.

use crate::config::{ITF_NUM_HID, KEYBOARD_WIRE_LEN, MOUSE_WIRE_LEN, REPORT_ID_KEYBOARD, REPORT_ID_MOUSE};
use crate::events::{OutputEvent, OutputQueue};

/// Capability for handing finished reports to the device transport.
pub trait ReportSink {
    /// Whether the HID interface can accept a report right now.
    fn is_ready(&mut self, interface: u8) -> bool;

    /// Hand a serialised report to the transport. Returns `false`
    /// when the transport rejected it.
    fn send_report(&mut self, interface: u8, report_id: u8, data: &[u8]) -> bool;
}

/// Encode and send every queued output event.
///
/// Returns the number of reports accepted by the sink.
pub fn drain(queue: &mut OutputQueue, sink: &mut impl ReportSink) -> usize {
    let mut sent = 0;
    let mut buf = [0u8; KEYBOARD_WIRE_LEN];

    while let Some(event) = queue.dequeue() {
        if !sink.is_ready(ITF_NUM_HID) {
            // Transport busy: the event is dropped, not requeued.
            continue;
        }

        let (report_id, len) = match event {
            OutputEvent::Keyboard(kbd) => (REPORT_ID_KEYBOARD, kbd.serialize(&mut buf)),
            OutputEvent::Mouse(mouse) => (REPORT_ID_MOUSE, mouse.serialize(&mut buf)),
        };
        debug_assert!(len == KEYBOARD_WIRE_LEN || len == MOUSE_WIRE_LEN);

        if sink.send_report(ITF_NUM_HID, report_id, &buf[..len]) {
            sent += 1;
        }
    }

    sent
}
