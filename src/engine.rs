//! Remap engine - transforms input events into output events.
//!
//! A two-state machine implementing the "stretch layer": holding
//! mouse button 1 or 2 activates it, any other button state returns
//! to passthrough. While active, a fixed keycode table rebinds a
//! cluster of letter keys to the arrow/navigation block. Everything
//! else passes through unchanged.
//!
//! Mouse and keyboard events always produce exactly one output event
//! each, in arrival order; tick and device lifecycle events are
//! consumed here.

use crate::events::{InputKind, InputQueue, OutputEvent, OutputQueue};
use crate::hid::keyboard::KeyboardReport;

/// Keycode rebinds while the stretch layer is active.
/// 0x0B (H) → 0x50 (Left),  0x0D (J) → 0x51 (Down),
/// 0x0E (K) → 0x52 (Up),    0x0F (L) → 0x4F (Right).
const STRETCH_MAP: [(u8, u8); 4] = [(0x0B, 0x50), (0x0D, 0x51), (0x0E, 0x52), (0x0F, 0x4F)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    Passthrough,
    StretchActive,
}

pub struct RemapEngine {
    state: State,
}

impl RemapEngine {
    pub const fn new() -> Self {
        Self {
            state: State::Passthrough,
        }
    }

    /// Back to passthrough with no buttons latched.
    pub fn reset(&mut self) {
        self.state = State::Passthrough;
    }

    pub fn stretch_active(&self) -> bool {
        self.state == State::StretchActive
    }

    /// Drain the input queue, pushing transformed events onto the
    /// output queue. Relative order is preserved; a full output queue
    /// drops events rather than stalling.
    pub fn process(&mut self, input: &mut InputQueue, output: &mut OutputQueue) {
        while let Some(event) = input.dequeue() {
            match event.kind {
                InputKind::Mouse(mouse) => {
                    // The layer check runs on every mouse event, with
                    // or without motion in the same report.
                    self.state = if mouse.buttons == 1 || mouse.buttons == 2 {
                        State::StretchActive
                    } else {
                        State::Passthrough
                    };
                    let _ = output.enqueue(OutputEvent::Mouse(mouse));
                }
                InputKind::Keyboard(kbd) => {
                    let _ = output.enqueue(OutputEvent::Keyboard(self.remap(kbd)));
                }
                // Consumed without output.
                InputKind::Tick(_)
                | InputKind::DeviceConnected(_)
                | InputKind::DeviceDisconnected(_) => {}
            }
        }
    }

    fn remap(&self, kbd: KeyboardReport) -> KeyboardReport {
        if self.state != State::StretchActive {
            return kbd;
        }
        let mut out = kbd;
        for keycode in out.keycodes.iter_mut() {
            if let Some(&(_, to)) = STRETCH_MAP.iter().find(|&&(from, _)| from == *keycode) {
                *keycode = to;
            }
        }
        out
    }
}

impl Default for RemapEngine {
    fn default() -> Self {
        Self::new()
    }
}
