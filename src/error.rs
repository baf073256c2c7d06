//! Unified error type for usb2usb.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! The realtime pipeline itself never propagates errors: queue
//! saturation, malformed descriptors and unready endpoints are all
//! handled in place by dropping (see the module docs in `events` and
//! `usb::output`). This type covers the embedded wiring around the
//! pipeline - USB bring-up and transport faults.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // USB device role
    /// The device-side USB stack could not be initialised.
    UsbInit,

    /// An endpoint write failed after the interface reported ready.
    UsbWrite,

    // USB host role (transport collaborator)
    /// Re-arming an attached interface for its next report failed.
    RequestReportFailed,

    /// A host-role notification carried a payload larger than the
    /// bounded buffers in `host::HostEvent` can hold.
    PayloadTooLarge,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}
