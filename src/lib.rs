//! Host-testable library interface for usb2usb.
//!
//! The whole event pipeline - classifier, queues, remap engine,
//! encoder - is pure logic with no hardware dependencies and is
//! exported here for host-based testing (`cargo test --lib`).
//!
//! The embedded binary (main.rs, behind the `embedded` feature) wires
//! these modules to the RP2040 USB peripherals.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod hid;
pub mod host;
pub mod usb;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
