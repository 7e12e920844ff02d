//! Secure-DFU bootloader entry and continuation controller.
//!
//! Board-agnostic boot decision logic: continue an interrupted firmware
//! update, decide whether to enter bootloader mode, bring up the DFU
//! transports, and wait for a reset. Persistence, transports, and the
//! actual request handling live behind traits supplied by the firmware
//! crate; everything here is host-testable.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod controller;
pub mod error;
pub mod result_code;
pub mod settings;
pub mod transport;

pub use controller::{default_enter_check, run, BootOutcome, DfuEvent, EnterReason, EventSource};
pub use error::DfuError;
pub use settings::DfuSettings;
pub use transport::{DfuTransport, TransportRegistry};
