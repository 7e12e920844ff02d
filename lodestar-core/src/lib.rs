//! Board-agnostic core logic for the Lodestar Eddystone beacon
//!
//! This crate contains all beacon configuration logic that does not depend
//! on specific hardware or SoftDevice implementations:
//!
//! - Collaborator traits (tick counter, sensors, security, slot registry)
//! - Multiplexed elapsed-interval stopwatch
//! - Advertising timing resolver (round-robin slot cycle with eTLM
//!   interleaving)
//! - Telemetry (TLM) frame builder
//! - Lock-gated GATT characteristic access controller
//!
//! Everything runs in a single foreground context; mutation goes through
//! `&mut self` and no internal locking is used.

#![no_std]
#![deny(unsafe_code)]

// Host property tests use proptest, which needs std.
#[cfg(test)]
extern crate std;

pub mod error;
pub mod gatts;
pub mod stopwatch;
pub mod timing;
pub mod tlm;
pub mod traits;

pub use error::Error;
