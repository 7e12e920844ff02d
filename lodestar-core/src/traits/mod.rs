//! Collaborator traits
//!
//! These traits define the interface between the beacon core logic and the
//! external modules that own the hardware: the monotonic timer, battery and
//! temperature sensing, the security module, the slot registry, the
//! advertiser loop, and the flash/settings store.

pub mod adv;
pub mod registry;
pub mod security;
pub mod sensors;
pub mod storage;
pub mod time;

pub use adv::Advertiser;
pub use registry::{FrameType, SlotData, SlotRegistry};
pub use security::{Security, LOCK_KEY_SIZE};
pub use sensors::{BatterySensor, TemperatureSensor};
pub use storage::BeaconStorage;
pub use time::TickCounter;
