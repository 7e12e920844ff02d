//! Lock-gated GATT access controller
//!
//! Mediates read/write authorization requests against the Eddystone
//! Configuration Service characteristics. A single lock state gates the
//! characteristic set: while locked only the lock-state and
//! remain-connectable characteristics are readable and only the unlock
//! characteristic is writable.
//!
//! Every request produces one synchronous decision value which the BLE
//! stack glue translates into an authorization reply. The one exception is
//! a slot-data write longer than one transfer unit: the transport layer
//! acknowledges those, so this controller stays silent
//! ([`WriteReply::NoReply`]).

pub mod chars;
mod read;
mod write;

use heapless::Vec;

use crate::error::Error;
use crate::traits::registry::MAX_SLOT_FRAME_LEN;
use crate::traits::{Advertiser, BeaconStorage, Security, SlotRegistry};

pub use chars::Characteristic;

/// Lock byte written to the lock-state characteristic to lock the beacon
pub const LOCK_BYTE_LOCK: u8 = 0x00;
/// Lock byte disabling automatic relock on disconnect
pub const LOCK_BYTE_DISABLE_AUTO_RELOCK: u8 = 0x02;

/// Largest attribute value this controller serves or echoes
pub const ATT_VALUE_MAX: usize = MAX_SLOT_FRAME_LEN;

/// Attribute value carried in a decision
pub type AttValue = Vec<u8, ATT_VALUE_MAX>;

/// GATT-level access control state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockState {
    Locked,
    Unlocked,
}

impl LockState {
    /// Wire byte served by lock-state reads
    pub fn byte(&self) -> u8 {
        match self {
            LockState::Locked => 0x00,
            LockState::Unlocked => 0x01,
        }
    }
}

/// Rejection status forwarded to the BLE stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GattStatus {
    ReadNotPermitted,
    WriteNotPermitted,
    InvalidAttributeLength,
}

/// Decision for a read authorization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadReply {
    /// Serve this value
    Value(AttValue),
    /// Serve the value stored in the GATT database
    Stored,
    /// Reject the read
    Rejected(GattStatus),
}

impl ReadReply {
    fn value(bytes: &[u8]) -> Result<Self, Error> {
        let mut value = AttValue::new();
        value.extend_from_slice(bytes).map_err(|_| Error::InvalidLength)?;
        Ok(ReadReply::Value(value))
    }
}

/// Decision for a write authorization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteReply {
    /// Accept the write; `value` is what the stack stores (it may differ
    /// from the request payload when the controller coerces it)
    Accept { value: AttValue },
    /// Reject the write; the characteristic value is unchanged
    Reject(GattStatus),
    /// Say nothing; the transport layer acknowledges long writes
    NoReply,
}

impl WriteReply {
    fn accept(bytes: &[u8]) -> Result<Self, Error> {
        let mut value = AttValue::new();
        value.extend_from_slice(bytes).map_err(|_| Error::InvalidLength)?;
        Ok(WriteReply::Accept { value })
    }
}

/// Bundle of the collaborator seams the GATT layer needs
///
/// Blanket-implemented for anything providing all four traits; test code
/// supplies a single mock.
pub trait GattEnv: Security + SlotRegistry + Advertiser + BeaconStorage {}

impl<T: Security + SlotRegistry + Advertiser + BeaconStorage> GattEnv for T {}

/// Access controller for the configuration characteristics
///
/// Owns the lock state and the active-slot index. One instance exists per
/// beacon; all calls arrive on the single BLE event context.
#[derive(Debug)]
pub struct AccessController {
    lock_state: LockState,
    active_slot: u8,
    remain_connectable_supported: bool,
}

impl AccessController {
    /// Create a controller in the locked state with slot 0 active
    pub fn new(remain_connectable_supported: bool) -> Self {
        Self {
            lock_state: LockState::Locked,
            active_slot: 0,
            remain_connectable_supported,
        }
    }

    /// Current lock state
    pub fn lock_state(&self) -> LockState {
        self.lock_state
    }

    /// Force the lock state
    ///
    /// Called by the security module glue when an unlock verification
    /// succeeds (or when an auto-relock fires); the controller itself only
    /// ever transitions to [`LockState::Locked`].
    pub fn set_lock_state(&mut self, state: LockState) {
        self.lock_state = state;
    }

    /// Currently selected slot index
    pub fn active_slot(&self) -> u8 {
        self.active_slot
    }

    /// Handle a read authorization request
    pub fn handle_read<E: GattEnv>(
        &mut self,
        env: &mut E,
        ch: Characteristic,
    ) -> Result<ReadReply, Error> {
        match self.lock_state {
            LockState::Unlocked => {
                if ch == Characteristic::Unlock {
                    Ok(ReadReply::Rejected(GattStatus::ReadNotPermitted))
                } else {
                    self.handle_unlocked_read(env, ch)
                }
            }
            LockState::Locked => {
                if ch == Characteristic::Unlock {
                    self.handle_unlock_read(env)
                } else {
                    self.handle_locked_read(ch)
                }
            }
        }
    }

    /// Handle a write authorization request
    pub fn handle_write<E: GattEnv>(
        &mut self,
        env: &mut E,
        ch: Characteristic,
        data: &[u8],
    ) -> Result<WriteReply, Error> {
        match self.lock_state {
            LockState::Unlocked => {
                if ch == Characteristic::Unlock {
                    Ok(WriteReply::Reject(GattStatus::WriteNotPermitted))
                } else {
                    self.handle_unlocked_write(env, ch, data)
                }
            }
            LockState::Locked => {
                if ch == Characteristic::Unlock {
                    self.handle_unlock_write(env, data)
                } else {
                    Ok(WriteReply::Reject(GattStatus::WriteNotPermitted))
                }
            }
        }
    }
}
