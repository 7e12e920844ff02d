//! Security module trait
//!
//! The security module owns the lock code, the unlock challenge/response
//! flow, and the EID key material. The GATT access controller calls into it
//! but never implements any cryptography itself. On a successful unlock the
//! security module promotes the lock state through
//! [`AccessController::set_lock_state`](crate::gatts::AccessController::set_lock_state);
//! the controller never unlocks on its own.

use crate::error::Error;

/// Size in bytes of the lock code, unlock challenge, and unlock token
pub const LOCK_KEY_SIZE: usize = 16;

/// Trait for the beacon security module
pub trait Security {
    /// Fill `challenge` with fresh random bytes
    ///
    /// Returns [`Error::Busy`] if the random source is temporarily empty;
    /// the central retries the unlock read.
    fn random_challenge(&mut self, challenge: &mut [u8; LOCK_KEY_SIZE]) -> Result<(), Error>;

    /// Snapshot `challenge` so a following unlock write can be verified
    fn unlock_prepare(&mut self, challenge: &[u8; LOCK_KEY_SIZE]);

    /// Verify an unlock token against the prepared challenge
    ///
    /// Fire-and-forget: the outcome surfaces asynchronously as a lock-state
    /// change, not as a return value.
    fn unlock_verify(&mut self, token: &[u8; LOCK_KEY_SIZE]);

    /// Replace the stored lock code
    fn lock_code_update(&mut self, key: &[u8; LOCK_KEY_SIZE]) -> Result<(), Error>;

    /// Current beacon clock value for an EID slot
    fn eid_clock(&self, slot_no: u8) -> u32;

    /// Rotation exponent (scaler) for an EID slot
    fn eid_scaler(&self, slot_no: u8) -> u8;
}
