//! Persisted-settings seam
//!
//! The settings store owns the flash layout and the firmware-image
//! bookkeeping; the boot controller only consumes the three decisions
//! below. Layout and update mechanics stay on the other side of this
//! trait.

use crate::error::DfuError;

/// Trait for the persisted DFU settings store
pub trait DfuSettings {
    /// Continue a previously interrupted update, if one is pending
    ///
    /// Returns `Ok(true)` when an update was (or still is) in flight and
    /// the bootloader must stay resident, `Ok(false)` when there is nothing
    /// to continue. Errors force bootloader entry at the call site.
    fn continue_update(&mut self) -> Result<bool, DfuError>;

    /// Consume the buttonless-entry request flag
    ///
    /// Returns whether the application requested bootloader entry before
    /// resetting. A `true` result clears the persisted flag before
    /// returning, so the request fires at most once; a failure to persist
    /// the clear is fatal and must not be masked by the implementation.
    fn take_buttonless_entry(&mut self) -> bool;

    /// Whether the application image in flash passes validation
    fn app_is_valid(&self) -> bool;
}
