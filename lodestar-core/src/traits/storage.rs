//! Flash/settings store trait

use crate::error::Error;

/// Trait for the external flash and settings store
pub trait BeaconStorage {
    /// Erase all persisted beacon configuration
    ///
    /// Blocks the single foreground context until the flash operation
    /// completes. Returns [`Error::Busy`] if the flash driver cannot accept
    /// the request yet.
    fn factory_reset(&mut self) -> Result<(), Error>;
}
