//! DFU transport seam and registry
//!
//! A transport carries DFU requests into the bootloader (BLE, serial, ...).
//! Transports register explicitly at configuration time and are brought up
//! and torn down in registration order; the first failure stops the pass
//! and is returned to the caller.

use heapless::Vec;

use crate::error::DfuError;

/// Largest number of transports one registry holds
pub const MAX_TRANSPORTS: usize = 4;

/// One DFU transport
pub trait DfuTransport {
    /// Bring the transport up and start accepting requests
    fn init(&mut self) -> Result<(), DfuError>;

    /// Tear the transport down
    fn close(&mut self) -> Result<(), DfuError>;
}

/// Ordered set of registered transports
pub struct TransportRegistry<'a> {
    transports: Vec<&'a mut dyn DfuTransport, MAX_TRANSPORTS>,
}

impl<'a> TransportRegistry<'a> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { transports: Vec::new() }
    }

    /// Register a transport
    ///
    /// Registration order is initialization order. Returns
    /// [`DfuError::InvalidState`] when the registry is full.
    pub fn register(&mut self, transport: &'a mut dyn DfuTransport) -> Result<(), DfuError> {
        self.transports
            .push(transport)
            .map_err(|_| DfuError::InvalidState)
    }

    /// Number of registered transports
    pub fn len(&self) -> usize {
        self.transports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }

    /// Initialize every transport in registration order
    ///
    /// Stops at the first failure and returns it; transports after the
    /// failing one are left untouched.
    pub fn init_all(&mut self) -> Result<(), DfuError> {
        for transport in self.transports.iter_mut() {
            transport.init()?;
        }
        Ok(())
    }

    /// Close every transport in registration order
    ///
    /// Same first-failure-stops contract as [`Self::init_all`].
    pub fn close_all(&mut self) -> Result<(), DfuError> {
        for transport in self.transports.iter_mut() {
            transport.close()?;
        }
        Ok(())
    }
}

impl Default for TransportRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}
