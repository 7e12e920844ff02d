//! Beacon core error taxonomy
//!
//! One flat enum shared by the stopwatch, timing resolver, and GATT access
//! controller. The mnemonic names mirror the classic SDK return codes so
//! that log output stays greppable against central-side tooling.

/// Errors surfaced by the beacon configuration core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Malformed caller input (empty slot list, zero stopwatch wrap)
    InvalidParam,
    /// Operation attempted against exhausted or missing state
    InvalidState,
    /// GATT write payload length does not match the characteristic's rule
    InvalidLength,
    /// Access attempted against the current lock state
    NotPermitted,
    /// Transient collaborator failure; caller may retry
    Busy,
}

impl Error {
    /// Mnemonic name for log and test output
    pub fn name(&self) -> &'static str {
        match self {
            Error::InvalidParam => "ERROR_INVALID_PARAM",
            Error::InvalidState => "ERROR_INVALID_STATE",
            Error::InvalidLength => "ERROR_INVALID_LENGTH",
            Error::NotPermitted => "ERROR_NOT_PERMITTED",
            Error::Busy => "ERROR_BUSY",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
