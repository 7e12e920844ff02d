//! Secure-DFU wire result codes and the extended-error latch
//!
//! Responses to DFU requests carry a one-byte result code. A failing
//! request can attach a more specific extended-error code: the handler
//! latches it and answers [`DfuResult::ExtError`], and the host follows up
//! with a dedicated request that consumes the latched value.

/// Result code of a DFU request, as sent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DfuResult {
    Invalid,
    Success,
    OpCodeNotSupported,
    InvalidParameter,
    InsufficientResources,
    InvalidObject,
    UnsupportedType,
    OperationNotPermitted,
    OperationFailed,
    /// Details available through the extended-error latch
    ExtError,
}

impl DfuResult {
    /// Wire byte of this result code
    pub fn code(&self) -> u8 {
        match self {
            DfuResult::Invalid => 0x00,
            DfuResult::Success => 0x01,
            DfuResult::OpCodeNotSupported => 0x02,
            DfuResult::InvalidParameter => 0x03,
            DfuResult::InsufficientResources => 0x04,
            DfuResult::InvalidObject => 0x05,
            DfuResult::UnsupportedType => 0x07,
            DfuResult::OperationNotPermitted => 0x08,
            DfuResult::OperationFailed => 0x0A,
            DfuResult::ExtError => 0x0B,
        }
    }
}

/// Extended error attached to a [`DfuResult::ExtError`] response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExtError {
    NoError,
    InvalidErrorCode,
    WrongCommandFormat,
    UnknownCommand,
    InitCommandInvalid,
    FwVersionFailure,
    HwVersionFailure,
    SdVersionFailure,
    SignatureMissing,
    WrongHashType,
    HashFailed,
    WrongSignatureType,
    VerificationFailed,
    InsufficientSpace,
}

impl ExtError {
    /// Wire byte of this extended error
    pub fn code(&self) -> u8 {
        match self {
            ExtError::NoError => 0x00,
            ExtError::InvalidErrorCode => 0x01,
            ExtError::WrongCommandFormat => 0x02,
            ExtError::UnknownCommand => 0x03,
            ExtError::InitCommandInvalid => 0x04,
            ExtError::FwVersionFailure => 0x05,
            ExtError::HwVersionFailure => 0x06,
            ExtError::SdVersionFailure => 0x07,
            ExtError::SignatureMissing => 0x08,
            ExtError::WrongHashType => 0x09,
            ExtError::HashFailed => 0x0A,
            ExtError::WrongSignatureType => 0x0B,
            ExtError::VerificationFailed => 0x0C,
            ExtError::InsufficientSpace => 0x0D,
        }
    }
}

/// Set-then-consume latch for the last extended error
#[derive(Debug)]
pub struct ExtErrorLatch {
    last: ExtError,
}

impl ExtErrorLatch {
    pub fn new() -> Self {
        Self { last: ExtError::NoError }
    }

    /// Latch an extended error
    ///
    /// Returns the result code to answer the failing request with.
    pub fn set(&mut self, error: ExtError) -> DfuResult {
        self.last = error;
        DfuResult::ExtError
    }

    /// Consume the latched error
    ///
    /// Resets the latch, so a second read reports [`ExtError::NoError`].
    pub fn take(&mut self) -> ExtError {
        core::mem::replace(&mut self.last, ExtError::NoError)
    }
}

impl Default for ExtErrorLatch {
    fn default() -> Self {
        Self::new()
    }
}
