//! Bootloader-side error taxonomy

/// Errors surfaced by the boot controller and its collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DfuError {
    /// Operation attempted in an unsupported state, or a bounded resource
    /// (transport registry) is exhausted
    InvalidState,
    /// A transport failed to initialize or close
    Transport,
    /// The persisted-settings store failed
    Settings,
}

impl DfuError {
    /// Mnemonic name, for log output
    pub fn name(&self) -> &'static str {
        match self {
            DfuError::InvalidState => "ERROR_INVALID_STATE",
            DfuError::Transport => "ERROR_TRANSPORT",
            DfuError::Settings => "ERROR_SETTINGS",
        }
    }
}

impl core::fmt::Display for DfuError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
