//! Error types for Wavemod Modem

use thiserror::Error;

/// Modem error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModemError {
    #[error("Invalid configuration: {msg}")]
    InvalidConfiguration { msg: String },

    #[error("Core error: {0}")]
    Core(#[from] wavemod_core::CoreError),
}

impl ModemError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ModemError::InvalidConfiguration { msg: msg.into() }
    }
}

/// Result type for Wavemod Modem operations
pub type Result<T> = std::result::Result<T, ModemError>;
