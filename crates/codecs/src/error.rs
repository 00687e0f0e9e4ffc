//! Error types for Wavemod Codecs

use crate::symbol::InputTag;
use thiserror::Error;

/// Codec error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid {tag} symbol {symbol:?} at position {position}")]
    InvalidSymbol {
        tag: InputTag,
        symbol: char,
        position: usize,
    },

    #[error("Unknown input prefix: {tag}_")]
    UnknownTag { tag: String },
}

impl CodecError {
    /// Whether the input was rejected for its tag rather than its content
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, CodecError::UnknownTag { .. })
    }
}

/// Result type for Wavemod Codec operations
pub type Result<T> = std::result::Result<T, CodecError>;
