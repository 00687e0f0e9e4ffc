//! Error types for Wavemod Core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid bit value: {value}")]
    InvalidBit { value: u8 },

    #[error("First sample must start at t=0, got t={time}")]
    MisalignedStart { time: f64 },

    #[error("Sample time {next} does not follow {previous}")]
    NonIncreasingTime { previous: f64, next: f64 },

    #[error("Sample time is not finite: {time}")]
    NonFiniteTime { time: f64 },
}

/// Result type for Wavemod Core operations
pub type Result<T> = std::result::Result<T, CoreError>;
