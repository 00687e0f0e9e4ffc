//! Wavemod Core - bits and sampled waveforms
//!
//! This crate holds the value types shared by every stage of the
//! modulator: the decoded bit sequence and the sampled waveform.

pub mod bits;
pub mod waveform;
pub mod error;

pub use error::{CoreError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        bits::{Bit, BitSequence},
        waveform::{Sample, Waveform},
        error::{CoreError, Result},
    };
}
