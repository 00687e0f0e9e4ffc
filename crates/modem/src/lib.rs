//! Wavemod Modem - carrier keying and waveform sampling
//!
//! This crate maps bits onto a sine carrier using amplitude, frequency
//! or phase shift keying and samples the result into a waveform.

pub mod carrier;
pub mod keying;
pub mod scheme;
pub mod sampler;
pub mod error;

pub use error::{ModemError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        carrier::Carrier,
        keying::KeyingConfig,
        scheme::{modulate, ModulatedSegment, ModulationScheme, Modulator},
        sampler::{sample, sample_all, Modulations, Sampler, DEFAULT_STEPS_PER_BIT, MAX_STEPS_PER_BIT, MIN_STEPS_PER_BIT},
        error::{ModemError, Result},
    };
}
