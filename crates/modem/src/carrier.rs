//! Unmodulated carrier description

use crate::{ModemError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Base sine signal that keying perturbs.
///
/// Fields are private so a constructed carrier always holds a positive,
/// finite frequency, amplitude and bit duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    frequency: f64,
    amplitude: f64,
    phase: f64,
    bit_duration: f64,
}

impl Carrier {
    /// Default carrier frequency: one cycle per bit at the default bit duration
    pub const DEFAULT_FREQUENCY: f64 = 1.0;
    pub const DEFAULT_AMPLITUDE: f64 = 1.0;
    pub const DEFAULT_PHASE: f64 = 0.0;
    pub const DEFAULT_BIT_DURATION: f64 = 1.0;

    /// Create a new carrier
    pub fn new(frequency: f64, amplitude: f64, phase: f64, bit_duration: f64) -> Result<Self> {
        Self::check_positive("frequency", frequency)?;
        Self::check_positive("amplitude", amplitude)?;
        Self::check_positive("bit duration", bit_duration)?;

        if !phase.is_finite() {
            return Err(ModemError::invalid(format!("Invalid carrier phase: {}", phase)));
        }

        if !(2.0 * PI * frequency).is_finite() {
            return Err(ModemError::invalid(format!("Carrier frequency out of range: {}", frequency)));
        }

        Ok(Self {
            frequency,
            amplitude,
            phase,
            bit_duration,
        })
    }

    fn check_positive(name: &str, value: f64) -> Result<()> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ModemError::invalid(format!("Invalid carrier {}: {}", name, value)))
        }
    }

    /// Base frequency in Hz
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Base (peak) amplitude
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Base phase in radians
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Duration of one bit in seconds
    pub fn bit_duration(&self) -> f64 {
        self.bit_duration
    }

    /// Carrier cycles that fit into one bit interval at `frequency * ratio`
    pub fn cycles_per_bit(&self, ratio: f64) -> f64 {
        self.frequency * ratio * self.bit_duration
    }
}

impl Default for Carrier {
    fn default() -> Self {
        Self {
            frequency: Self::DEFAULT_FREQUENCY,
            amplitude: Self::DEFAULT_AMPLITUDE,
            phase: Self::DEFAULT_PHASE,
            bit_duration: Self::DEFAULT_BIT_DURATION,
        }
    }
}
