//! Keying constants for the low and high bit values

use crate::{ModemError, Result};
use serde::{Deserialize, Serialize};

/// Per-scheme constants that decide how far a `0` bit moves away from the
/// carrier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyingConfig {
    /// AM amplitude of a `0` bit as a fraction of the carrier amplitude
    pub am_low_ratio: f64,
    /// FM frequency multiplier for a `1` bit
    pub fm_high_ratio: f64,
    /// FM frequency multiplier for a `0` bit
    pub fm_low_ratio: f64,
    /// Key PM differentially: every `0` after the first bit toggles the
    /// 180 degree inversion instead of selecting it directly
    pub pm_differential: bool,
}

impl KeyingConfig {
    pub const DEFAULT_AM_LOW_RATIO: f64 = 0.0;
    pub const DEFAULT_FM_HIGH_RATIO: f64 = 2.0;
    pub const DEFAULT_FM_LOW_RATIO: f64 = 1.0;

    /// Check that the constants describe a usable keying
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.am_low_ratio) {
            return Err(ModemError::invalid(format!(
                "AM low ratio must be in [0, 1): {}",
                self.am_low_ratio
            )));
        }

        if !(self.fm_low_ratio.is_finite() && self.fm_low_ratio > 0.0) {
            return Err(ModemError::invalid(format!(
                "FM low ratio must be positive: {}",
                self.fm_low_ratio
            )));
        }

        if !(self.fm_high_ratio.is_finite() && self.fm_high_ratio > self.fm_low_ratio) {
            return Err(ModemError::invalid(format!(
                "FM high ratio {} must exceed low ratio {}",
                self.fm_high_ratio, self.fm_low_ratio
            )));
        }

        Ok(())
    }

    /// Set the AM low amplitude ratio
    pub fn with_am_low_ratio(mut self, ratio: f64) -> Result<Self> {
        self.am_low_ratio = ratio;
        self.validate()?;
        Ok(self)
    }

    /// Set the FM frequency multipliers
    pub fn with_fm_ratios(mut self, high: f64, low: f64) -> Result<Self> {
        self.fm_high_ratio = high;
        self.fm_low_ratio = low;
        self.validate()?;
        Ok(self)
    }

    /// Enable or disable differential phase keying
    pub fn with_pm_differential(mut self, differential: bool) -> Self {
        self.pm_differential = differential;
        self
    }
}

impl Default for KeyingConfig {
    fn default() -> Self {
        Self {
            am_low_ratio: Self::DEFAULT_AM_LOW_RATIO,
            fm_high_ratio: Self::DEFAULT_FM_HIGH_RATIO,
            fm_low_ratio: Self::DEFAULT_FM_LOW_RATIO,
            pm_differential: false,
        }
    }
}
