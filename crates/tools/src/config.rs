//! Configuration management for wavemod

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use wavemod_modem::prelude::{Carrier, KeyingConfig, Modulator, Sampler, DEFAULT_STEPS_PER_BIT};

/// Carrier, keying and sampling settings for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Carrier frequency in Hz
    pub frequency: f64,
    /// Carrier amplitude
    pub amplitude: f64,
    /// Carrier phase in radians
    pub phase: f64,
    /// Seconds per bit
    #[serde(alias = "bitDuration")]
    pub bit_duration: f64,
    /// Samples generated per bit
    #[serde(alias = "stepsPerBit")]
    pub steps_per_bit: usize,
    pub keying: KeyingConfig,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            frequency: Carrier::DEFAULT_FREQUENCY,
            amplitude: Carrier::DEFAULT_AMPLITUDE,
            phase: Carrier::DEFAULT_PHASE,
            bit_duration: Carrier::DEFAULT_BIT_DURATION,
            steps_per_bit: DEFAULT_STEPS_PER_BIT,
            keying: KeyingConfig::default(),
        }
    }
}

impl WaveConfig {
    /// Build the carrier described by this configuration
    pub fn carrier(&self) -> wavemod_modem::Result<Carrier> {
        Carrier::new(self.frequency, self.amplitude, self.phase, self.bit_duration)
    }

    /// Build a sampler, validating every setting on the way
    pub fn sampler(&self) -> wavemod_modem::Result<Sampler> {
        let modulator = Modulator::new(self.carrier()?, self.keying)?;
        Sampler::new(modulator, self.steps_per_bit)
    }

    /// Load configuration from a TOML or JSON file.
    ///
    /// The content decides the format: JSON is tried first, then TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if let Ok(config) = serde_json::from_str(&content) {
            return Ok(config);
        }
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Save configuration as JSON for a `.json` path, TOML otherwise
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            _ => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))
    }
}
