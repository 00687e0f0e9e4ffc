//! Decode and modulate in one step

use anyhow::Result;
use tracing::info;

use wavemod_codecs::prelude::TaggedInput;
use wavemod_core::bits::BitSequence;
use wavemod_modem::prelude::{ModulationScheme, Modulations, Sampler};

use crate::config::WaveConfig;

/// Validated pipeline from tagged text to sampled waveforms.
///
/// Holds no state between runs; the same pipeline can serve any number
/// of inputs.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    sampler: Sampler,
}

impl Pipeline {
    /// Create a pipeline, rejecting bad settings before anything is sampled
    pub fn new(config: &WaveConfig) -> Result<Self> {
        let sampler = config.sampler()?;
        for scheme in ModulationScheme::ALL {
            sampler.check_scheme(scheme)?;
        }
        Ok(Self { sampler })
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    /// Decode tagged input into bits
    pub fn decode(&self, raw: &str) -> Result<BitSequence> {
        let input = TaggedInput::parse(raw)?;
        Ok(input.decode()?)
    }

    /// Decode tagged input and key it with every scheme
    pub fn run(&self, raw: &str) -> Result<Modulations> {
        let bits = self.decode(raw)?;
        let modulations = self.sampler.sample_all(&bits)?;
        info!(
            "Modulated {} bits into {} samples per scheme",
            bits.len(),
            modulations.len()
        );
        Ok(modulations)
    }
}
