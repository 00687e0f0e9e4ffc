//! Waveform sampling
//!
//! Every bit gets the same number of evenly spaced samples over its own
//! interval. Each interval is phase-referenced to its own start, so the
//! sine restarts at the segment phase on every bit boundary.

use crate::carrier::Carrier;
use crate::keying::KeyingConfig;
use crate::scheme::{ModulationScheme, Modulator};
use crate::{ModemError, Result};
use tracing::debug;
use wavemod_core::bits::{Bit, BitSequence};
use wavemod_core::waveform::{Sample, Waveform};

/// Fewest samples per bit that still resolve a sine period
pub const MIN_STEPS_PER_BIT: usize = 2;

/// Default samples per bit
pub const DEFAULT_STEPS_PER_BIT: usize = 200;

/// Most samples per bit a sampler accepts
pub const MAX_STEPS_PER_BIT: usize = 1 << 20;

/// Relative tolerance when checking for a whole number of FM cycles per bit
const WHOLE_CYCLE_TOLERANCE: f64 = 1e-9;

/// Renders bit sequences into sampled waveforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    modulator: Modulator,
    steps_per_bit: usize,
}

impl Sampler {
    /// Create a new sampler
    pub fn new(modulator: Modulator, steps_per_bit: usize) -> Result<Self> {
        if !(MIN_STEPS_PER_BIT..=MAX_STEPS_PER_BIT).contains(&steps_per_bit) {
            return Err(ModemError::invalid(format!(
                "Steps per bit must be between {} and {}: {}",
                MIN_STEPS_PER_BIT, MAX_STEPS_PER_BIT, steps_per_bit
            )));
        }

        let sampler = Self {
            modulator,
            steps_per_bit,
        };

        // Adjacent sample times must stay distinguishable
        let step = sampler.step_width();
        if !(step.is_finite() && step > 0.0) {
            return Err(ModemError::invalid(format!(
                "Bit duration {} is too short for {} steps per bit",
                modulator.carrier().bit_duration(),
                steps_per_bit
            )));
        }

        Ok(sampler)
    }

    pub fn steps_per_bit(&self) -> usize {
        self.steps_per_bit
    }

    pub fn modulator(&self) -> &Modulator {
        &self.modulator
    }

    /// Time between two consecutive samples
    pub fn step_width(&self) -> f64 {
        self.modulator.carrier().bit_duration() / self.steps_per_bit as f64
    }

    /// Sample `bits` keyed with `scheme`.
    ///
    /// Yields exactly `steps_per_bit * bits.len()` samples, none for an
    /// empty sequence.
    pub fn sample(&self, bits: &BitSequence, scheme: ModulationScheme) -> Result<Waveform> {
        self.check_scheme(scheme)?;

        debug!(
            "Calculating {} waveform for {} using {} steps per interval",
            scheme, bits, self.steps_per_bit
        );

        let keyed = self.keyed_bits(bits, scheme);
        let bit_duration = self.modulator.carrier().bit_duration();
        let step = self.step_width();
        let total = self.steps_per_bit.checked_mul(keyed.len()).ok_or_else(|| {
            ModemError::invalid(format!(
                "{} bits at {} steps per bit exceed the sample limit",
                keyed.len(),
                self.steps_per_bit
            ))
        })?;
        let mut waveform = Waveform::with_capacity(total);

        for (idx, &bit) in keyed.iter().enumerate() {
            let segment = self.modulator.modulate(bit, scheme);
            let start = idx as f64 * bit_duration;

            for j in 0..self.steps_per_bit {
                let t_local = j as f64 * step;
                waveform.push(Sample::new(start + t_local, segment.value_at(t_local)))?;
            }
        }

        Ok(waveform)
    }

    /// Bits that actually select the segment parameters.
    ///
    /// Identical to the input except for differential PM, where the first
    /// bit is always unshifted and every later `0` flips the inversion.
    fn keyed_bits(&self, bits: &BitSequence, scheme: ModulationScheme) -> Vec<Bit> {
        if scheme != ModulationScheme::Pm || !self.modulator.keying().pm_differential {
            return bits.bits().to_vec();
        }

        let mut inverted = false;
        bits.iter()
            .enumerate()
            .map(|(idx, &bit)| {
                if idx > 0 && !bit.is_one() {
                    inverted = !inverted;
                }
                Bit::from(!inverted)
            })
            .collect()
    }

    /// Sample `bits` under every scheme on one shared timeline
    pub fn sample_all(&self, bits: &BitSequence) -> Result<Modulations> {
        Ok(Modulations {
            bits: bits.clone(),
            steps_per_bit: self.steps_per_bit,
            am: self.sample(bits, ModulationScheme::Am)?,
            fm: self.sample(bits, ModulationScheme::Fm)?,
            pm: self.sample(bits, ModulationScheme::Pm)?,
        })
    }

    /// Check scheme-specific constraints on the carrier.
    ///
    /// FM needs a whole number of carrier cycles per bit at both keyed
    /// frequencies; AM and PM accept any carrier.
    pub fn check_scheme(&self, scheme: ModulationScheme) -> Result<()> {
        if scheme != ModulationScheme::Fm {
            return Ok(());
        }

        let carrier = self.modulator.carrier();
        let keying = self.modulator.keying();

        for ratio in [keying.fm_low_ratio, keying.fm_high_ratio] {
            let cycles = carrier.cycles_per_bit(ratio);
            let rounded = cycles.round();
            let whole = (cycles - rounded).abs() <= WHOLE_CYCLE_TOLERANCE * cycles.max(1.0);
            if rounded < 1.0 || !whole {
                return Err(ModemError::invalid(format!(
                    "FM needs a whole number of carrier cycles per bit, got {} at ratio {}",
                    cycles, ratio
                )));
            }
        }

        Ok(())
    }
}

/// The same bit sequence keyed with every scheme over one timeline
#[derive(Debug, Clone, PartialEq)]
pub struct Modulations {
    pub bits: BitSequence,
    pub steps_per_bit: usize,
    pub am: Waveform,
    pub fm: Waveform,
    pub pm: Waveform,
}

impl Modulations {
    /// Waveform for one scheme
    pub fn get(&self, scheme: ModulationScheme) -> &Waveform {
        match scheme {
            ModulationScheme::Am => &self.am,
            ModulationScheme::Fm => &self.fm,
            ModulationScheme::Pm => &self.pm,
        }
    }

    /// Number of samples on the shared timeline
    pub fn len(&self) -> usize {
        self.am.len()
    }

    pub fn is_empty(&self) -> bool {
        self.am.is_empty()
    }

    /// Largest absolute amplitude across all schemes
    pub fn peak(&self) -> f64 {
        ModulationScheme::ALL
            .iter()
            .map(|&scheme| self.get(scheme).peak())
            .fold(0.0, f64::max)
    }
}

/// Sample `bits` with the default keying constants
pub fn sample(
    bits: &BitSequence,
    carrier: &Carrier,
    scheme: ModulationScheme,
    steps_per_bit: usize,
) -> Result<Waveform> {
    let modulator = Modulator::new(*carrier, KeyingConfig::default())?;
    Sampler::new(modulator, steps_per_bit)?.sample(bits, scheme)
}

/// Sample `bits` under every scheme.
///
/// Validation matches [`sample`]; the first failing scheme aborts the
/// whole run.
pub fn sample_all(
    bits: &BitSequence,
    carrier: &Carrier,
    keying: &KeyingConfig,
    steps_per_bit: usize,
) -> Result<Modulations> {
    Sampler::new(Modulator::new(*carrier, *keying)?, steps_per_bit)?.sample_all(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn bits(values: &[u8]) -> BitSequence {
        BitSequence::try_from(values).unwrap()
    }

    #[test]
    fn test_sample_count_and_timeline() {
        let carrier = Carrier::new(1.0, 1.0, 0.0, 0.5).unwrap();
        let waveform = sample(&bits(&[1, 0, 1]), &carrier, ModulationScheme::Am, 8).unwrap();

        assert_eq!(waveform.len(), 24);
        assert_eq!(waveform[0].time, 0.0);
        assert!((waveform[8].time - 0.5).abs() < 1e-12);
        assert!((waveform[23].time - (1.0 + 7.0 * 0.5 / 8.0)).abs() < 1e-12);
        for pair in waveform.samples().windows(2) {
            assert!(pair[1].time > pair[0].time);
        }
    }

    #[test]
    fn test_am_on_off_levels() {
        let carrier = Carrier::default();
        let waveform = sample(&bits(&[0, 1, 0, 1]), &carrier, ModulationScheme::Am, 4).unwrap();
        assert_eq!(waveform.len(), 16);

        // Samples at quarter periods: 0, 1, 0, -1 for a full-amplitude bit
        let expected = [0.0, 1.0, 0.0, -1.0];
        for (group, bit) in [0, 1, 0, 1].iter().enumerate() {
            for j in 0..4 {
                let value = waveform[group * 4 + j].amplitude;
                let want = if *bit == 1 { expected[j] } else { 0.0 };
                assert!((value - want).abs() < 1e-9, "sample {} was {}", group * 4 + j, value);
            }
        }
    }

    #[test]
    fn test_fm_doubles_frequency_for_one() {
        let carrier = Carrier::default();
        let waveform = sample(&bits(&[1]), &carrier, ModulationScheme::Fm, 8).unwrap();
        // Two cycles in one bit: sin(2*pi*2*t) peaks at t = 1/8
        assert!((waveform[1].amplitude - 1.0).abs() < 1e-9);
        assert!(waveform[2].amplitude.abs() < 1e-9);
    }

    #[test]
    fn test_pm_restarts_every_bit() {
        let carrier = Carrier::default();
        let waveform = sample(&bits(&[1, 0, 0]), &carrier, ModulationScheme::Pm, 4).unwrap();
        // Non-accumulating: both zero bits have the same inverted shape
        assert!((waveform[1].amplitude - 1.0).abs() < 1e-9);
        assert!((waveform[5].amplitude + 1.0).abs() < 1e-9);
        assert!((waveform[9].amplitude + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pm_differential() {
        let keying = KeyingConfig::default().with_pm_differential(true);
        let modulator = Modulator::new(Carrier::default(), keying).unwrap();
        let sampler = Sampler::new(modulator, 4).unwrap();

        let input = bits(&[0, 0, 1, 0]);
        assert_eq!(
            sampler.keyed_bits(&input, ModulationScheme::Pm),
            vec![Bit::One, Bit::Zero, Bit::Zero, Bit::One]
        );
        // Other schemes ignore the differential flag
        assert_eq!(sampler.keyed_bits(&input, ModulationScheme::Am), input.bits().to_vec());

        let waveform = sampler.sample(&input, ModulationScheme::Pm).unwrap();
        let peaks: Vec<f64> = (0..4).map(|i| waveform[i * 4 + 1].amplitude).collect();
        for (got, want) in peaks.iter().zip([1.0, -1.0, -1.0, 1.0]) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_steps_per_bit_too_small() {
        let carrier = Carrier::default();
        for scheme in ModulationScheme::ALL {
            for steps in [0, 1] {
                let err = sample(&bits(&[1, 0]), &carrier, scheme, steps).unwrap_err();
                assert!(matches!(err, ModemError::InvalidConfiguration { .. }));
            }
        }
    }

    #[test]
    fn test_steps_per_bit_too_large() {
        let modulator = Modulator::new(Carrier::default(), KeyingConfig::default()).unwrap();
        for steps in [MAX_STEPS_PER_BIT + 1, usize::MAX] {
            assert!(matches!(
                Sampler::new(modulator, steps),
                Err(ModemError::InvalidConfiguration { .. })
            ));
        }
        assert!(Sampler::new(modulator, MAX_STEPS_PER_BIT).is_ok());
    }

    #[test]
    fn test_vanishing_step_width_rejected() {
        // Subnormal bit duration: bit_duration / 200 rounds to zero
        let carrier = Carrier::new(1.0, 1.0, 0.0, 1e-322).unwrap();
        let modulator = Modulator::new(carrier, KeyingConfig::default()).unwrap();
        assert!(matches!(
            Sampler::new(modulator, 200),
            Err(ModemError::InvalidConfiguration { .. })
        ));
        let err = sample(&bits(&[1, 0]), &carrier, ModulationScheme::Am, 200).unwrap_err();
        assert!(matches!(err, ModemError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_overflowing_frequency_rejected() {
        // Cycles per bit overflow to infinity
        let carrier = Carrier::new(1e300, 1.0, 0.0, 1e10).unwrap();
        for scheme in ModulationScheme::ALL {
            let err = sample(&bits(&[1, 0]), &carrier, scheme, 4).unwrap_err();
            assert!(matches!(err, ModemError::InvalidConfiguration { .. }));
        }
    }

    #[test]
    fn test_fm_requires_whole_cycles() {
        let carrier = Carrier::new(1.5, 1.0, 0.0, 1.0).unwrap();
        assert!(sample(&bits(&[1]), &carrier, ModulationScheme::Fm, 16).is_err());
        // AM and PM have no such restriction
        assert!(sample(&bits(&[1]), &carrier, ModulationScheme::Am, 16).is_ok());
        assert!(sample(&bits(&[1]), &carrier, ModulationScheme::Pm, 16).is_ok());

        let carrier = Carrier::new(1000.0, 1.0, 0.0, 0.01).unwrap();
        assert!(sample(&bits(&[1, 0]), &carrier, ModulationScheme::Fm, 64).is_ok());
    }

    #[test]
    fn test_empty_sequence() {
        let modulations = sample_all(&BitSequence::new(), &Carrier::default(), &KeyingConfig::default(), 200).unwrap();
        assert!(modulations.is_empty());
        assert!(modulations.fm.is_empty());
        assert!(modulations.pm.is_empty());
        assert_eq!(modulations.peak(), 0.0);
    }

    #[test]
    fn test_sample_all_shares_timeline() {
        let modulations = sample_all(&bits(&[1, 0, 1]), &Carrier::default(), &KeyingConfig::default(), 10).unwrap();
        assert_eq!(modulations.len(), 30);
        let am: Vec<f64> = modulations.am.times().collect();
        let fm: Vec<f64> = modulations.fm.times().collect();
        let pm: Vec<f64> = modulations.pm.times().collect();
        assert_eq!(am, fm);
        assert_eq!(am, pm);
        assert!((modulations.peak() - 1.0).abs() < 1e-9);
    }

    #[quickcheck]
    fn prop_sample_count(values: Vec<bool>, steps: u8) -> TestResult {
        let steps = steps as usize;
        if steps < MIN_STEPS_PER_BIT {
            return TestResult::discard();
        }
        let seq: BitSequence = values.iter().map(|&b| Bit::from(b)).collect();
        let carrier = Carrier::default();
        TestResult::from_bool(ModulationScheme::ALL.iter().all(|&scheme| {
            sample(&seq, &carrier, scheme, steps)
                .map(|w| w.len() == steps * seq.len())
                .unwrap_or(false)
        }))
    }
}
