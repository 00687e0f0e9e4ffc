//! Binary keying schemes

use crate::carrier::Carrier;
use crate::keying::KeyingConfig;
use crate::{ModemError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use wavemod_core::bits::Bit;

/// Carrier attribute switched by the bit value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModulationScheme {
    /// Amplitude shift keying
    Am,
    /// Frequency shift keying
    Fm,
    /// Binary phase shift keying
    Pm,
}

impl ModulationScheme {
    pub const ALL: [ModulationScheme; 3] = [ModulationScheme::Am, ModulationScheme::Fm, ModulationScheme::Pm];
}

impl fmt::Display for ModulationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModulationScheme::Am => "AM",
            ModulationScheme::Fm => "FM",
            ModulationScheme::Pm => "PM",
        };
        f.write_str(name)
    }
}

/// Sine parameters used while rendering a single bit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulatedSegment {
    pub frequency: f64,
    pub amplitude: f64,
    pub phase: f64,
}

impl ModulatedSegment {
    /// Value of the segment at `t_local` seconds after the start of its bit
    pub fn value_at(&self, t_local: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.frequency * t_local + self.phase).sin()
    }
}

/// Keys bits onto a fixed carrier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modulator {
    carrier: Carrier,
    keying: KeyingConfig,
}

impl Modulator {
    /// Create a new modulator
    pub fn new(carrier: Carrier, keying: KeyingConfig) -> Result<Self> {
        keying.validate()?;

        // Every keyed frequency has to stay finite over a whole bit
        for ratio in [keying.fm_low_ratio, keying.fm_high_ratio] {
            let angular = 2.0 * PI * carrier.frequency() * ratio;
            let cycles = carrier.cycles_per_bit(ratio);
            if !(angular.is_finite() && cycles.is_finite()) {
                return Err(ModemError::invalid(format!(
                    "Carrier frequency {} out of range at FM ratio {}",
                    carrier.frequency(),
                    ratio
                )));
            }
        }

        Ok(Self { carrier, keying })
    }

    pub fn carrier(&self) -> &Carrier {
        &self.carrier
    }

    pub fn keying(&self) -> &KeyingConfig {
        &self.keying
    }

    /// Derive the segment parameters for one bit.
    ///
    /// Only the attribute owned by `scheme` changes; the other two are
    /// taken from the carrier as is. PM offsets are relative to the
    /// carrier phase and never carry over into the next bit.
    pub fn modulate(&self, bit: Bit, scheme: ModulationScheme) -> ModulatedSegment {
        let carrier = &self.carrier;
        let mut segment = ModulatedSegment {
            frequency: carrier.frequency(),
            amplitude: carrier.amplitude(),
            phase: carrier.phase(),
        };

        match scheme {
            ModulationScheme::Am => {
                if !bit.is_one() {
                    segment.amplitude = carrier.amplitude() * self.keying.am_low_ratio;
                }
            }
            ModulationScheme::Fm => {
                let ratio = if bit.is_one() {
                    self.keying.fm_high_ratio
                } else {
                    self.keying.fm_low_ratio
                };
                segment.frequency = carrier.frequency() * ratio;
            }
            ModulationScheme::Pm => {
                if !bit.is_one() {
                    segment.phase = carrier.phase() + PI;
                }
            }
        }

        segment
    }
}

/// Derive the segment for one bit with the default keying constants
pub fn modulate(bit: Bit, carrier: &Carrier, scheme: ModulationScheme) -> ModulatedSegment {
    Modulator {
        carrier: *carrier,
        keying: KeyingConfig::default(),
    }
    .modulate(bit, scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier() -> Carrier {
        Carrier::new(10.0, 2.0, 0.5, 0.1).unwrap()
    }

    #[test]
    fn test_am_keying() {
        let c = carrier();
        let high = modulate(Bit::One, &c, ModulationScheme::Am);
        let low = modulate(Bit::Zero, &c, ModulationScheme::Am);

        assert_eq!(high.amplitude, c.amplitude());
        assert_eq!(low.amplitude, 0.0);
        assert!(low.amplitude < c.amplitude());
        for segment in [high, low] {
            assert_eq!(segment.frequency, c.frequency());
            assert_eq!(segment.phase, c.phase());
        }
    }

    #[test]
    fn test_am_configured_low_level() {
        let keying = KeyingConfig::default().with_am_low_ratio(0.5).unwrap();
        let modulator = Modulator::new(carrier(), keying).unwrap();
        assert_eq!(modulator.modulate(Bit::Zero, ModulationScheme::Am).amplitude, 1.0);
        assert_eq!(modulator.modulate(Bit::One, ModulationScheme::Am).amplitude, 2.0);
    }

    #[test]
    fn test_fm_keying() {
        let c = carrier();
        let high = modulate(Bit::One, &c, ModulationScheme::Fm);
        let low = modulate(Bit::Zero, &c, ModulationScheme::Fm);

        assert_eq!(high.frequency, 20.0);
        assert_eq!(low.frequency, 10.0);
        for segment in [high, low] {
            assert_eq!(segment.amplitude, c.amplitude());
            assert_eq!(segment.phase, c.phase());
        }
    }

    #[test]
    fn test_pm_keying() {
        let c = carrier();
        let high = modulate(Bit::One, &c, ModulationScheme::Pm);
        let low = modulate(Bit::Zero, &c, ModulationScheme::Pm);

        assert_eq!(high.phase - c.phase(), 0.0);
        let offset = (low.phase - c.phase()).rem_euclid(2.0 * PI);
        assert!((offset - PI).abs() < 1e-12);
        for segment in [high, low] {
            assert_eq!(segment.amplitude, c.amplitude());
            assert_eq!(segment.frequency, c.frequency());
        }
    }

    #[test]
    fn test_pm_inverts_waveform() {
        let c = carrier();
        let high = modulate(Bit::One, &c, ModulationScheme::Pm);
        let low = modulate(Bit::Zero, &c, ModulationScheme::Pm);
        for k in 0..10 {
            let t = k as f64 * 0.01;
            assert!((high.value_at(t) + low.value_at(t)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_invalid_keying_rejected() {
        let keying = KeyingConfig {
            am_low_ratio: 2.0,
            ..KeyingConfig::default()
        };
        assert!(Modulator::new(carrier(), keying).is_err());
    }

    #[test]
    fn test_out_of_range_keyed_frequency_rejected() {
        let carrier = Carrier::new(1e307, 1.0, 0.0, 1.0).unwrap();
        assert!(Modulator::new(carrier, KeyingConfig::default()).is_ok());

        let keying = KeyingConfig::default().with_fm_ratios(100.0, 1.0).unwrap();
        let err = Modulator::new(carrier, keying).unwrap_err();
        assert!(matches!(err, ModemError::InvalidConfiguration { .. }));

        // Long bits can overflow the cycle count even at a sane frequency
        let carrier = Carrier::new(1e300, 1.0, 0.0, 1e10).unwrap();
        assert!(Modulator::new(carrier, KeyingConfig::default()).is_err());
    }

    #[test]
    fn test_scheme_names() {
        let names: Vec<String> = ModulationScheme::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["AM", "FM", "PM"]);
    }
}
