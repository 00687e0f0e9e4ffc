//! Sampled waveform storage

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One point of a sampled waveform
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub amplitude: f64,
}

impl Sample {
    pub fn new(time: f64, amplitude: f64) -> Self {
        Self { time, amplitude }
    }
}

/// Chronological sequence of samples on a single timeline.
///
/// The first sample sits at `t = 0` and every following timestamp is
/// strictly greater than its predecessor. Samples can only be appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    samples: Vec<Sample>,
}

impl Waveform {
    /// Create an empty waveform with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Create a waveform from existing samples, checking the timeline
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self> {
        let mut waveform = Self::with_capacity(samples.len());
        for sample in samples {
            waveform.push(sample)?;
        }
        Ok(waveform)
    }

    /// Append a sample to the end of the timeline
    pub fn push(&mut self, sample: Sample) -> Result<()> {
        if !sample.time.is_finite() {
            return Err(CoreError::NonFiniteTime { time: sample.time });
        }

        match self.samples.last() {
            None if sample.time != 0.0 => {
                return Err(CoreError::MisalignedStart { time: sample.time });
            }
            Some(last) if sample.time <= last.time => {
                return Err(CoreError::NonIncreasingTime {
                    previous: last.time,
                    next: sample.time,
                });
            }
            _ => {}
        }

        self.samples.push(sample);
        Ok(())
    }

    /// Get the number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if waveform is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get a reference to the underlying samples
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate over the samples in chronological order
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Sample times
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time)
    }

    /// Sample amplitudes
    pub fn amplitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.amplitude)
    }

    /// Largest absolute amplitude, 0 for an empty waveform
    pub fn peak(&self) -> f64 {
        self.amplitudes().fold(0.0, |acc, a| acc.max(a.abs()))
    }
}

impl Index<usize> for Waveform {
    type Output = Sample;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

impl<'a> IntoIterator for &'a Waveform {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
