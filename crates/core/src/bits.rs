//! Bits and ordered bit sequences

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// A single transmitted symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Numeric value of the bit (0 or 1)
    pub fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    /// Check if the bit is set
    pub fn is_one(self) -> bool {
        self == Bit::One
    }

    /// Character used when printing the bit
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

impl TryFrom<u8> for Bit {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            _ => Err(CoreError::InvalidBit { value }),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Bits in transmission order.
///
/// A sequence is frozen once built: there is no way to push, pop or
/// overwrite bits after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitSequence {
    bits: Vec<Bit>,
}

impl BitSequence {
    /// Create an empty bit sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the sequence holds no bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get a reference to the underlying bits
    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    /// Iterate over the bits in transmission order
    pub fn iter(&self) -> std::slice::Iter<'_, Bit> {
        self.bits.iter()
    }

    /// Bits as 0/1 values
    pub fn to_u8_vec(&self) -> Vec<u8> {
        self.bits.iter().map(|b| b.as_u8()).collect()
    }

    /// Append the low `width` bits of `value`, most significant first
    pub fn with_msb_first(mut self, value: u32, width: u32) -> Self {
        self.bits.reserve(width as usize);
        for shift in (0..width).rev() {
            self.bits.push(Bit::from((value >> shift) & 1 == 1));
        }
        self
    }
}

impl From<Vec<Bit>> for BitSequence {
    fn from(bits: Vec<Bit>) -> Self {
        Self { bits }
    }
}

impl FromIterator<Bit> for BitSequence {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Self { bits: iter.into_iter().collect() }
    }
}

impl TryFrom<&[u8]> for BitSequence {
    type Error = CoreError;

    fn try_from(values: &[u8]) -> Result<Self> {
        values.iter().map(|&v| Bit::try_from(v)).collect()
    }
}

impl<'a> IntoIterator for &'a BitSequence {
    type Item = &'a Bit;
    type IntoIter = std::slice::Iter<'a, Bit>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}

impl Index<usize> for BitSequence {
    type Output = Bit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}
