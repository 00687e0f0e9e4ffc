//! Tagged input decoding
//!
//! Input text carries an optional prefix selecting how the rest is read:
//!
//! * no prefix - raw binary, one bit per `0`/`1` character
//! * `a_` - 7-bit ASCII, seven bits per character
//! * `d_` - binary coded decimal, four bits per digit
//!
//! All bit groups are emitted most significant bit first.

use crate::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use wavemod_core::bits::BitSequence;

/// Separator between an input prefix and the payload
const TAG_SEPARATOR: char = '_';

/// How the payload of a tagged input is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputTag {
    Binary,
    Ascii,
    Bcd,
}

impl InputTag {
    /// All supported tags, in selector order
    pub const ALL: [InputTag; 3] = [InputTag::Binary, InputTag::Bcd, InputTag::Ascii];

    /// Prefix marking this tag on raw input
    pub fn prefix(&self) -> &'static str {
        match self {
            InputTag::Binary => "",
            InputTag::Ascii => "a_",
            InputTag::Bcd => "d_",
        }
    }

    /// Human readable selector label
    pub fn label(&self) -> &'static str {
        match self {
            InputTag::Binary => "1-bit Binary",
            InputTag::Ascii => "7-bit ASCII",
            InputTag::Bcd => "4-bit Binary Coded Decimal",
        }
    }

    /// Look up a tag by its selector label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.label() == label)
    }

    /// Number of bits each input character expands to
    pub fn bits_per_symbol(&self) -> u32 {
        match self {
            InputTag::Binary => 1,
            InputTag::Ascii => 7,
            InputTag::Bcd => 4,
        }
    }

    /// Map one input character to its code, or `None` if it is not valid
    /// under this tag
    fn code_of(&self, symbol: char) -> Option<u32> {
        match self {
            InputTag::Binary => match symbol {
                '0' => Some(0),
                '1' => Some(1),
                _ => None,
            },
            InputTag::Ascii => symbol.is_ascii().then_some(symbol as u32),
            InputTag::Bcd => symbol.to_digit(10),
        }
    }
}

impl fmt::Display for InputTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputTag::Binary => "binary",
            InputTag::Ascii => "ASCII",
            InputTag::Bcd => "BCD",
        };
        f.write_str(name)
    }
}

/// Raw input split into its tag and payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedInput {
    pub tag: InputTag,
    pub body: String,
}

impl TaggedInput {
    /// Combine a selected tag with free text
    pub fn new(tag: InputTag, body: impl Into<String>) -> Self {
        Self {
            tag,
            body: body.into(),
        }
    }

    /// Split raw input into tag and payload.
    ///
    /// Text before the first `_` counts as a prefix only if it is non-empty
    /// and purely alphabetic; anything else is binary payload.
    pub fn parse(raw: &str) -> Result<Self> {
        if let Some((prefix, body)) = raw.split_once(TAG_SEPARATOR) {
            if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphabetic()) {
                let tag = match prefix {
                    "a" => InputTag::Ascii,
                    "d" => InputTag::Bcd,
                    _ => {
                        warn!("Could not evaluate {}: unknown prefix", raw);
                        return Err(CodecError::UnknownTag {
                            tag: prefix.to_string(),
                        });
                    }
                };
                return Ok(Self::new(tag, body));
            }
        }

        Ok(Self::new(InputTag::Binary, raw))
    }

    /// Decode the payload into bits.
    ///
    /// Fails on the first character that is not valid under the tag; no
    /// partial sequence is returned.
    pub fn decode(&self) -> Result<BitSequence> {
        let width = self.tag.bits_per_symbol();
        let mut bits = BitSequence::new();

        for (position, symbol) in self.body.chars().enumerate() {
            let code = self.tag.code_of(symbol).ok_or_else(|| {
                warn!("Could not evaluate {}: invalid symbol {:?}", self, symbol);
                CodecError::InvalidSymbol {
                    tag: self.tag,
                    symbol,
                    position,
                }
            })?;
            bits = bits.with_msb_first(code, width);
        }

        debug!("Evaluated {} to {}", self, bits);
        Ok(bits)
    }
}

impl fmt::Display for TaggedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag.prefix(), self.body)
    }
}

/// Decode tagged raw input into its bit sequence
pub fn decode(raw: &str) -> Result<BitSequence> {
    TaggedInput::parse(raw)?.decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn to_ascii(s: &str) -> String {
        s.chars().map(|c| char::from((c as u32 % 128) as u8)).collect()
    }

    #[test]
    fn test_tag_parsing() {
        assert_eq!(TaggedInput::parse("0101").unwrap().tag, InputTag::Binary);
        assert_eq!(TaggedInput::parse("a_Hi").unwrap(), TaggedInput::new(InputTag::Ascii, "Hi"));
        assert_eq!(TaggedInput::parse("d_42").unwrap(), TaggedInput::new(InputTag::Bcd, "42"));
        // Only the first separator splits off the prefix
        assert_eq!(TaggedInput::parse("a_x_y").unwrap().body, "x_y");
    }

    #[test]
    fn test_unknown_tag() {
        let err = decode("x_0101").unwrap_err();
        assert_eq!(err, CodecError::UnknownTag { tag: "x".to_string() });
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_binary_decode() {
        let bits = decode("1101").unwrap();
        assert_eq!(bits.to_u8_vec(), vec![1, 1, 0, 1]);
    }

    #[test]
    fn test_binary_invalid_symbol() {
        let err = decode("1021").unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidSymbol { tag: InputTag::Binary, symbol: '2', position: 2 }
        );
        assert!(!err.is_configuration_error());
        // A separator after a non-alphabetic prefix is just a bad binary symbol
        assert!(matches!(decode("01_1"), Err(CodecError::InvalidSymbol { symbol: '_', .. })));
    }

    #[test]
    fn test_ascii_decode() {
        let bits = decode("a_A").unwrap();
        assert_eq!(bits.to_string(), "1000001");

        let bits = decode("a_Hi").unwrap();
        assert_eq!(bits.to_string(), "10010001101001");
    }

    #[test]
    fn test_ascii_rejects_wide_code_points() {
        let err = decode("a_Aé").unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidSymbol { tag: InputTag::Ascii, symbol: 'é', position: 1 }
        );
    }

    #[test]
    fn test_bcd_decode() {
        assert_eq!(decode("d_5").unwrap().to_u8_vec(), vec![0, 1, 0, 1]);
        assert_eq!(decode("d_09").unwrap().to_string(), "00001001");
    }

    #[test]
    fn test_bcd_rejects_non_digits() {
        assert!(matches!(
            decode("d_1a"),
            Err(CodecError::InvalidSymbol { tag: InputTag::Bcd, symbol: 'a', position: 1 })
        ));
        // Only ASCII decimal digits count
        assert!(decode("d_٣").is_err());
    }

    #[test]
    fn test_empty_inputs() {
        for raw in ["", "a_", "d_"] {
            assert!(decode(raw).unwrap().is_empty(), "{raw:?} should decode to no bits");
        }
    }

    #[test]
    fn test_labels() {
        for tag in InputTag::ALL {
            assert_eq!(InputTag::from_label(tag.label()), Some(tag));
        }
        assert_eq!(InputTag::from_label("8-bit EBCDIC"), None);

        let input = TaggedInput::new(InputTag::from_label("7-bit ASCII").unwrap(), "ok");
        assert_eq!(input.to_string(), "a_ok");
        assert_eq!(TaggedInput::parse(&input.to_string()).unwrap(), input);
    }

    #[quickcheck]
    fn prop_ascii_length(s: String) -> bool {
        let s = to_ascii(&s);
        decode(&format!("a_{}", s)).unwrap().len() == 7 * s.chars().count()
    }

    #[quickcheck]
    fn prop_bcd_length(digits: Vec<u8>) -> bool {
        let s: String = digits.iter().map(|d| char::from(b'0' + d % 10)).collect();
        decode(&format!("d_{}", s)).unwrap().len() == 4 * s.len()
    }

    #[quickcheck]
    fn prop_binary_is_identity(values: Vec<bool>) -> bool {
        let s: String = values.iter().map(|&b| if b { '1' } else { '0' }).collect();
        let expected: Vec<u8> = values.iter().map(|&b| b as u8).collect();
        decode(&s).unwrap().to_u8_vec() == expected
    }

    #[quickcheck]
    fn prop_decode_is_deterministic(s: String) -> TestResult {
        match (decode(&s), decode(&s)) {
            (Ok(a), Ok(b)) => TestResult::from_bool(a == b),
            (Err(a), Err(b)) => TestResult::from_bool(a == b),
            _ => TestResult::failed(),
        }
    }

    #[quickcheck]
    fn prop_ascii_bits_match_code_points(s: String) -> bool {
        let s = to_ascii(&s);
        let bits = decode(&format!("a_{}", s)).unwrap();
        bits.bits()
            .chunks(7)
            .zip(s.chars())
            .all(|(chunk, c)| chunk.iter().fold(0u32, |acc, b| (acc << 1) | b.as_u8() as u32) == c as u32)
    }
}
