//! Wavemod Codecs - input decoding
//!
//! Turns tagged textual input (raw binary, 7-bit ASCII or BCD digits)
//! into the bit sequence that gets modulated onto the carrier.

pub mod symbol;
pub mod error;

pub use error::{CodecError, Result};
pub use symbol::decode;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        symbol::{decode, InputTag, TaggedInput},
        error::{CodecError, Result},
    };
}
