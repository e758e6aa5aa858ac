use crate::cs::compression::huffman::node::Symbol;
use crate::cs::compression::Result;
use crate::error::Error;

/// Largest supported alphabet. The end-of-stream sentinel equals the alphabet
/// size, so every symbol including the sentinel fits in 16 bits.
pub const MAX_ALPHABET_SIZE: usize = u16::MAX as usize;

/// Alphabet of raw bytes.
pub const BYTE_ALPHABET_SIZE: usize = 256;

/// Configuration for [`HuffmanCodec`](crate::cs::compression::huffman::HuffmanCodec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Number of real symbols. Also the value of the end-of-stream symbol.
    pub alphabet_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            alphabet_size: BYTE_ALPHABET_SIZE,
        }
    }
}

impl CodecConfig {
    /// Creates a configuration for an alphabet of `alphabet_size` symbols.
    pub fn new(alphabet_size: usize) -> Result<Self> {
        let config = Self { alphabet_size };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_alphabet_size(self.alphabet_size)
    }

    /// The end-of-stream symbol for this alphabet.
    pub fn eof(&self) -> Symbol {
        self.alphabet_size as Symbol
    }
}

pub(crate) fn check_alphabet_size(alphabet_size: usize) -> Result<()> {
    if alphabet_size > MAX_ALPHABET_SIZE {
        return Err(Error::InputTooLarge(format!(
            "alphabet of {} symbols exceeds the maximum of {}",
            alphabet_size, MAX_ALPHABET_SIZE
        )));
    }
    Ok(())
}
