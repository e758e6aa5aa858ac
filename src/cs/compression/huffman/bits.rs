//! Bit-level input and output.
//!
//! Bits are packed least-significant bit first: the first bit of a stream is
//! bit 0 of the first byte. The last byte written by [`BitWriter`] is padded
//! with zero bits, which a decoder never reaches because the end-of-stream
//! code comes first.

use std::io::{self, Read, Write};

use bitvec::prelude::*;

use crate::cs::compression::Result;
use crate::error::Error;

/// A single bit of a code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    /// Descend to the left child.
    Zero,
    /// Descend to the right child.
    One,
}

impl Bit {
    /// The character used for this bit in serialized paths.
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit == Bit::One
    }
}

impl TryFrom<char> for Bit {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(Error::invalid_input(format!(
                "expected '0' or '1', found {:?}",
                other
            ))),
        }
    }
}

/// Parses a string of `'0'`/`'1'` characters into a bit vector.
pub fn parse_bits(text: &str) -> Result<BitVec<u8, Lsb0>> {
    text.chars()
        .map(|c| Bit::try_from(c).map(bool::from))
        .collect()
}

/// A source of bits that can only be read forward.
pub trait BitSource {
    /// Reads the next bit, or `None` once the input is exhausted.
    fn read_bit(&mut self) -> Result<Option<Bit>>;
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    fn read_bit(&mut self) -> Result<Option<Bit>> {
        (**self).read_bit()
    }
}

/// Reads bits from a byte stream, least-significant bit first.
#[derive(Debug)]
pub struct BitReader<R> {
    bytes: io::Bytes<R>,
    current: u8,
    position: usize,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            bytes: inner.bytes(),
            current: 0,
            position: u8::BITS as usize,
        }
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_bit(&mut self) -> Result<Option<Bit>> {
        if self.position == u8::BITS as usize {
            match self.bytes.next() {
                Some(byte) => {
                    self.current = byte?;
                    self.position = 0;
                }
                None => return Ok(None),
            }
        }
        let bit = self.current.view_bits::<Lsb0>()[self.position];
        self.position += 1;
        Ok(Some(Bit::from(bit)))
    }
}

/// Reads bits from an in-memory bit slice.
#[derive(Debug, Clone)]
pub struct BitSliceSource<'a> {
    bits: &'a BitSlice<u8, Lsb0>,
    position: usize,
}

impl<'a> BitSliceSource<'a> {
    pub fn new(bits: &'a BitSlice<u8, Lsb0>) -> Self {
        Self { bits, position: 0 }
    }

    /// Views packed bytes as a bit source, least-significant bit first.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::new(bytes.view_bits::<Lsb0>())
    }

    /// Number of bits consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl BitSource for BitSliceSource<'_> {
    fn read_bit(&mut self) -> Result<Option<Bit>> {
        let bit = self.bits.get(self.position).map(|b| Bit::from(*b));
        if bit.is_some() {
            self.position += 1;
        }
        Ok(bit)
    }
}

/// A destination for bits.
pub trait BitSink {
    fn write_bit(&mut self, bit: Bit) -> Result<()>;

    /// Writes every bit of `bits` in order.
    fn write_bits(&mut self, bits: &BitSlice<u8, Lsb0>) -> Result<()> {
        for bit in bits.iter().by_vals() {
            self.write_bit(Bit::from(bit))?;
        }
        Ok(())
    }
}

impl BitSink for BitVec<u8, Lsb0> {
    fn write_bit(&mut self, bit: Bit) -> Result<()> {
        self.push(bit.into());
        Ok(())
    }
}

/// Packs bits into bytes, least-significant bit first.
///
/// Call [`BitWriter::finish`] to flush the final partial byte; dropping the
/// writer without it loses up to seven bits.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: W,
    buffer: u8,
    filled: usize,
    written: usize,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: 0,
            filled: 0,
            written: 0,
        }
    }

    /// Number of bits written so far, excluding padding.
    pub fn bits_written(&self) -> usize {
        self.written
    }

    /// Pads the last byte with zero bits, flushes, and returns the inner writer.
    pub fn finish(mut self) -> Result<W> {
        if self.filled > 0 {
            self.inner.write_all(&[self.buffer])?;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bit(&mut self, bit: Bit) -> Result<()> {
        self.buffer
            .view_bits_mut::<Lsb0>()
            .set(self.filled, bit.into());
        self.filled += 1;
        self.written += 1;
        if self.filled == u8::BITS as usize {
            self.inner.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.filled = 0;
        }
        Ok(())
    }
}
