use std::io::Write;

use log::{debug, trace, warn};
use rayon::prelude::*;

use crate::cs::compression::huffman::bits::BitSource;
use crate::cs::compression::huffman::config::BYTE_ALPHABET_SIZE;
use crate::cs::compression::huffman::node::Symbol;
use crate::cs::compression::huffman::tree::HuffmanTree;
use crate::cs::compression::Result;
use crate::error::Error;

impl HuffmanTree {
    /// Decodes bits into symbols, handing each one to `emit`.
    ///
    /// Starting at the root, bit 0 moves to the left child and bit 1 to the
    /// right child. Reaching a leaf either ends decoding (the leaf holds `eof`)
    /// or emits the leaf's symbol and restarts at the root. Bits are read one
    /// at a time and nothing after the end-of-stream code is consumed.
    ///
    /// A tree whose root is the end-of-stream leaf decodes to nothing without
    /// reading any bits.
    ///
    /// Returns the number of symbols emitted.
    ///
    /// # Errors
    ///
    /// * `TruncatedStream` if `bits` runs out before the end-of-stream leaf is
    ///   reached. Symbols emitted up to that point have already been passed
    ///   to `emit`.
    /// * `StructuralViolation` if the root is a leaf holding a real symbol.
    /// * Any error returned by `bits` or `emit`.
    pub fn decode_with<S, F>(&self, bits: &mut S, eof: Symbol, mut emit: F) -> Result<usize>
    where
        S: BitSource + ?Sized,
        F: FnMut(Symbol) -> Result<()>,
    {
        let root = self.root();
        if root.is_leaf() {
            return match root.symbol() {
                Some(symbol) if symbol == eof => Ok(0),
                symbol => Err(Error::structural(format!(
                    "single-leaf tree holding {:?} cannot encode end-of-stream symbol {}",
                    symbol, eof
                ))),
            };
        }

        let mut current = root;
        let mut decoded = 0;
        loop {
            let Some(bit) = bits.read_bit()? else {
                warn!(
                    "bit stream ended after {} symbols before end-of-stream symbol {}",
                    decoded, eof
                );
                return Err(Error::TruncatedStream { decoded, eof });
            };

            current = current
                .child(bit)
                .ok_or_else(|| Error::structural("internal node is missing a child"))?;
            if !current.is_leaf() {
                continue;
            }

            let symbol = current
                .symbol()
                .ok_or_else(|| Error::structural("reached a leaf without a symbol"))?;
            if symbol == eof {
                debug!("decoded {} symbols", decoded);
                return Ok(decoded);
            }
            trace!("decoded symbol {}", symbol);
            emit(symbol)?;
            decoded += 1;
            current = root;
        }
    }

    /// Decodes bits into a vector of symbols.
    pub fn decode<S>(&self, bits: &mut S, eof: Symbol) -> Result<Vec<Symbol>>
    where
        S: BitSource + ?Sized,
    {
        let mut symbols = Vec::new();
        self.decode_with(bits, eof, |symbol| {
            symbols.push(symbol);
            Ok(())
        })?;
        Ok(symbols)
    }

    /// Decodes bits and writes each symbol to `out` as a single byte.
    ///
    /// Fails with `SymbolOutOfRange` on a symbol above 255. On any failure the
    /// bytes decoded so far have already been written.
    pub fn decode_to_writer<S, W>(&self, bits: &mut S, mut out: W, eof: Symbol) -> Result<usize>
    where
        S: BitSource + ?Sized,
        W: Write,
    {
        let decoded = self.decode_with(bits, eof, |symbol| {
            let byte = u8::try_from(symbol).map_err(|_| Error::SymbolOutOfRange {
                symbol,
                alphabet_size: BYTE_ALPHABET_SIZE,
            })?;
            out.write_all(&[byte])?;
            Ok(())
        })?;
        out.flush()?;
        Ok(decoded)
    }

    /// Decodes several independent bit sources in parallel against this tree.
    ///
    /// Results are returned in the order of `sources`; a failure in one source
    /// does not affect the others.
    pub fn decode_batch<S>(&self, sources: Vec<S>, eof: Symbol) -> Vec<Result<Vec<Symbol>>>
    where
        S: BitSource + Send,
    {
        sources
            .into_par_iter()
            .map(|mut source| self.decode(&mut source, eof))
            .collect()
    }
}
