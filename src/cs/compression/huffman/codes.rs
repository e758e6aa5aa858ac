use std::collections::HashMap;

use bitvec::prelude::*;
use log::debug;

use crate::cs::compression::huffman::bits::BitSink;
use crate::cs::compression::huffman::node::Symbol;
use crate::cs::compression::huffman::tree::HuffmanTree;
use crate::cs::compression::Result;
use crate::error::Error;

/// Maps every symbol of a tree to its root-to-leaf path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<Symbol, BitVec<u8, Lsb0>>,
}

impl CodeTable {
    /// The code of `symbol`, if the tree has a leaf for it.
    pub fn get(&self, symbol: Symbol) -> Option<&BitSlice<u8, Lsb0>> {
        self.codes.get(&symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates over `(symbol, code)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSlice<u8, Lsb0>)> {
        self.codes
            .iter()
            .map(|(&symbol, code)| (symbol, code.as_bitslice()))
    }

    /// Writes the code of every symbol, then the code of `eof`.
    ///
    /// Returns the number of bits written.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a symbol (or `eof`) has no code, plus any error from `sink`.
    pub fn encode<I, K>(&self, symbols: I, eof: Symbol, sink: &mut K) -> Result<usize>
    where
        I: IntoIterator<Item = Symbol>,
        K: BitSink + ?Sized,
    {
        let mut written = 0;
        let mut count = 0;
        for symbol in symbols {
            written += self.write_code(symbol, sink)?;
            count += 1;
        }
        written += self.write_code(eof, sink)?;
        debug!("encoded {} symbols into {} bits", count, written);
        Ok(written)
    }

    fn write_code<K>(&self, symbol: Symbol, sink: &mut K) -> Result<usize>
    where
        K: BitSink + ?Sized,
    {
        let code = self
            .get(symbol)
            .ok_or_else(|| Error::invalid_input(format!("symbol {} has no code", symbol)))?;
        sink.write_bits(code)?;
        Ok(code.len())
    }
}

impl HuffmanTree {
    /// Builds the code table of this tree.
    ///
    /// The end-of-stream leaf of a single-leaf tree gets the empty code.
    pub fn code_table(&self) -> Result<CodeTable> {
        let mut codes = HashMap::new();
        self.visit_leaves(|symbol, path| {
            let code: BitVec<u8, Lsb0> = path.chars().map(|c| c == '1').collect();
            codes.insert(symbol, code);
            Ok(())
        })?;
        Ok(CodeTable { codes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::compression::huffman::bits::{parse_bits, BitSliceSource};

    #[test]
    fn test_codes_match_leaves() {
        let tree = HuffmanTree::from_counts(&[5, 2, 0]).unwrap();
        let table = tree.code_table().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0).unwrap(), parse_bits("1").unwrap().as_bitslice());
        assert_eq!(table.get(1).unwrap(), parse_bits("01").unwrap().as_bitslice());
        assert_eq!(table.get(3).unwrap(), parse_bits("00").unwrap().as_bitslice());
        assert!(table.get(2).is_none());
    }

    #[test]
    fn test_encode_appends_eof() {
        let tree = HuffmanTree::from_counts(&[5, 2, 0]).unwrap();
        let table = tree.code_table().unwrap();
        let mut bits: BitVec<u8, Lsb0> = BitVec::new();
        let written = table.encode([0, 1, 0], 3, &mut bits).unwrap();
        assert_eq!(written, 6);
        assert_eq!(bits, parse_bits("101100").unwrap());

        let decoded = tree.decode(&mut BitSliceSource::new(&bits), 3).unwrap();
        assert_eq!(decoded, vec![0, 1, 0]);
    }

    #[test]
    fn test_encode_unknown_symbol() {
        let tree = HuffmanTree::from_counts(&[5, 2, 0]).unwrap();
        let table = tree.code_table().unwrap();
        let mut bits: BitVec<u8, Lsb0> = BitVec::new();
        let err = table.encode([2], 3, &mut bits).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_single_leaf_has_empty_code() {
        let tree = HuffmanTree::from_counts(&[0u8; 3]).unwrap();
        let table = tree.code_table().unwrap();
        assert_eq!(table.get(3).map(|c| c.len()), Some(0));

        let mut bits: BitVec<u8, Lsb0> = BitVec::new();
        assert_eq!(table.encode(std::iter::empty(), 3, &mut bits).unwrap(), 0);
    }

    #[test]
    fn test_iter_covers_every_leaf() {
        let tree = HuffmanTree::from_counts(&[5, 2, 0]).unwrap();
        let table = tree.code_table().unwrap();
        let mut pairs: Vec<(Symbol, usize)> = table.iter().map(|(s, code)| (s, code.len())).collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (3, 2)]);
    }
}
