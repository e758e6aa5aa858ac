//! The serialized text form of a tree.
//!
//! A tree is written as one pair of lines per leaf: the leaf's symbol in
//! base 10, then its root-to-leaf path over `'0'` (left) and `'1'` (right).
//! There is no header, trailer or separator. A single-leaf tree has an empty
//! path line.
//!
//! ```text
//! 3
//! 00
//! 1
//! 01
//! 0
//! 1
//! ```

use std::io::{BufRead, Write};
use std::str::FromStr;

use log::debug;

use crate::cs::compression::huffman::bits::Bit;
use crate::cs::compression::huffman::config::MAX_ALPHABET_SIZE;
use crate::cs::compression::huffman::node::{HuffmanNode, Symbol};
use crate::cs::compression::huffman::tree::HuffmanTree;
use crate::cs::compression::Result;
use crate::error::Error;

impl HuffmanTree {
    /// Rebuilds a tree from its serialized text form.
    ///
    /// Reads `symbol` / `path` line pairs until the input is exhausted. Each
    /// path is walked from the root, creating empty nodes on missing edges,
    /// and the node it ends on receives the symbol. Pairs may come in any
    /// order. The finished tree is checked with [`HuffmanNode::validate`].
    ///
    /// Only shape and leaf symbols are recovered; the nodes carry no frequencies.
    ///
    /// # Errors
    ///
    /// * `MalformedInput` if a symbol line is not a base-10 integer, a path
    ///   contains anything but `'0'`/`'1'` or is longer than
    ///   [`MAX_ALPHABET_SIZE`], the last symbol has no path line, two pairs
    ///   share a path, or there are no pairs at all
    /// * `StructuralViolation` if the paths do not describe a full binary tree
    /// * `Io` if reading fails
    pub fn from_serialized<R: BufRead>(reader: R) -> Result<Self> {
        let mut root = HuffmanNode::placeholder();
        let mut lines = reader.lines().enumerate();
        let mut pairs = 0usize;

        while let Some((index, symbol_line)) = lines.next() {
            let symbol_line_no = index + 1;
            let symbol_line = symbol_line?;
            let symbol: Symbol = symbol_line.parse().map_err(|e| {
                Error::malformed(
                    symbol_line_no,
                    format!("invalid symbol {:?}: {}", symbol_line, e),
                )
            })?;

            let (index, path) = lines.next().ok_or_else(|| {
                Error::malformed(
                    symbol_line_no,
                    format!("symbol {} is not followed by a path line", symbol),
                )
            })?;
            let path_line_no = index + 1;
            let path = path?;
            // A full tree over at most MAX_ALPHABET_SIZE + 1 leaves is no deeper than this.
            if path.len() > MAX_ALPHABET_SIZE {
                return Err(Error::malformed(
                    path_line_no,
                    format!(
                        "path of length {} exceeds the maximum depth {}",
                        path.len(),
                        MAX_ALPHABET_SIZE
                    ),
                ));
            }

            let mut current = &mut root;
            for c in path.chars() {
                let bit = Bit::try_from(c).map_err(|_| {
                    Error::malformed(path_line_no, format!("path contains {:?}", c))
                })?;
                current = current.child_or_insert(bit);
            }
            if let Some(existing) = current.symbol() {
                return Err(Error::malformed(
                    path_line_no,
                    format!(
                        "path {:?} already holds symbol {}, cannot assign {}",
                        path, existing, symbol
                    ),
                ));
            }
            current.set_symbol(symbol);
            pairs += 1;
        }

        if pairs == 0 {
            return Err(Error::malformed(1, "tree description is empty"));
        }

        let tree = Self::from_root(root)?;
        debug!(
            "rebuilt Huffman tree from {} pairs, depth {}",
            pairs,
            tree.depth()
        );
        Ok(tree)
    }

    /// Writes the serialized text form, one `symbol`/`path` pair per leaf in
    /// pre-order, left before right.
    pub fn write<W: Write>(&self, mut out: W) -> Result<()> {
        self.visit_leaves(|symbol, path| {
            writeln!(out, "{}", symbol)?;
            writeln!(out, "{}", path)?;
            Ok(())
        })?;
        out.flush()?;
        Ok(())
    }

    /// Returns the serialized text form as a string.
    pub fn to_serialized_string(&self) -> Result<String> {
        let mut text = String::new();
        self.visit_leaves(|symbol, path| {
            text.push_str(&symbol.to_string());
            text.push('\n');
            text.push_str(path);
            text.push('\n');
            Ok(())
        })?;
        Ok(text)
    }
}

impl FromStr for HuffmanTree {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_serialized(s.as_bytes())
    }
}
