use std::cmp::Ordering;
use std::collections::HashSet;

use crate::cs::compression::huffman::bits::Bit;
use crate::cs::compression::Result;
use crate::error::Error;

/// A symbol code. Real symbols are `0..alphabet_size`, and `alphabet_size`
/// itself is the end-of-stream sentinel.
pub type Symbol = u32;

/// Represents a node in the Huffman tree.
///
/// A node is a leaf iff it has no children. Children are owned exclusively by
/// their parent, so a tree is a plain nested value with no sharing. Dropping
/// a node releases its subtree iteratively, so depth is limited by memory
/// rather than by the call stack.
#[derive(Debug, Default)]
pub struct HuffmanNode {
    symbol: Option<Symbol>,
    frequency: Option<u64>,
    left: Option<Box<HuffmanNode>>,
    right: Option<Box<HuffmanNode>>,
}

impl HuffmanNode {
    /// Creates a leaf carrying a symbol and its observed frequency.
    pub fn with_frequency(symbol: Symbol, frequency: u64) -> Self {
        Self {
            symbol: Some(symbol),
            frequency: Some(frequency),
            left: None,
            right: None,
        }
    }

    /// Creates a leaf whose frequency is unknown, as rebuilt from a serialized tree.
    pub fn leaf(symbol: Symbol) -> Self {
        Self {
            symbol: Some(symbol),
            frequency: None,
            left: None,
            right: None,
        }
    }

    /// Creates an empty node to be filled in while rebuilding a serialized tree.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Creates an internal node whose frequency is the sum of its children's.
    ///
    /// Returns `None` if the sum overflows.
    pub fn internal(left: HuffmanNode, right: HuffmanNode) -> Option<Self> {
        let frequency = left.frequency_or_zero().checked_add(right.frequency_or_zero())?;
        Some(Self {
            symbol: None,
            frequency: Some(frequency),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        })
    }

    /// Returns true iff the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The symbol stored on this node, if any.
    pub fn symbol(&self) -> Option<Symbol> {
        self.symbol
    }

    /// The frequency of this node, if it was built from a frequency table.
    pub fn frequency(&self) -> Option<u64> {
        self.frequency
    }

    pub fn left(&self) -> Option<&HuffmanNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&HuffmanNode> {
        self.right.as_deref()
    }

    /// Follows one edge: [`Bit::Zero`] goes left, [`Bit::One`] goes right.
    pub fn child(&self, bit: Bit) -> Option<&HuffmanNode> {
        match bit {
            Bit::Zero => self.left(),
            Bit::One => self.right(),
        }
    }

    /// Compares two nodes by frequency, ascending. An unset frequency counts as zero.
    ///
    /// This ordering never looks at symbols. Equal frequencies are resolved by
    /// the construction queue, which pops them in insertion order.
    pub fn cmp_frequency(&self, other: &Self) -> Ordering {
        self.frequency_or_zero().cmp(&other.frequency_or_zero())
    }

    fn frequency_or_zero(&self) -> u64 {
        self.frequency.unwrap_or(0)
    }

    pub(crate) fn set_symbol(&mut self, symbol: Symbol) {
        self.symbol = Some(symbol);
    }

    /// Returns the child slot for `bit`, inserting a placeholder if it is empty.
    pub(crate) fn child_or_insert(&mut self, bit: Bit) -> &mut HuffmanNode {
        let slot = match bit {
            Bit::Zero => &mut self.left,
            Bit::One => &mut self.right,
        };
        slot.get_or_insert_with(|| Box::new(HuffmanNode::placeholder()))
    }

    /// Checks the structural invariants of the subtree rooted here.
    ///
    /// Fails if a node has exactly one child, a leaf has no symbol, an internal
    /// node has a symbol, or two leaves share a symbol.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut stack = vec![(self, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            match (node.left(), node.right()) {
                (None, None) => {
                    let symbol = node.symbol.ok_or_else(|| {
                        Error::structural(format!("leaf at depth {} has no symbol", depth))
                    })?;
                    if !seen.insert(symbol) {
                        return Err(Error::structural(format!(
                            "symbol {} appears on more than one leaf",
                            symbol
                        )));
                    }
                }
                (Some(left), Some(right)) => {
                    if let Some(symbol) = node.symbol {
                        return Err(Error::structural(format!(
                            "internal node at depth {} carries symbol {}",
                            depth, symbol
                        )));
                    }
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
                _ => {
                    return Err(Error::structural(format!(
                        "node at depth {} has exactly one child",
                        depth
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Drop for HuffmanNode {
    fn drop(&mut self) {
        let mut stack: Vec<Box<HuffmanNode>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}
