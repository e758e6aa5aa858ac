use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use log::{debug, trace};
use num_traits::PrimInt;

use crate::cs::compression::huffman::bits::Bit;
use crate::cs::compression::huffman::config::check_alphabet_size;
use crate::cs::compression::huffman::node::{HuffmanNode, Symbol};
use crate::cs::compression::Result;
use crate::error::Error;

/// A prefix-code tree.
///
/// Built once, either from a frequency table ([`HuffmanTree::from_counts`]) or
/// from its serialized text form ([`HuffmanTree::from_serialized`]), and only
/// read afterwards. Decoding keeps its cursor local to each call, so a single
/// tree can be shared across threads.
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl fmt::Debug for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuffmanTree")
            .field("leaves", &self.leaf_count())
            .field("depth", &self.depth())
            .finish()
    }
}

/// A queue entry ordered so that `BinaryHeap` pops the lowest frequency first
/// and, among equal frequencies, the entry pushed earliest.
#[derive(Debug)]
struct QueueEntry {
    node: HuffmanNode,
    sequence: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: BinaryHeap is a max-heap.
        other
            .node
            .cmp_frequency(&self.node)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Min-priority queue of nodes with FIFO tie-break.
struct NodeQueue {
    heap: BinaryHeap<QueueEntry>,
    next_sequence: usize,
}

impl NodeQueue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    fn push(&mut self, node: HuffmanNode) {
        self.heap.push(QueueEntry {
            node,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
    }

    fn pop(&mut self) -> Option<HuffmanNode> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

impl HuffmanTree {
    /// Builds the tree for a frequency table by greedy minimum-frequency merging.
    ///
    /// `counts[i]` is the frequency of symbol `i`; zero or negative counts leave
    /// the symbol out. The end-of-stream symbol is `counts.len()` and is always
    /// added with frequency 1.
    ///
    /// Leaves are queued in ascending symbol order followed by the end-of-stream
    /// leaf. Equal frequencies leave the queue in the order they entered it, so
    /// the resulting shape depends only on `counts`.
    ///
    /// # Errors
    ///
    /// * `InputTooLarge` if `counts` is longer than
    ///   [`MAX_ALPHABET_SIZE`](crate::cs::compression::huffman::MAX_ALPHABET_SIZE)
    ///   or a frequency (or sum of frequencies) does not fit in a `u64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use huffman_tree::HuffmanTree;
    ///
    /// let tree = HuffmanTree::from_counts(&[5u32, 2, 0]).unwrap();
    /// assert_eq!(tree.root().frequency(), Some(8));
    /// assert_eq!(tree.to_serialized_string().unwrap(), "3\n00\n1\n01\n0\n1\n");
    /// ```
    pub fn from_counts<C: PrimInt>(counts: &[C]) -> Result<Self> {
        check_alphabet_size(counts.len())?;
        let eof = counts.len() as Symbol;

        let mut queue = NodeQueue::with_capacity(counts.len() + 1);
        for (symbol, &count) in counts.iter().enumerate() {
            if count <= C::zero() {
                continue;
            }
            let frequency = count.to_u64().ok_or_else(|| {
                Error::InputTooLarge(format!("frequency of symbol {} does not fit in u64", symbol))
            })?;
            queue.push(HuffmanNode::with_frequency(symbol as Symbol, frequency));
        }
        queue.push(HuffmanNode::with_frequency(eof, 1));

        debug!(
            "building Huffman tree from {} leaves (alphabet size {})",
            queue.len(),
            counts.len()
        );

        let root = loop {
            let left = queue
                .pop()
                .ok_or_else(|| Error::structural("construction queue ran empty"))?;
            let Some(right) = queue.pop() else {
                break left;
            };
            trace!(
                "merging {:?}/{:?} with {:?}/{:?}",
                left.symbol(),
                left.frequency(),
                right.symbol(),
                right.frequency()
            );
            let merged = HuffmanNode::internal(left, right).ok_or_else(|| {
                Error::InputTooLarge("sum of frequencies overflows u64".to_string())
            })?;
            queue.push(merged);
        };

        let tree = Self { root };
        debug!(
            "built Huffman tree with {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }

    /// Wraps an already built root after checking its structure.
    pub fn from_root(root: HuffmanNode) -> Result<Self> {
        root.validate()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Number of leaves, i.e. of distinct symbols including end-of-stream.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                count += 1;
            }
            stack.extend(node.left());
            stack.extend(node.right());
        }
        count
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(&self.root, 0)];
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(node.left().map(|child| (child, depth + 1)));
            stack.extend(node.right().map(|child| (child, depth + 1)));
        }
        max
    }

    /// Every `(symbol, path)` pair, left before right, with paths over `'0'`/`'1'`.
    pub fn leaves(&self) -> Result<Vec<(Symbol, String)>> {
        let mut leaves = Vec::new();
        self.visit_leaves(|symbol, path| {
            leaves.push((symbol, path.to_string()));
            Ok(())
        })?;
        Ok(leaves)
    }

    /// Walks the tree pre-order, left before right, calling `visit` on each leaf
    /// with the leaf's symbol and its root-to-leaf path.
    ///
    /// Uses an explicit stack: each entry remembers the path length of its
    /// parent and the edge taken, so the shared path buffer is cut back before
    /// the edge is appended.
    pub(crate) fn visit_leaves<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(Symbol, &str) -> Result<()>,
    {
        let mut path = String::new();
        let mut stack: Vec<(&HuffmanNode, usize, Option<Bit>)> = vec![(&self.root, 0, None)];

        while let Some((node, parent_len, edge)) = stack.pop() {
            path.truncate(parent_len);
            if let Some(bit) = edge {
                path.push(bit.as_char());
            }

            match (node.left(), node.right()) {
                (None, None) => {
                    let symbol = node.symbol().ok_or_else(|| {
                        Error::structural(format!("leaf at depth {} has no symbol", path.len()))
                    })?;
                    visit(symbol, &path)?;
                }
                (Some(left), Some(right)) => {
                    stack.push((right, path.len(), Some(Bit::One)));
                    stack.push((left, path.len(), Some(Bit::Zero)));
                }
                _ => {
                    return Err(Error::structural(format!(
                        "node at depth {} has exactly one child",
                        path.len()
                    )));
                }
            }
        }

        Ok(())
    }
}
