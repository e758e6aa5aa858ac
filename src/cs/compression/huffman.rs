//! Huffman prefix-code trees.
//!
//! A tree is built from a table of symbol frequencies by repeatedly merging
//! the two least frequent nodes, written to and read back from a line-based
//! text form, and used to decode a bitstream one bit at a time until an
//! end-of-stream symbol is reached.
//!
//! The end-of-stream symbol is always the alphabet size: a frequency table of
//! length `n` describes symbols `0..n`, and symbol `n` is added with frequency
//! 1 so every encoded stream can mark its own end.
//!
//! # Examples
//!
//! ```
//! use huffman_tree::{parse_bits, BitSliceSource, HuffmanTree};
//!
//! let tree = HuffmanTree::from_counts(&[5u32, 2, 0]).unwrap();
//! let text = tree.to_serialized_string().unwrap();
//! let rebuilt: HuffmanTree = text.parse().unwrap();
//!
//! let bits = parse_bits("101100").unwrap();
//! let symbols = rebuilt.decode(&mut BitSliceSource::new(&bits), 3).unwrap();
//! assert_eq!(symbols, vec![0, 1, 0]);
//! ```

pub mod bits;
pub mod codec;
pub mod codes;
pub mod config;
mod decode;
mod format;
pub mod frequency;
pub mod node;
pub mod tree;

pub use bits::{parse_bits, Bit, BitReader, BitSink, BitSliceSource, BitSource, BitWriter};
pub use codec::{Compressed, HuffmanCodec};
pub use codes::CodeTable;
pub use config::{CodecConfig, BYTE_ALPHABET_SIZE, MAX_ALPHABET_SIZE};
pub use frequency::{count_reader, count_symbols};
pub use node::{HuffmanNode, Symbol};
pub use tree::HuffmanTree;
