//! Compression algorithms implementation.
//!
//! This module provides:
//! - Huffman tree construction from symbol frequencies
//! - A line-based text form for storing and reloading trees
//! - Bit-level readers and writers
//! - Bit-driven decoding terminated by an end-of-stream symbol
//!
//! # Examples
//!
//! ```rust
//! use huffman_tree::cs::compression::huffman::HuffmanCodec;
//!
//! let codec = HuffmanCodec::default();
//! let compressed = codec.compress(b"abracadabra").unwrap();
//! let restored = codec.decompress(&compressed.tree, &compressed.payload).unwrap();
//! assert_eq!(restored, b"abracadabra");
//! ```

use crate::error::Error;

/// Result type for compression operations
pub type Result<T> = std::result::Result<T, Error>;

pub mod huffman;
pub use huffman::{
    count_reader, count_symbols, parse_bits, Bit, BitReader, BitSink, BitSliceSource, BitSource,
    BitWriter, CodeTable, CodecConfig, Compressed, HuffmanCodec, HuffmanNode, HuffmanTree, Symbol,
};
