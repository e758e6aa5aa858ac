//! Huffman prefix-code trees: construction from symbol frequencies, a
//! line-based text form for storing them, and bit-driven decoding.
//!
//! ```
//! use huffman_tree::HuffmanCodec;
//!
//! let codec = HuffmanCodec::default();
//! let compressed = codec.compress(b"hello, huffman").unwrap();
//! let restored = codec.decompress(&compressed.tree, &compressed.payload).unwrap();
//! assert_eq!(restored, b"hello, huffman");
//! ```

pub mod cs;
pub mod error;

pub use cs::compression::huffman::{
    count_reader, count_symbols, parse_bits, Bit, BitReader, BitSink, BitSliceSource, BitSource,
    BitWriter, CodeTable, CodecConfig, Compressed, HuffmanCodec, HuffmanNode, HuffmanTree, Symbol,
    BYTE_ALPHABET_SIZE, MAX_ALPHABET_SIZE,
};
pub use error::{Error, Result};
