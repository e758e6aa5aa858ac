use log::debug;

use crate::cs::compression::huffman::bits::{BitSliceSource, BitWriter};
use crate::cs::compression::huffman::config::CodecConfig;
use crate::cs::compression::huffman::frequency::count_symbols;
use crate::cs::compression::huffman::node::Symbol;
use crate::cs::compression::huffman::tree::HuffmanTree;
use crate::cs::compression::Result;

/// The two artifacts of compressing a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    /// Serialized tree text (see [`HuffmanTree::write`]).
    pub tree: String,
    /// Packed code bits, least-significant bit first, ending with the
    /// end-of-stream code and zero padding.
    pub payload: Vec<u8>,
}

/// Compresses byte buffers with a tree built from their own frequencies.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Counts `data`, builds its tree and encodes it.
    ///
    /// # Examples
    ///
    /// ```
    /// use huffman_tree::HuffmanCodec;
    ///
    /// let codec = HuffmanCodec::default();
    /// let compressed = codec.compress(b"mississippi").unwrap();
    /// let restored = codec.decompress(&compressed.tree, &compressed.payload).unwrap();
    /// assert_eq!(restored, b"mississippi");
    /// ```
    pub fn compress(&self, data: &[u8]) -> Result<Compressed> {
        let counts = count_symbols(data, self.config.alphabet_size)?;
        let tree = HuffmanTree::from_counts(&counts)?;
        let table = tree.code_table()?;

        let mut writer = BitWriter::new(Vec::new());
        let bits = table.encode(
            data.iter().map(|&b| Symbol::from(b)),
            self.config.eof(),
            &mut writer,
        )?;
        let payload = writer.finish()?;

        debug!(
            "compressed {} bytes into {} bits ({} bytes)",
            data.len(),
            bits,
            payload.len()
        );
        Ok(Compressed {
            tree: tree.to_serialized_string()?,
            payload,
        })
    }

    /// Rebuilds the tree from `tree_text` and decodes `payload` with it.
    pub fn decompress(&self, tree_text: &str, payload: &[u8]) -> Result<Vec<u8>> {
        let tree: HuffmanTree = tree_text.parse()?;
        let mut out = Vec::new();
        tree.decode_to_writer(
            &mut BitSliceSource::from_bytes(payload),
            &mut out,
            self.config.eof(),
        )?;
        Ok(out)
    }
}
