use std::io::{ErrorKind, Read};

use log::debug;

use crate::cs::compression::huffman::config::check_alphabet_size;
use crate::cs::compression::huffman::node::Symbol;
use crate::cs::compression::Result;
use crate::error::Error;

const READ_CHUNK: usize = 8 * 1024;

/// Counts how often each byte of `data` occurs.
///
/// The table has `alphabet_size` entries, so it can be handed straight to
/// [`HuffmanTree::from_counts`](crate::cs::compression::huffman::HuffmanTree::from_counts).
///
/// # Errors
///
/// `SymbolOutOfRange` if a byte is not below `alphabet_size`, `InputTooLarge`
/// if the alphabet is too large.
///
/// # Examples
///
/// ```
/// use huffman_tree::count_symbols;
///
/// let counts = count_symbols(b"abba", 256).unwrap();
/// assert_eq!(counts[b'a' as usize], 2);
/// assert_eq!(counts[b'b' as usize], 2);
/// ```
pub fn count_symbols(data: &[u8], alphabet_size: usize) -> Result<Vec<u64>> {
    check_alphabet_size(alphabet_size)?;
    let mut counts = vec![0u64; alphabet_size];
    tally(&mut counts, data)?;
    Ok(counts)
}

/// Counts byte frequencies of everything `reader` yields.
pub fn count_reader<R: Read>(mut reader: R, alphabet_size: usize) -> Result<Vec<u64>> {
    check_alphabet_size(alphabet_size)?;
    let mut counts = vec![0u64; alphabet_size];
    let mut buffer = [0u8; READ_CHUNK];
    let mut total = 0usize;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        tally(&mut counts, &buffer[..n])?;
        total += n;
    }

    debug!("counted {} bytes", total);
    Ok(counts)
}

fn tally(counts: &mut [u64], data: &[u8]) -> Result<()> {
    let alphabet_size = counts.len();
    for &byte in data {
        let slot = counts
            .get_mut(byte as usize)
            .ok_or_else(|| Error::SymbolOutOfRange {
                symbol: byte as Symbol,
                alphabet_size,
            })?;
        *slot += 1;
    }
    Ok(())
}
