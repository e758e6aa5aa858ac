use std::collections::HashMap;

use bitvec::prelude::*;
use huffman_tree::{
    parse_bits, BitSliceSource, BitWriter, Error, HuffmanCodec, HuffmanTree, Symbol,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn path_map(tree: &HuffmanTree) -> HashMap<Symbol, String> {
    tree.leaves().unwrap().into_iter().collect()
}

fn counts_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(prop_oneof![Just(0u32), 1..1000u32], 1..300)
}

proptest! {
    #[test]
    fn test_serialized_roundtrip_keeps_paths(counts in counts_strategy()) {
        let tree = HuffmanTree::from_counts(&counts).unwrap();
        let mut text = Vec::new();
        tree.write(&mut text).unwrap();
        let rebuilt = HuffmanTree::from_serialized(text.as_slice()).unwrap();

        prop_assert_eq!(path_map(&rebuilt), path_map(&tree));
        prop_assert_eq!(rebuilt.to_serialized_string().unwrap(), tree.to_serialized_string().unwrap());
    }

    #[test]
    fn test_prefix_free(counts in counts_strategy()) {
        let tree = HuffmanTree::from_counts(&counts).unwrap();
        let paths: Vec<String> = tree.leaves().unwrap().into_iter().map(|(_, p)| p).collect();
        for (i, a) in paths.iter().enumerate() {
            for (j, b) in paths.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(a.as_str()), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_eof_present_once(counts in counts_strategy()) {
        let tree = HuffmanTree::from_counts(&counts).unwrap();
        let eof = counts.len() as Symbol;
        let leaves = tree.leaves().unwrap();
        prop_assert_eq!(leaves.iter().filter(|(s, _)| *s == eof).count(), 1);

        let present = counts.iter().filter(|&&c| c > 0).count();
        prop_assert_eq!(leaves.len(), present + 1);
    }

    #[test]
    fn test_leaf_path_reaches_leaf(counts in counts_strategy()) {
        let tree = HuffmanTree::from_counts(&counts).unwrap();
        let eof = counts.len() as Symbol;
        for (symbol, path) in tree.leaves().unwrap() {
            let mut bits = parse_bits(&path).unwrap();
            if symbol != eof {
                bits.extend(parse_bits(&path_map(&tree)[&eof]).unwrap());
                let decoded = tree.decode(&mut BitSliceSource::new(&bits), eof).unwrap();
                prop_assert_eq!(decoded, vec![symbol]);
            } else {
                let decoded = tree.decode(&mut BitSliceSource::new(&bits), eof).unwrap();
                prop_assert!(decoded.is_empty());
            }
        }
    }

    #[test]
    fn test_truncation_fails(data in prop::collection::vec(any::<u8>(), 1..200), cut in 0.0f64..1.0) {
        let codec = HuffmanCodec::default();
        let tree = HuffmanTree::from_counts(&huffman_tree::count_symbols(&data, 256).unwrap()).unwrap();
        let table = tree.code_table().unwrap();

        let mut bits: BitVec<u8, Lsb0> = BitVec::new();
        let total = table.encode(data.iter().map(|&b| b as Symbol), 256, &mut bits).unwrap();
        let keep = ((total as f64) * cut) as usize;
        prop_assume!(keep < total);

        let err = tree.decode(&mut BitSliceSource::new(&bits[..keep]), 256).unwrap_err();
        let is_truncated = matches!(err, Error::TruncatedStream { .. });
        prop_assert!(is_truncated);

        let compressed = codec.compress(&data).unwrap();
        prop_assert_eq!(codec.decompress(&compressed.tree, &compressed.payload).unwrap(), data);
    }
}

#[test]
fn test_degenerate_single_symbol() {
    for n in 1..20 {
        let mut counts = vec![0u32; n];
        counts[n - 1] = 5;
        let tree = HuffmanTree::from_counts(&counts).unwrap();
        let paths = path_map(&tree);
        assert_eq!(paths.len(), 2);
        let mut codes: Vec<&str> = paths.values().map(String::as_str).collect();
        codes.sort_unstable();
        assert_eq!(codes, vec!["0", "1"]);
        assert!(paths.contains_key(&(n as Symbol)));
        assert!(paths.contains_key(&((n - 1) as Symbol)));
    }
}

#[test]
fn test_concrete_example() {
    let tree = HuffmanTree::from_counts(&[5u32, 2, 0]).unwrap();
    assert_eq!(tree.root().frequency(), Some(8));
    let depths: HashMap<Symbol, usize> = path_map(&tree)
        .into_iter()
        .map(|(s, p)| (s, p.len()))
        .collect();
    assert_eq!(depths, HashMap::from([(0, 1), (1, 2), (3, 2)]));
}

#[test]
fn test_random_streams_through_files() {
    let mut rng = StdRng::seed_from_u64(143);
    for _ in 0..20 {
        let len = rng.gen_range(0..2000);
        let skew = rng.gen_range(2..64u8);
        let data: Vec<u8> = (0..len).map(|_| rng.gen_range(0..skew)).collect();

        let counts = huffman_tree::count_reader(data.as_slice(), 256).unwrap();
        let tree = HuffmanTree::from_counts(&counts).unwrap();
        let mut text = Vec::new();
        tree.write(&mut text).unwrap();

        let table = tree.code_table().unwrap();
        let mut writer = BitWriter::new(Vec::new());
        table
            .encode(data.iter().map(|&b| b as Symbol), 256, &mut writer)
            .unwrap();
        let payload = writer.finish().unwrap();

        let rebuilt = HuffmanTree::from_serialized(text.as_slice()).unwrap();
        let mut out = Vec::new();
        let n = rebuilt
            .decode_to_writer(&mut huffman_tree::BitReader::new(payload.as_slice()), &mut out, 256)
            .unwrap();
        assert_eq!(n, data.len());
        assert_eq!(out, data);
    }
}

#[test]
fn test_shared_tree_across_threads() {
    let tree = HuffmanTree::from_counts(&[3u32, 1, 4, 1, 5, 9, 2, 6]).unwrap();
    let table = tree.code_table().unwrap();
    let messages: Vec<Vec<Symbol>> = (0..8)
        .map(|i| (0..50).map(|j| ((i + j) % 8) as Symbol).collect())
        .collect();
    let streams: Vec<BitVec<u8, Lsb0>> = messages
        .iter()
        .map(|m| {
            let mut bits: BitVec<u8, Lsb0> = BitVec::new();
            table.encode(m.iter().copied(), 8, &mut bits).unwrap();
            bits
        })
        .collect();

    let sources = streams.iter().map(|b| BitSliceSource::new(b)).collect();
    let results = tree.decode_batch(sources, 8);
    for (result, message) in results.into_iter().zip(&messages) {
        assert_eq!(&result.unwrap(), message);
    }

    std::thread::scope(|scope| {
        for (stream, message) in streams.iter().zip(&messages) {
            let tree = &tree;
            scope.spawn(move || {
                let decoded = tree.decode(&mut BitSliceSource::new(stream), 8).unwrap();
                assert_eq!(&decoded, message);
            });
        }
    });
}
