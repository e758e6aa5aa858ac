use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use huffman_tree::{count_symbols, BitSliceSource, HuffmanCodec, HuffmanTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn skewed_bytes(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    // Squaring a uniform sample favours low byte values.
    (0..len)
        .map(|_| {
            let x: f64 = rng.gen();
            (x * x * 255.0) as u8
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_build");
    for size in [1_000, 100_000] {
        let counts = count_symbols(&skewed_bytes(size), 256).unwrap();
        group.bench_with_input(BenchmarkId::new("from_counts", size), &counts, |b, counts| {
            b.iter(|| HuffmanTree::from_counts(black_box(counts)).unwrap())
        });
    }

    let tree = HuffmanTree::from_counts(&count_symbols(&skewed_bytes(10_000), 256).unwrap()).unwrap();
    let text = tree.to_serialized_string().unwrap();
    group.bench_function("write", |b| {
        b.iter(|| black_box(&tree).to_serialized_string().unwrap())
    });
    group.bench_function("from_serialized", |b| {
        b.iter(|| black_box(text.as_str()).parse::<HuffmanTree>().unwrap())
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_decode");
    for size in [1_000, 100_000] {
        let data = skewed_bytes(size);
        let codec = HuffmanCodec::default();
        let compressed = codec.compress(&data).unwrap();
        let tree: HuffmanTree = compressed.tree.parse().unwrap();

        group.bench_with_input(
            BenchmarkId::new("decode", size),
            &compressed.payload,
            |b, payload| {
                b.iter(|| {
                    let mut source = BitSliceSource::from_bytes(black_box(payload));
                    tree.decode(&mut source, 256).unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_decode);
criterion_main!(benches);
