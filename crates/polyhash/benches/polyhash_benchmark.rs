//! Throughput of the hash variants and backends.
//!
//! Run with: `cargo bench -p polyhash`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::Rng;

use polyhash::{Backend, ByteWidening, HashConfig, HashStrategySelector, HashVariant, hash_with};

const SIZES: [usize; 5] = [16, 256, 4096, 65_536, 1 << 20];

/// Generate random data of the specified size.
fn generate_random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0u8; size];
    rng.fill(&mut data[..]);
    data
}

/// Compare reference, scalar, vectorized and copying variants.
fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("variants");

    for size in SIZES {
        let data = generate_random_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        for &variant in HashVariant::all() {
            let strategy = HashStrategySelector::for_variant(variant);
            group.bench_with_input(BenchmarkId::new(variant.name(), size), &data, |b, data| {
                b.iter(|| black_box(strategy.hash(black_box(data))));
            });
        }
    }

    group.finish();
}

/// Compare every backend supported on this machine.
fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("backends");

    for size in SIZES {
        let data = generate_random_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        for &backend in Backend::all().iter().filter(|b| b.is_supported()) {
            let config = HashConfig::new()
                .with_backend(backend)
                .with_widening(ByteWidening::Unsigned);
            group.bench_with_input(BenchmarkId::new(backend.name(), size), &data, |b, data| {
                b.iter(|| black_box(hash_with(black_box(data.as_slice()), &config)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_variants, bench_backends);
criterion_main!(benches);
