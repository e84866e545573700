//! Derivation throughput per digest and execution form

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use cryypt_pbkdf2::{Digest, Pbkdf2, pbkdf2, pbkdf2_sync};
use tokio::runtime::Runtime;

const ITERATIONS: u32 = 10_000;

/// Blocking derivation of one output block per digest
fn benchmark_digests(c: &mut Criterion) {
    let mut group = c.benchmark_group("pbkdf2_sync");
    group.throughput(Throughput::Elements(u64::from(ITERATIONS)));

    for digest in Digest::ALL {
        group.bench_with_input(
            BenchmarkId::new(digest.as_str(), ITERATIONS),
            &digest,
            |b, &digest| {
                b.iter(|| {
                    let key = pbkdf2_sync(
                        "password",
                        "salt",
                        ITERATIONS,
                        digest.output_len(),
                        digest,
                    )
                    .expect("derivation should succeed");
                    std::hint::black_box(key);
                });
            },
        );
    }
    group.finish();
}

/// Output length beyond one block multiplies the work
fn benchmark_key_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("pbkdf2_key_length");

    for key_length in [20usize, 64, 256] {
        group.bench_with_input(
            BenchmarkId::new("SHA1", key_length),
            &key_length,
            |b, &key_length| {
                b.iter(|| {
                    let key = pbkdf2_sync("password", "salt", 1_000, key_length, Digest::Sha1)
                        .expect("derivation should succeed");
                    std::hint::black_box(key);
                });
            },
        );
    }
    group.finish();
}

/// Overhead of worker dispatch compared with the blocking form
fn benchmark_dispatch(c: &mut Criterion) {
    let rt = Runtime::new().expect("runtime should start");
    let mut group = c.benchmark_group("pbkdf2_dispatch");

    group.bench_function("future", |b| {
        b.iter(|| {
            rt.block_on(async {
                let key = pbkdf2("password", "salt", 1_000, 32, "sha256")
                    .expect("inputs are valid")
                    .await
                    .expect("derivation should succeed");
                std::hint::black_box(key);
            });
        });
    });

    let builder = Pbkdf2::sha256().iterations(1_000).with_salt("salt");
    group.bench_function("builder_future", |b| {
        b.iter(|| {
            rt.block_on(async {
                let key = builder
                    .derive("password")
                    .expect("inputs are valid")
                    .await
                    .expect("derivation should succeed");
                std::hint::black_box(key);
            });
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_digests,
    benchmark_key_lengths,
    benchmark_dispatch
);
criterion_main!(benches);
