//! Parallel pipeline against the sequential scan over a synthetic corpus.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use wordfreq_engine::{count_parallel, count_sequential, PipelineSettings, TokenBuffer};

fn synthetic_buffer(tokens: usize) -> TokenBuffer {
    (0..tokens)
        .map(|i| format!("w{}", (i * 31 + i / 7) % 5_000))
        .collect()
}

fn bench_counting(c: &mut Criterion) {
    let buffer = synthetic_buffer(1_000_000);
    let mut group = c.benchmark_group("count_words");
    group.sample_size(10);

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(count_sequential(&buffer)))
    });

    for chunk_size in [50_000usize, 200_000] {
        let settings = PipelineSettings::with_chunk_size(chunk_size);
        group.bench_with_input(
            BenchmarkId::new("parallel", chunk_size),
            &settings,
            |b, settings| b.iter(|| black_box(count_parallel(&buffer, settings))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_counting);
criterion_main!(benches);
