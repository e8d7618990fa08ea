//! Benchmarks du tableau dynamique et des chunks de bytecode (Criterion)

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use ember_core::{Chunk, DynArray};

pub fn bench_array_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("array/append");
    for n in [64usize, 4096, 262_144] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut arr = DynArray::new();
                for i in 0..n {
                    arr.append(black_box(i as u8));
                }
                black_box(arr.capacity())
            });
        });
    }
    group.finish();
}

pub fn bench_chunk_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk/build");
    for n in [256u32, 65_536] {
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut chunk = Chunk::new();
                for i in 0..n {
                    // une constante toutes les 4 instructions, nouvelle ligne toutes les 8
                    if i % 4 == 0 {
                        let ix = chunk.add_constant(f64::from(i));
                        chunk.append(0x01, i / 8 + 1);
                        chunk.append((ix & 0xFF) as u8, i / 8 + 1);
                    } else {
                        chunk.append(0x00, i / 8 + 1);
                    }
                }
                black_box(chunk.len())
            });
        });
    }
    group.finish();
}

pub fn bench_chunk_release(c: &mut Criterion) {
    c.bench_function("chunk/release", |b| {
        b.iter_batched(
            || {
                let mut chunk = Chunk::new();
                for i in 0..4096u32 {
                    chunk.append(0x00, i);
                }
                chunk
            },
            |mut chunk| {
                chunk.release();
                black_box(chunk.is_empty())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_array_append, bench_chunk_build, bench_chunk_release);
criterion_main!(benches);
