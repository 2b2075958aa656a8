//! Benchmarks for memory experiment generation
//!
//! Run with: cargo bench -p tessel-gen

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tessel_gen::{CircuitGenParameters, generate_circuit};

fn params(distance: u32) -> CircuitGenParameters {
    CircuitGenParameters::new(distance, distance).with_noise(0.001, 0.001, 0.001, 0.001)
}

/// Benchmark generation across code families and distances
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for task in [
        "surface_code:rotated_memory_z",
        "surface_code:unrotated_memory_x",
        "toric_code:unrotated_memory_z",
    ] {
        for distance in [3u32, 7, 15] {
            group.bench_with_input(BenchmarkId::new(task, distance), &distance, |b, &d| {
                let p = params(d);
                b.iter(|| generate_circuit(black_box(task), &p).unwrap());
            });
        }
    }

    group.finish();
}

/// Benchmark text emission of a generated program
fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");

    for distance in [3u32, 7, 15] {
        let circuit = generate_circuit("surface_code:rotated_memory_x", &params(distance)).unwrap();
        group.bench_with_input(BenchmarkId::new("rotated", distance), &circuit, |b, circuit| {
            b.iter(|| tessel_stim::emit(black_box(circuit)).len());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_emit);
criterion_main!(benches);
