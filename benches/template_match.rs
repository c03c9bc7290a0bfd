//! Benchmark for library construction and template matching throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sqwave_core::{BitPattern, Hypothesis, Matcher, ModelLibrary, NoiseModel};

fn ground_truth() -> BitPattern {
    Hypothesis::new(8.0 / 36.0, 2.0 / 36.0, 3.0 / 36.0)
        .quantize()
        .unwrap()
}

fn bench_library_build(c: &mut Criterion) {
    c.bench_function("library_build", |b| {
        b.iter(|| black_box(ModelLibrary::build()))
    });
}

fn bench_best_overlap(c: &mut Criterion) {
    let matcher = Matcher::new(ModelLibrary::build());
    let model = ground_truth();

    c.bench_function("best_overlap_exact", |b| {
        b.iter(|| matcher.best_overlap(black_box(model)).unwrap())
    });

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let noise = NoiseModel::high_noise();
    let observations: Vec<BitPattern> = (0..1000).map(|_| noise.perturb(model, &mut rng)).collect();

    c.bench_function("best_overlap_noisy", |b| {
        let observation = observations[0];
        b.iter(|| matcher.best_overlap(black_box(observation)).unwrap())
    });

    c.bench_function("best_overlap_1000", |b| {
        b.iter(|| {
            for observation in &observations {
                black_box(matcher.best_overlap(*observation).unwrap());
            }
        })
    });
}

fn bench_perturb(c: &mut Criterion) {
    let model = ground_truth();
    let noise = NoiseModel::low_noise();

    c.bench_function("perturb", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        b.iter(|| black_box(noise.perturb(black_box(model), &mut rng)))
    });
}

fn bench_throughput(c: &mut Criterion) {
    let matcher = Matcher::new(ModelLibrary::build());
    let model = ground_truth();
    let noise = NoiseModel::low_noise();

    let mut group = c.benchmark_group("throughput");

    for size in [100usize, 1000, 10000] {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let observations: Vec<BitPattern> =
            (0..size).map(|_| noise.perturb(model, &mut rng)).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("best_overlap", size),
            &observations,
            |b, observations| {
                b.iter(|| {
                    for observation in observations {
                        black_box(matcher.best_overlap(*observation).unwrap());
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_library_build,
    bench_best_overlap,
    bench_perturb,
    bench_throughput
);
criterion_main!(benches);
