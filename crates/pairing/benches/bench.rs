use bls12_pairing::{g1, g2, multi_pairing, pairing, Fr, G1, G2};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

const RNG_SEED: u64 = 42;
const MAX_MSM_SIZE: usize = 64;
const MAX_PAIRING_PAIRS: usize = 8;

/// Benchmarks the group, field and pairing operations.
pub fn benchmark_pairing_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("BLS12-381 benchmarks");
    let group_name = |description: &str| format!("bls12 bench | {description}");
    let mut rng = StdRng::seed_from_u64(RNG_SEED);

    let a = Fr::random_with(&mut rng);
    let p = g1() * a;
    let q = g2() * a;
    let e = pairing(&p, &q);

    group.bench_function(group_name("pairing"), |b| {
        b.iter(|| pairing(black_box(&p), black_box(&q)))
    });

    group.bench_function(group_name("G1 scalar mul"), |b| {
        b.iter(|| black_box(p) * black_box(a))
    });

    group.bench_function(group_name("G2 scalar mul"), |b| {
        b.iter(|| black_box(q) * black_box(a))
    });

    group.bench_function(group_name("GT pow"), |b| {
        b.iter(|| black_box(e).pow(black_box(&a)))
    });

    group.bench_function(group_name("Fr inverse"), |b| {
        b.iter(|| black_box(a).inverse())
    });

    group.bench_function(group_name("Fr sqrt"), |b| {
        let square = a.sqr();
        b.iter(|| black_box(square).sqrt())
    });

    group.bench_function(group_name("G1 hash"), |b| {
        b.iter(|| G1::hash(black_box(b"benchmark message")))
    });

    group.bench_function(group_name("G2 hash"), |b| {
        b.iter(|| G2::hash(black_box(b"benchmark message")))
    });

    group.finish();

    let mut group = c.benchmark_group("BLS12-381 batch benchmarks");
    let terms: Vec<(G1, Fr)> = (0..MAX_MSM_SIZE)
        .map(|_| (g1() * Fr::random_with(&mut rng), Fr::random_with(&mut rng)))
        .collect();
    for size in [1, 8, MAX_MSM_SIZE] {
        group.bench_with_input(BenchmarkId::new("G1 msm", size), &size, |b, &size| {
            b.iter(|| G1::msm(black_box(&terms[..size])))
        });
    }

    let pairs: Vec<(G1, G2)> = (0..MAX_PAIRING_PAIRS)
        .map(|_| (g1() * Fr::random_with(&mut rng), g2() * Fr::random_with(&mut rng)))
        .collect();
    for size in [1, 2, MAX_PAIRING_PAIRS] {
        group.bench_with_input(BenchmarkId::new("multi pairing", size), &size, |b, &size| {
            b.iter(|| multi_pairing(black_box(&pairs[..size])))
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = benchmark_pairing_ops
}
criterion_main!(benches);
