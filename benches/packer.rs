use bin_packer_1d::*;
use criterion::*;
use rand::prelude::*;

fn random_items(num_items: usize, capacity: usize) -> Vec<usize> {
    let mut rng: StdRng = SeedableRng::seed_from_u64(1);
    (0..num_items)
        .map(|_| rng.gen_range(1..=capacity))
        .collect()
}

pub fn benchmark_heuristics(c: &mut Criterion) {
    let items = random_items(500, 120);

    c.bench_function("first fit decreasing 500 items", |b| {
        b.iter(|| ffd_pack(black_box(&items), 120))
    });
    c.bench_function("best fit decreasing 500 items", |b| {
        b.iter(|| bfd_pack(black_box(&items), 120))
    });
}

pub fn benchmark_exact(c: &mut Criterion) {
    let items = random_items(30, 120);
    let limits = SearchLimits::new().with_max_nodes(1_000_000);

    c.bench_function("exact 30 items", |b| {
        b.iter(|| {
            Packer::new()
                .set_capacity(120)
                .add_items(black_box(&items).iter().copied())
                .set_search_limits(limits.clone())
                .exact()
        })
    });
}

pub fn benchmark_exhaustive(c: &mut Criterion) {
    // Eight items whose capacity-sum bound is not reached, so every ordering is tried.
    let items = [6, 6, 6, 5, 5, 5, 2, 2];

    c.bench_function("exhaustive 8 items", |b| {
        b.iter(|| exhaustive_pack(black_box(&items), 10))
    });
}

criterion_group!(
    benches,
    benchmark_heuristics,
    benchmark_exact,
    benchmark_exhaustive
);
criterion_main!(benches);
