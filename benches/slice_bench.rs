//! Cost of slice-sampling moves on a few reference targets.
//!
//! Run with:
//! ```bash
//! cargo bench --bench slice_bench
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use slice_mcmc::config::SliceConfig;
use slice_mcmc::distributions::{IsotropicGaussian, Rosenbrock2D};
use slice_mcmc::slice::{shrink, step_out};
use slice_mcmc::slice_sampler::{slice_sample, SliceSampler};

fn bench_single_move(c: &mut Criterion) {
    let target = IsotropicGaussian::new(1.0);
    let x0 = [0.3, -0.2];
    let mut rng = SmallRng::seed_from_u64(0);

    c.bench_function("step_out_and_shrink", |b| {
        b.iter(|| {
            let bracket = step_out(&target, &(), black_box(&x0), 0, 1.0, 10, &mut rng).unwrap();
            black_box(shrink(&target, &(), &x0, &bracket, 1000, &mut rng).unwrap())
        })
    });
}

fn bench_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaussian_1k_rows");
    for width in [0.1, 1.0, 10.0] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &w| {
            let config = SliceConfig::new(w, 50);
            b.iter(|| {
                let mut rng = SmallRng::seed_from_u64(42);
                let run = slice_sample(
                    &IsotropicGaussian::new(1.0),
                    4,
                    &[0.0; 4],
                    &(),
                    1_000,
                    &config,
                    &mut rng,
                )
                .unwrap();
                black_box(run.stats)
            })
        });
    }
    group.finish();
}

fn bench_rosenbrock(c: &mut Criterion) {
    c.bench_function("rosenbrock_1k_rows", |b| {
        b.iter(|| {
            let mut sampler = SliceSampler::new(
                Rosenbrock2D { a: 1.0, b: 100.0 },
                (),
                &[0.0, 0.0],
                SliceConfig::new(0.1, 50),
            )
            .unwrap()
            .set_seed(7);
            black_box(sampler.run(1_000).unwrap())
        })
    });
}

criterion_group!(benches, bench_single_move, bench_widths, bench_rosenbrock);
criterion_main!(benches);
