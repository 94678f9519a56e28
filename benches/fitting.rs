use blurfit::{nalgebra::DMatrix, FitOptions, LocalFit};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// Deterministic wavy planar dataset, n rows of (x, y)
fn gen_sample_data(n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n, 2, |i, c| {
        let t = i as f64 / 4.0;
        if c == 0 {
            t
        } else {
            t.sin() + 0.3 * (3.1 * t).cos()
        }
    })
}

fn fit(data: &DMatrix<f64>, options: FitOptions) -> LocalFit {
    LocalFit::new(data, options).expect("Failed to fit data")
}

fn criterion_benchmark(c: &mut Criterion) {
    //
    // First we test how the fit scales with data size.
    // The full-width kernel makes this the quadratic axis.
    println!("Benchmarking fit vs n (Degree=3, Resolution=10)...");
    let options = FitOptions::default().with_degree(3).with_sigma(0.5);
    let mut group = c.benchmark_group("fit_vs_n");
    for n in [16, 32, 64, 128] {
        let data = gen_sample_data(n);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| fit(black_box(&data), options));
        });
    }
    group.finish();

    //
    // Now scaling with the densification factor
    println!("Benchmarking fit vs resolution (Degree=3, n=32)...");
    let data = gen_sample_data(32);
    let mut group = c.benchmark_group("fit_vs_resolution");
    for resolution in [1, 10, 100] {
        let options = options.with_resolution(resolution);
        group.bench_function(format!("Resolution={resolution}"), |b| {
            b.iter(|| fit(black_box(&data), options));
        });
    }
    group.finish();

    //
    // Degree only grows the small per-position systems, so this axis
    // should stay nearly flat
    println!("Benchmarking fit vs degree (Resolution=10, n=32)...");
    let data = gen_sample_data(32);
    let mut group = c.benchmark_group("fit_vs_degree");
    for degree in 1..=5 {
        let options = FitOptions::default().with_degree(degree).with_sigma(0.5);
        group.bench_function(format!("Degree={degree}"), |b| {
            b.iter(|| fit(black_box(&data), options));
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
