//! Corrupt a clean signal with noise, then smooth it back out.
//!
//! Run with `cargo run --example noisy_fit --features transforms`
use blurfit::{
    nalgebra::DMatrix,
    statistics::total_variation,
    transforms::{ApplyNoise, Strength},
    FitOptions, LocalFit,
};

fn main() {
    // A clean sine wave, 32 samples over two periods
    let clean = DMatrix::from_fn(32, 1, |i, _| (i as f64 * 0.4).sin());
    let noisy = clean.apply_normal_noise(Strength::Relative(0.3), Some(42));

    let options = FitOptions::default().with_degree(2).with_sigma(1.5);
    let fit = LocalFit::new(&noisy, options).expect("Failed to fit data");

    println!(
        "total variation: clean {:.3}, noisy {:.3}, smoothed {:.3}",
        total_variation(&clean),
        total_variation(&noisy),
        total_variation(fit.curve()),
    );
    println!(
        "{} noisy samples became a {}-point smooth curve",
        noisy.nrows(),
        fit.len()
    );
}
