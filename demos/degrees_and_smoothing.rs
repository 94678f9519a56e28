//! Render how the polynomial degree and the smoothing radius shape the curve.
//!
//! Produces two PNG files in the working directory:
//! - `degrees.png`: degrees 1 through 5 at a fixed sigma
//! - `smoothing.png`: a fixed degree across a range of sigmas
//!
//! Run with `cargo run --example degrees_and_smoothing --features plotting`
use blurfit::{
    nalgebra::DMatrix,
    plot::{plot_fits, PlotOptions},
    FitOptions, LocalFit,
};

fn main() {
    let data = DMatrix::from_row_slice(
        8,
        2,
        &[
            0.0, 0.0, //
            1.0, 2.0, //
            2.0, 1.0, //
            3.0, 3.5, //
            4.0, 2.0, //
            5.0, 4.0, //
            6.0, 3.0, //
            7.0, 5.0,
        ],
    );

    let degree_fits: Vec<(String, LocalFit)> = (1..=5)
        .map(|degree| {
            let options = FitOptions::default()
                .with_resolution(100)
                .with_degree(degree)
                .with_sigma(0.9);
            let fit = LocalFit::new(&data, options).expect("Failed to fit data");
            (format!("degree {degree}"), fit)
        })
        .collect();
    let series: Vec<(&str, &LocalFit)> = degree_fits
        .iter()
        .map(|(label, fit)| (label.as_str(), fit))
        .collect();
    plot_fits(
        "degrees.png",
        &data,
        &series,
        &PlotOptions {
            title: "Local degree at sigma = 0.9".to_string(),
            ..Default::default()
        },
    )
    .expect("Failed to render degrees.png");

    let sigma_fits: Vec<(String, LocalFit)> = (0..5)
        .map(|i| {
            let sigma = 0.5 + 0.2 * f64::from(i);
            let options = FitOptions::default()
                .with_resolution(100)
                .with_degree(3)
                .with_sigma(sigma);
            let fit = LocalFit::new(&data, options).expect("Failed to fit data");
            (format!("sigma {sigma:.1}"), fit)
        })
        .collect();
    let series: Vec<(&str, &LocalFit)> = sigma_fits
        .iter()
        .map(|(label, fit)| (label.as_str(), fit))
        .collect();
    plot_fits(
        "smoothing.png",
        &data,
        &series,
        &PlotOptions {
            title: "Smoothing radius at degree 3".to_string(),
            ..Default::default()
        },
    )
    .expect("Failed to render smoothing.png");

    println!("Wrote degrees.png and smoothing.png");
}
