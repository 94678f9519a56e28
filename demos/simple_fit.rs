//! Smooth a handful of planar points into a dense curve and print it.
//!
//! Run with `cargo run --example simple_fit`
use blurfit::{nalgebra::DMatrix, FitOptions, LocalFit};

fn main() {
    let data = DMatrix::from_row_slice(
        6,
        2,
        &[
            0.0, 0.0, //
            1.0, 2.0, //
            2.0, 1.0, //
            3.0, 3.0, //
            4.0, 2.5, //
            5.0, 4.0,
        ],
    );

    let options = FitOptions::default()
        .with_resolution(100)
        .with_degree(3)
        .with_sigma(0.5);
    let fit = LocalFit::new(&data, options).expect("Failed to fit data");

    println!(
        "Fitted {} input points into a {}-point curve",
        data.nrows(),
        fit.len()
    );
    if fit.used_fallback() {
        println!(
            "Warning: {} positions were degenerate and used the least-squares fallback",
            fit.degenerate_positions().len()
        );
    }

    for i in (0..fit.len()).step_by(50) {
        let point = fit.curve().row(i);
        println!("t={:.2}: ({:.4}, {:.4})", fit.grid()[(i, 0)], point[0], point[1]);
    }
}
