//! # Blurfit
//! ## Local regression by blurring, not by loops
//!
//! Fitting one polynomial to a whole dataset is easy and usually wrong: real
//! sequences bend in ways no single low-degree polynomial can follow. Classic
//! local regression fixes that by re-fitting a weighted model at every query
//! point, which means a weighting loop per output sample.
//!
//! This crate takes a different route. It computes the normal-equation
//! moments (`XᵀX` and `XᵀY`) *per sequence position*, stretches the sequence
//! with zero-filled positions, and blurs the whole moment tensor once with a
//! Gaussian along the sequence axis. Every position then holds its own
//! locally weighted normal equations, ready to solve. One blur replaces all
//! the per-query weighting loops, and densification falls out for free.
//!
//! What you get:
//! - A smooth, dense curve through noisy sequential data, in any number of
//!   output dimensions
//! - Position-varying polynomial coefficients you can inspect
//! - Diagnostics instead of aborts when the data is locally degenerate
//!
//! The simplest use-case is to smooth and densify a small set of 2D points:
//! ```rust
//! use blurfit::{FitOptions, LocalFit};
//! use nalgebra::DMatrix;
//!
//! // Six planar points, one row each
//! let data = DMatrix::from_row_slice(6, 2, &[
//!     0.0, 0.0,
//!     1.0, 2.0,
//!     2.0, 1.0,
//!     3.0, 3.0,
//!     4.0, 2.5,
//!     5.0, 4.0,
//! ]);
//!
//! let options = FitOptions::default()
//!     .with_resolution(100)
//!     .with_degree(3)
//!     .with_sigma(0.5);
//! let fit = LocalFit::new(&data, options).unwrap();
//!
//! // 6 points became a dense 501-point curve
//! assert_eq!(fit.len(), 501);
//! assert_eq!(fit.output_dim(), 2);
//! assert!(!fit.used_fallback());
//! ```
//!
//! # Core Concepts
//! - A [`LocalFit`] is a smoothed curve through sequential observations.
//!     - Each row of the input is one observation; row order is the sequence.
//!     - The fit is sampled on a dense grid spanning the observed domain.
//! - The **domain** is what the curve is a function of.
//!     - [`LocalFit::new`] assigns an implicit, evenly spaced domain, which
//!       treats every column of your data as an output. This is how you
//!       smooth a path through points.
//!     - [`LocalFit::with_domain`] fits explicit targets against explicit
//!       domain coordinates instead.
//! - [`FitOptions`] controls the three knobs:
//!     - `resolution` is how many curve points each input gap becomes.
//!     - `degree` is the local polynomial degree ([`basis::PowerBasis`]).
//!     - `sigma` is the smoothing radius, in units of the input spacing.
//!       Small sigma follows the data closely; large sigma irons it flat.
//!
//! # Implementation Details
//!
//! Linear algebra is `nalgebra` throughout; the numeric type is generic over
//! [`value::Value`], so `f32` and `f64` both work. Positions whose moment
//! matrix is singular are solved with an SVD pseudo-inverse and reported via
//! [`LocalFit::degenerate_positions`] rather than failing the whole fit. The
//! `parallel` feature solves positions with `rayon`.
//!
//! # Testing utilities
//!
//! [`test`] exports tolerance-based assertion macros, and the `transforms`
//! feature adds reproducible noise injection for exercising the smoother on
//! synthetic data.
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod test;

#[cfg(feature = "plotting")]
#[cfg_attr(docsrs, doc(cfg(feature = "plotting")))]
pub mod plot;

#[cfg(feature = "transforms")]
#[cfg_attr(docsrs, doc(cfg(feature = "transforms")))]
pub mod transforms;

pub mod basis;
pub mod error;
pub mod kernel;
pub mod moments;
pub mod sample;
pub mod solver;
pub mod statistics;
pub mod value;

mod fit;

pub use fit::*;

pub use nalgebra;
