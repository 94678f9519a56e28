//! Diagnostics for evaluating a fitted curve
//!
//! Small descriptive-statistics helpers used to judge fit quality in tests
//! and demos:
//!
//! - [`mean`] / [`stddev_and_mean`]: basic moments of a value stream.
//! - [`total_variation`]: sum of absolute successive differences across a
//!   curve. Smoothing should monotonically *reduce* this relative to the raw
//!   data as sigma grows.
//! - [`nearest_distance`]: Euclidean distance from a point to the closest
//!   sampled curve point. A smoothed regression passes *near* its inputs, not
//!   through them; this quantifies "near".

use nalgebra::DMatrix;

use crate::value::Value;

/// Computes the arithmetic mean of a stream of values.
///
/// Returns zero for an empty stream.
pub fn mean<T: Value>(values: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut n = T::zero();
    for v in values {
        sum += v;
        n += T::one();
    }
    if n == T::zero() {
        T::zero()
    } else {
        sum / n
    }
}

/// Computes the population standard deviation and mean of a stream of values.
pub fn stddev_and_mean<T: Value>(values: impl Iterator<Item = T>) -> (T, T) {
    let values: Vec<T> = values.collect();
    let mean = mean(values.iter().copied());

    let mut var = T::zero();
    let mut n = T::zero();
    for v in &values {
        let d = *v - mean;
        var += d * d;
        n += T::one();
    }
    if n == T::zero() {
        (T::zero(), mean)
    } else {
        ((var / n).sqrt(), mean)
    }
}

/// Computes the total variation of a row sequence: the sum over all columns
/// of the absolute differences between successive rows.
///
/// A straight, slowly varying curve has low total variation; a jagged one has
/// high total variation.
#[must_use]
pub fn total_variation<T: Value>(rows: &DMatrix<T>) -> T {
    let mut tv = T::zero();
    for i in 1..rows.nrows() {
        for c in 0..rows.ncols() {
            tv += Value::abs(rows[(i, c)] - rows[(i - 1, c)]);
        }
    }
    tv
}

/// Computes the Euclidean distance from `point` to the nearest row of
/// `curve`.
///
/// Returns infinity for an empty curve. `point` must have one entry per
/// curve column; extra entries are ignored.
#[must_use]
pub fn nearest_distance<T: Value>(curve: &DMatrix<T>, point: &[T]) -> T {
    let mut best = T::infinity();
    for i in 0..curve.nrows() {
        let mut dist = T::zero();
        for (c, &p) in point.iter().enumerate().take(curve.ncols()) {
            let d = curve[(i, c)] - p;
            dist += d * d;
        }
        best = nalgebra::RealField::min(best, dist.sqrt());
    }
    best
}
