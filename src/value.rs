//! Numeric types and grid utilities for curve fitting.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used for fitting and evaluation, ensuring compatibility
//! with nalgebra and floating-point operations.
//!
//! It also provides [`linspace`], the evenly-spaced grid generator used for
//! the default parameter domain and for the query grid.
//!
//! # Example
//!
//! ```rust
//! use blurfit::value::{linspace, Value};
//!
//! let grid = linspace(0.0, 1.0, 5);
//! assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
//!
//! let two = f64::two();
//! assert_eq!(two, 2.0);
//! ```
use crate::error::Error;

/// Numeric type for curves
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + Send
    + Sync
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Check if the value is neither infinite nor NaN
    fn is_finite(&self) -> bool {
        num_traits::float::FloatCore::is_finite(*self)
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + Send
        + Sync
{
}

/// Generates `count` evenly spaced values from `start` to `end`, inclusive.
///
/// - `count == 0` yields an empty vector.
/// - `count == 1` yields `[start]`.
///
/// The last value is `end` up to floating-point rounding of the step.
#[must_use]
pub fn linspace<T: Value>(start: T, end: T, count: usize) -> Vec<T> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / T::from_positive_int(count - 1);
            (0..count)
                .map(|i| start + T::from_positive_int(i) * step)
                .collect()
        }
    }
}
