//! Gaussian blur kernel for sequence-axis smoothing
//!
//! The moment smoother averages statistical moments along the sample sequence
//! with a normalized Gaussian. The kernel here is sized to span the *entire*
//! sequence: for a sequence of length `L` it has `2L + 1` weights covering
//! positions `−L…L`, so every position influences every other.
//!
//! That choice trades performance for simplicity: convolving with a full-width
//! kernel is the O(L²) cost center of the whole fit. A bounded-support or
//! recursive approximation could replace it behind the same contract.

use crate::{
    error::{Error, Result},
    value::Value,
};

/// A normalized, odd-symmetric Gaussian convolution kernel.
///
/// Weights are `exp(−k²/(2σ²))` for `k = −L…L`, normalized so they sum to
/// exactly 1 (within floating tolerance). Because the weights sum to 1, the
/// blur preserves the overall scale of what it smooths.
///
/// # Example
/// ```
/// use blurfit::kernel::GaussianKernel;
///
/// let kernel = GaussianKernel::spanning(4, 1.5).unwrap();
/// assert_eq!(kernel.len(), 9);
///
/// let sum: f64 = kernel.weights().iter().sum();
/// blurfit::assert_close!(sum, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel<T: Value> {
    weights: Vec<T>,
    half_width: usize,
}

impl<T: Value> GaussianKernel<T> {
    /// Builds a kernel spanning a sequence of length `len`.
    ///
    /// The kernel has `2·len + 1` weights centered on offset zero.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSigma`] if `sigma` is not strictly positive.
    pub fn spanning(len: usize, sigma: T) -> Result<Self> {
        if sigma <= T::zero() {
            return Err(Error::InvalidSigma(format!("{sigma:?}")));
        }

        let denom = T::two() * sigma * sigma;
        let mut weights = Vec::with_capacity(2 * len + 1);
        for i in 0..=2 * len {
            // offset from the center, |i - len|
            let k = T::from_positive_int(len.abs_diff(i));
            weights.push((-(k * k) / denom).exp());
        }

        let mut sum = T::zero();
        for &w in &weights {
            sum += w;
        }
        for w in &mut weights {
            *w /= sum;
        }

        Ok(Self {
            weights,
            half_width: len,
        })
    }

    /// Returns the number of weights, `2·len + 1`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the kernel has no weights. Never the case for a
    /// successfully constructed kernel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the normalized weights, center at index `len`.
    #[must_use]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Convolves a signal with this kernel.
    ///
    /// Performs a "full" convolution and truncates it back to the input
    /// length, keeping the center-aligned portion. Output position `i` is the
    /// weighted sum of every signal value, weighted by its offset from `i`.
    #[must_use]
    pub fn convolve(&self, signal: &[T]) -> Vec<T> {
        let mut out = Vec::with_capacity(signal.len());
        for i in 0..signal.len() {
            let center = i + self.half_width;
            let mut acc = T::zero();
            for (j, &s) in signal.iter().enumerate() {
                let weight = center.checked_sub(j).and_then(|k| self.weights.get(k));
                if let Some(&w) = weight {
                    acc += s * w;
                }
            }
            out.push(acc);
        }
        out
    }
}
