//! Outer-product moment tensors and their Gaussian blurring
//!
//! This is the trick that turns ordinary least squares into a spatially local
//! regression without an explicit weighting loop per query point.
//!
//! For two feature sequences `A` (N×P) and `B` (N×Q) over the same positions,
//! the engine:
//! 1. Interleaves `resolution − 1` all-zero rows between consecutive samples,
//!    stretching the sequence to length `N·R − R + 1`.
//! 2. Forms the per-position outer products `A[i] ⊗ B[i]` (zero rows yield
//!    zero matrices, so this is the same as interleaving zero moments).
//! 3. Blurs every `(p, q)` tensor slot along the sequence axis with a
//!    [`GaussianKernel`] of effective width `resolution · sigma`.
//!
//! After blurring, the zero-inserted positions hold locally-weighted moment
//! estimates interpolated from the neighboring real observations. Solving the
//! normal equations at each position then yields position-varying
//! coefficients instead of a single global fit.

use nalgebra::DMatrix;

use crate::{
    error::{Error, Result},
    kernel::GaussianKernel,
    value::Value,
};

/// A sequence of per-position moment matrices.
///
/// Entry `i` is the (blurred) outer product of two feature rows at sequence
/// position `i`.
pub type MomentTensor<T> = Vec<DMatrix<T>>;

/// Computes blurred outer-product moment tensors along a sample sequence.
///
/// `sigma` is interpreted relative to the original sample spacing: the kernel
/// applied to the upsampled axis uses `resolution · sigma`, so a given sigma
/// smooths over the same number of *input* points at any resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentSmoother<T: Value> {
    resolution: usize,
    sigma: T,
}

impl<T: Value> MomentSmoother<T> {
    /// Creates a smoother with the given resolution factor and kernel width.
    ///
    /// # Errors
    /// - [`Error::InvalidResolution`] if `resolution` is zero.
    /// - [`Error::InvalidSigma`] if `sigma` is not strictly positive.
    pub fn new(resolution: usize, sigma: T) -> Result<Self> {
        if resolution == 0 {
            return Err(Error::InvalidResolution);
        }
        if sigma <= T::zero() {
            return Err(Error::InvalidSigma(format!("{sigma:?}")));
        }
        Ok(Self { resolution, sigma })
    }

    /// Returns the resolution factor.
    #[must_use]
    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    /// Returns the smoothing standard deviation, in units of input spacing.
    #[must_use]
    pub fn sigma(&self) -> T {
        self.sigma
    }

    /// Returns the upsampled-axis length for an input of `len` positions:
    /// `len·R − R + 1`, or 0 for an empty input.
    #[must_use]
    pub const fn upsampled_len(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            len * self.resolution - self.resolution + 1
        }
    }

    /// Stretches a row sequence by interleaving `resolution − 1` zero rows
    /// between each consecutive pair of input rows.
    ///
    /// Row `i` of the input lands at row `i·resolution` of the output.
    #[must_use]
    pub fn upsample(&self, rows: &DMatrix<T>) -> DMatrix<T> {
        let mut out = DMatrix::zeros(self.upsampled_len(rows.nrows()), rows.ncols());
        for i in 0..rows.nrows() {
            out.set_row(i * self.resolution, &rows.row(i));
        }
        out
    }

    /// Computes the blurred moment tensor for two feature sequences.
    ///
    /// `a` is `N×P`, `b` is `N×Q`; the result holds `N·R − R + 1` matrices of
    /// shape `P×Q`, each a Gaussian-weighted local average of the raw outer
    /// products.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if `a` and `b` cover a different
    /// number of positions.
    pub fn blurred_moments(&self, a: &DMatrix<T>, b: &DMatrix<T>) -> Result<MomentTensor<T>> {
        if a.nrows() != b.nrows() {
            return Err(Error::ShapeMismatch {
                expected: a.nrows(),
                found: b.nrows(),
            });
        }

        let a = self.upsample(a);
        let b = self.upsample(b);
        let len = a.nrows();

        let mut moments: MomentTensor<T> =
            (0..len).map(|i| a.row(i).transpose() * b.row(i)).collect();

        let sigma_eff = self.sigma * T::from_positive_int(self.resolution);
        let kernel = GaussianKernel::spanning(len, sigma_eff)?;

        // Blur each (p, q) slot independently along the sequence axis
        let mut series = vec![T::zero(); len];
        for p in 0..a.ncols() {
            for q in 0..b.ncols() {
                for (i, m) in moments.iter().enumerate() {
                    series[i] = m[(p, q)];
                }
                let blurred = kernel.convolve(&series);
                for (i, m) in moments.iter_mut().enumerate() {
                    m[(p, q)] = blurred[i];
                }
            }
        }

        Ok(moments)
    }
}
