//! Power-basis feature expansion for local regression
//!
//! The smoother represents the curve locally as a polynomial in the domain
//! coordinates. [`PowerBasis`] turns a sequence of raw coordinate rows into a
//! design matrix of monomial features: each domain dimension contributes the
//! columns `1, v, v², …, v^D` for its value `v`, and columns from different
//! dimensions are concatenated.
//!
//! Degree 0 always yields a constant-1 column, so a degree-0 fit is a locally
//! weighted mean.

use nalgebra::DMatrix;

use crate::value::Value;

/// Plain monomial feature expansion up to a fixed degree.
///
/// For a sequence of `N` points with `M` domain dimensions, the design matrix
/// has `N` rows and `(degree + 1) × M` columns. Powers are computed by
/// cumulative multiplication, so `0⁰` is treated as `1`.
///
/// # Example
/// ```
/// use blurfit::basis::PowerBasis;
/// use nalgebra::DMatrix;
///
/// let basis = PowerBasis::new(2);
/// let points = DMatrix::from_row_slice(2, 1, &[2.0, 3.0]);
/// let features = basis.design_matrix(&points);
/// assert_eq!(features, DMatrix::from_row_slice(2, 3, &[
///     1.0, 2.0, 4.0,
///     1.0, 3.0, 9.0,
/// ]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerBasis {
    degree: usize,
}

impl PowerBasis {
    /// Creates a basis for polynomials of the given degree.
    #[must_use]
    pub const fn new(degree: usize) -> Self {
        Self { degree }
    }

    /// Returns the polynomial degree.
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the number of basis functions per domain dimension.
    ///
    /// One function per power plus the constant term, so `degree + 1`.
    #[must_use]
    pub const fn k(&self) -> usize {
        self.degree + 1
    }

    /// Returns the total feature count for `dims` domain dimensions.
    #[must_use]
    pub const fn columns(&self, dims: usize) -> usize {
        self.k() * dims
    }

    /// Expands each row of `points` into its power-basis feature vector.
    ///
    /// `points` is an `N × M` matrix of raw domain coordinates; the result is
    /// the `N × (degree + 1)·M` design matrix.
    #[must_use]
    pub fn design_matrix<T: Value>(&self, points: &DMatrix<T>) -> DMatrix<T> {
        let k = self.k();
        let mut features = DMatrix::zeros(points.nrows(), self.columns(points.ncols()));

        for i in 0..points.nrows() {
            for d in 0..points.ncols() {
                let v = points[(i, d)];
                let mut power = T::one();
                for j in 0..k {
                    features[(i, d * k + j)] = power;
                    power *= v;
                }
            }
        }

        features
    }
}
