//! Smoothed local polynomial regression
//!
//! [`LocalFit`] ties the pipeline together: expand the domain into power-basis
//! features, blur the per-position moment tensors along the sample sequence,
//! solve the normal equations at every position of the densified axis, and
//! evaluate the resulting position-varying polynomials on a dense query grid.
//!
//! The result is a smooth curve through noisy sequential data. Unlike a global
//! polynomial fit, the coefficients vary along the sequence, so the curve can
//! follow shapes no single polynomial of the same degree could.

use nalgebra::DMatrix;

use crate::{
    basis::PowerBasis,
    error::{Error, Result},
    moments::MomentSmoother,
    sample::sample_curve,
    solver::solve_local_systems,
    value::{linspace, Value},
};

/// Options controlling a fit.
///
/// - `resolution`: output densification factor. Each consecutive input pair
///   contributes `resolution` curve segments, so the curve has
///   `N·resolution − resolution + 1` points for `N` inputs.
/// - `degree`: polynomial degree of the local model. Degree 0 is a moving
///   weighted mean, degree 1 a local line, and so on.
/// - `sigma`: smoothing radius in units of the input sample spacing. Small
///   values hug the data; large values flatten it toward a global fit.
///
/// # Example
/// ```
/// use blurfit::FitOptions;
///
/// let options = FitOptions::default()
///     .with_resolution(100)
///     .with_degree(3)
///     .with_sigma(0.5);
/// assert_eq!(options.degree, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions<T: Value = f64> {
    /// Densification factor for the output curve. Must be at least 1.
    pub resolution: usize,

    /// Degree of the local polynomial model.
    pub degree: usize,

    /// Smoothing standard deviation, relative to the input sample spacing.
    /// Must be strictly positive.
    pub sigma: T,
}

impl<T: Value> Default for FitOptions<T> {
    fn default() -> Self {
        Self {
            resolution: 10,
            degree: 1,
            sigma: T::try_cast(0.1).unwrap_or_else(|_| T::epsilon()),
        }
    }
}

impl<T: Value> FitOptions<T> {
    /// Sets the densification factor.
    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the polynomial degree.
    #[must_use]
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Sets the smoothing standard deviation.
    #[must_use]
    pub fn with_sigma(mut self, sigma: T) -> Self {
        self.sigma = sigma;
        self
    }
}

/// A fitted curve through sequential data.
///
/// Holds the dense query grid, the sampled curve, and the position-varying
/// coefficient matrices that produced it, along with degeneracy diagnostics.
///
/// # Example
/// ```
/// use blurfit::{FitOptions, LocalFit};
/// use nalgebra::DMatrix;
///
/// let data = DMatrix::from_row_slice(4, 1, &[1.0, 3.0, 2.0, 4.0]);
/// let fit = LocalFit::new(&data, FitOptions::default()).unwrap();
///
/// assert_eq!(fit.len(), 31);
/// assert_eq!(fit.output_dim(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFit<T: Value = f64> {
    grid: DMatrix<T>,
    curve: DMatrix<T>,
    coefficients: Vec<DMatrix<T>>,
    degenerate: Vec<usize>,
    options: FitOptions<T>,
}

impl<T: Value> LocalFit<T> {
    /// Fits a curve to `data` over an implicit domain.
    ///
    /// Each row of `data` is one observation; rows are assumed evenly spaced
    /// and are assigned domain values `linspace(0, 1, N)`.
    ///
    /// # Errors
    /// - [`Error::NoData`] if `data` has no rows or no columns.
    /// - [`Error::InvalidResolution`] / [`Error::InvalidSigma`] for bad
    ///   options.
    pub fn new(data: &DMatrix<T>, options: FitOptions<T>) -> Result<Self> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(Error::NoData);
        }

        let n = data.nrows();
        let domain = DMatrix::from_iterator(n, 1, linspace(T::zero(), T::one(), n));
        Self::with_domain(&domain, data, options)
    }

    /// Fits a curve to `targets` as a function of the explicit `domain`.
    ///
    /// `domain` is `N×M` (one row of domain coordinates per observation),
    /// `targets` is `N×K`. The curve is sampled on a dense grid spanning the
    /// observed extent of each domain dimension.
    ///
    /// # Errors
    /// - [`Error::NoData`] if either matrix has no rows or no columns.
    /// - [`Error::ShapeMismatch`] if the row counts differ.
    /// - [`Error::InvalidResolution`] / [`Error::InvalidSigma`] for bad
    ///   options.
    pub fn with_domain(
        domain: &DMatrix<T>,
        targets: &DMatrix<T>,
        options: FitOptions<T>,
    ) -> Result<Self> {
        if domain.nrows() == 0 || domain.ncols() == 0 || targets.ncols() == 0 {
            return Err(Error::NoData);
        }
        if domain.nrows() != targets.nrows() {
            return Err(Error::ShapeMismatch {
                expected: domain.nrows(),
                found: targets.nrows(),
            });
        }

        let smoother = MomentSmoother::new(options.resolution, options.sigma)?;
        let basis = PowerBasis::new(options.degree);

        // Basis expansion happens before upsampling so that the interleaved
        // rows stay all-zero, constant column included
        let features = basis.design_matrix(domain);
        let xx = smoother.blurred_moments(&features, &features)?;
        let xy = smoother.blurred_moments(&features, targets)?;

        let solved = solve_local_systems(&xx, &xy)?;
        let (coefficients, degenerate) = solved.into_parts();

        let grid = query_grid(domain, smoother.upsampled_len(domain.nrows()));
        let query = basis.design_matrix(&grid);
        let curve = sample_curve(&query, &coefficients)?;

        Ok(Self {
            grid,
            curve,
            coefficients,
            degenerate,
            options,
        })
    }

    /// Returns the sampled curve, one output point per grid position.
    #[must_use]
    pub fn curve(&self) -> &DMatrix<T> {
        &self.curve
    }

    /// Returns the dense domain grid the curve was sampled on.
    #[must_use]
    pub fn grid(&self) -> &DMatrix<T> {
        &self.grid
    }

    /// Returns the position-varying coefficient matrices.
    #[must_use]
    pub fn coefficients(&self) -> &[DMatrix<T>] {
        &self.coefficients
    }

    /// Returns the grid positions where a singular moment matrix forced the
    /// least-squares fallback.
    #[must_use]
    pub fn degenerate_positions(&self) -> &[usize] {
        &self.degenerate
    }

    /// Returns true if any position needed the least-squares fallback. The
    /// curve is still well defined, but may be less accurate there.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        !self.degenerate.is_empty()
    }

    /// Returns the number of curve points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curve.nrows()
    }

    /// Returns true if the curve has no points. Never the case for a
    /// successful fit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curve.nrows() == 0
    }

    /// Returns the number of output dimensions.
    #[must_use]
    pub fn output_dim(&self) -> usize {
        self.curve.ncols()
    }

    /// Returns the options the fit was computed with.
    #[must_use]
    pub fn options(&self) -> &FitOptions<T> {
        &self.options
    }
}

/// Builds the dense query grid: `len` evenly spaced samples per domain
/// dimension, spanning that dimension's observed extent.
fn query_grid<T: Value>(domain: &DMatrix<T>, len: usize) -> DMatrix<T> {
    let mut grid = DMatrix::zeros(len, domain.ncols());
    for d in 0..domain.ncols() {
        let mut lo = T::infinity();
        let mut hi = T::neg_infinity();
        for i in 0..domain.nrows() {
            lo = nalgebra::RealField::min(lo, domain[(i, d)]);
            hi = nalgebra::RealField::max(hi, domain[(i, d)]);
        }
        for (i, v) in linspace(lo, hi, len).into_iter().enumerate() {
            grid[(i, d)] = v;
        }
    }
    grid
}

/// Fits a smoothed curve to `data` over an implicit `linspace(0, 1, N)`
/// domain. Convenience wrapper around [`LocalFit::new`].
///
/// # Errors
/// See [`LocalFit::new`].
pub fn fit_curve<T: Value>(data: &DMatrix<T>, options: FitOptions<T>) -> Result<LocalFit<T>> {
    LocalFit::new(data, options)
}

/// Fits a smoothed curve to `targets` as a function of `domain`. Convenience
/// wrapper around [`LocalFit::with_domain`].
///
/// # Errors
/// See [`LocalFit::with_domain`].
pub fn fit_curve_with_domain<T: Value>(
    domain: &DMatrix<T>,
    targets: &DMatrix<T>,
    options: FitOptions<T>,
) -> Result<LocalFit<T>> {
    LocalFit::with_domain(domain, targets, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;
    use crate::statistics::{mean, nearest_distance, total_variation};

    #[test]
    fn test_curve_length_formula() {
        for (n, r, expected) in [(4, 10, 31), (6, 100, 501), (2, 1, 2), (5, 3, 13)] {
            let data = DMatrix::from_fn(n, 1, |i, _| i as f64);
            let options = FitOptions::default().with_resolution(r).with_sigma(0.5);
            let fit = LocalFit::new(&data, options).unwrap();

            assert_eq!(fit.len(), expected, "n={n} r={r}");
            assert_eq!(fit.grid().nrows(), expected);
            assert_eq!(fit.coefficients().len(), expected);
        }
    }

    #[test]
    fn test_reproduces_linear_data() {
        // y = 2x is in the degree-1 model space, so blurring the moments
        // changes the local weighting but not the fitted line.
        let x = DMatrix::from_row_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
        let y = DMatrix::from_row_slice(4, 1, &[0.0, 2.0, 4.0, 6.0]);
        let options = FitOptions::default().with_sigma(0.3);

        let fit = LocalFit::with_domain(&x, &y, options).unwrap();
        assert!(!fit.used_fallback());
        for i in 0..fit.len() {
            assert_close!(fit.curve()[(i, 0)], 2.0 * fit.grid()[(i, 0)], 1e-6);
        }
    }

    #[test]
    fn test_constant_domain_uses_fallback() {
        // All domain values equal: the degree-1 moment matrices are rank 1
        // everywhere, but the fit must still produce a finite curve.
        let x = DMatrix::from_element(4, 1, 2.0);
        let y = DMatrix::from_row_slice(4, 1, &[1.0, 2.0, 3.0, 4.0]);
        let options = FitOptions::default().with_sigma(0.5);

        let fit = LocalFit::with_domain(&x, &y, options).unwrap();
        assert!(fit.used_fallback());
        assert_eq!(fit.len(), 31);
        assert!(fit.curve().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_deterministic() {
        let data = DMatrix::from_row_slice(5, 2, &[
            0.0, 1.0, //
            1.0, 3.0, //
            2.0, 2.0, //
            3.0, 5.0, //
            4.0, 4.0,
        ]);
        let options = FitOptions::default().with_sigma(0.7);

        let a = LocalFit::new(&data, options).unwrap();
        let b = LocalFit::new(&data, options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wide_kernel_degree_zero_approaches_mean() {
        // sigma much larger than the sequence: every position sees nearly
        // uniform weights, so a degree-0 fit is close to the column mean.
        let data = DMatrix::from_row_slice(5, 1, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let options = FitOptions {
            resolution: 1,
            degree: 0,
            sigma: 1e4,
        };

        let fit = LocalFit::new(&data, options).unwrap();
        let expected = mean(data.iter().copied());
        for i in 0..fit.len() {
            assert_close!(fit.curve()[(i, 0)], expected, 1e-3);
        }
    }

    #[test]
    fn test_larger_sigma_smooths_more() {
        let data = DMatrix::from_row_slice(8, 1, &[0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);

        let rough = LocalFit::new(&data, FitOptions::default().with_sigma(0.5)).unwrap();
        let smooth = LocalFit::new(&data, FitOptions::default().with_sigma(2.0)).unwrap();

        assert!(total_variation(rough.curve()) > total_variation(smooth.curve()));
    }

    #[test]
    fn test_planar_curve_stays_near_inputs() {
        let data = DMatrix::from_row_slice(6, 2, &[
            0.0, 0.0, //
            1.0, 2.0, //
            2.0, 1.0, //
            3.0, 3.0, //
            4.0, 2.5, //
            5.0, 4.0,
        ]);
        let options = FitOptions::default()
            .with_resolution(100)
            .with_degree(3)
            .with_sigma(0.5);

        let fit = LocalFit::new(&data, options).unwrap();
        assert_eq!(fit.len(), 501);
        assert_eq!(fit.output_dim(), 2);
        assert!(fit.curve().iter().all(|v| v.is_finite()));

        for i in 0..data.nrows() {
            let point = [data[(i, 0)], data[(i, 1)]];
            assert!(
                nearest_distance(fit.curve(), &point) < 0.5,
                "curve strays from input row {i}"
            );
        }
    }

    #[test]
    fn test_precondition_errors() {
        let data = DMatrix::from_row_slice(3, 1, &[1.0, 2.0, 3.0]);

        assert!(matches!(
            LocalFit::new(&data, FitOptions::default().with_sigma(0.0)),
            Err(Error::InvalidSigma(_))
        ));
        assert!(matches!(
            LocalFit::new(&data, FitOptions::default().with_resolution(0)),
            Err(Error::InvalidResolution)
        ));
        assert!(matches!(
            LocalFit::new(&DMatrix::<f64>::zeros(0, 1), FitOptions::default()),
            Err(Error::NoData)
        ));

        let x = DMatrix::from_row_slice(2, 1, &[0.0, 1.0]);
        assert!(matches!(
            LocalFit::with_domain(&x, &data, FitOptions::default()),
            Err(Error::ShapeMismatch {
                expected: 2,
                found: 3
            })
        ));
    }
}
