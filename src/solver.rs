//! Per-position solution of the blurred normal equations
//!
//! For every position `i` along the (upsampled) sequence, the blurred moment
//! tensors define a small linear system `XX[i] · C[i] = XY[i]` whose solution
//! is the locally valid coefficient matrix. Each system is independent of the
//! others, so positions can be solved in any order (or in parallel, with the
//! `parallel` feature).
//!
//! A direct LU solve is preferred. When a position's moment matrix is
//! singular or ill-conditioned, the solve falls back to an SVD pseudo-inverse
//! for that position only: the fit never aborts because of one degenerate
//! position, it just records it so the caller can judge the accuracy.

use nalgebra::DMatrix;

use crate::{
    error::{Error, Result},
    moments::MomentTensor,
    value::Value,
};

/// Position-varying coefficient matrices, with degeneracy diagnostics.
///
/// Entry `i` of [`coefficients`](Self::coefficients) is the `P×K` matrix
/// solving `XX[i] · C = XY[i]`. Positions where the direct solve failed and a
/// pseudo-inverse was substituted are listed in
/// [`degenerate_positions`](Self::degenerate_positions); coefficients there
/// are least-squares approximations and the curve may be less accurate.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalCoefficients<T: Value> {
    coefficients: Vec<DMatrix<T>>,
    degenerate: Vec<usize>,
}

impl<T: Value> LocalCoefficients<T> {
    /// Returns one coefficient matrix per sequence position.
    #[must_use]
    pub fn coefficients(&self) -> &[DMatrix<T>] {
        &self.coefficients
    }

    /// Returns the positions where the pseudo-inverse fallback was used.
    #[must_use]
    pub fn degenerate_positions(&self) -> &[usize] {
        &self.degenerate
    }

    /// Returns true if any position needed the pseudo-inverse fallback.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        !self.degenerate.is_empty()
    }

    /// Consumes self, returning the coefficients and the degenerate positions.
    #[must_use]
    pub fn into_parts(self) -> (Vec<DMatrix<T>>, Vec<usize>) {
        (self.coefficients, self.degenerate)
    }
}

/// Solves `XX[i] · C[i] = XY[i]` independently for every position.
///
/// # Errors
/// - [`Error::ShapeMismatch`] if the two tensors have different lengths.
/// - [`Error::Algebra`] only if even the pseudo-inverse cannot be computed,
///   which indicates a defect rather than bad data.
pub fn solve_local_systems<T: Value>(
    xx: &MomentTensor<T>,
    xy: &MomentTensor<T>,
) -> Result<LocalCoefficients<T>> {
    if xx.len() != xy.len() {
        return Err(Error::ShapeMismatch {
            expected: xx.len(),
            found: xy.len(),
        });
    }

    #[cfg(not(feature = "parallel"))]
    let solved: Vec<(DMatrix<T>, bool)> = xx
        .iter()
        .zip(xy.iter())
        .map(|(m, rhs)| solve_position(m, rhs))
        .collect::<Result<_>>()?;

    #[cfg(feature = "parallel")]
    let solved: Vec<(DMatrix<T>, bool)> = {
        use rayon::prelude::*;
        xx.par_iter()
            .zip(xy.par_iter())
            .map(|(m, rhs)| solve_position(m, rhs))
            .collect::<Result<_>>()?
    };

    let mut coefficients = Vec::with_capacity(solved.len());
    let mut degenerate = Vec::new();
    for (i, (coefs, fallback)) in solved.into_iter().enumerate() {
        if fallback {
            degenerate.push(i);
        }
        coefficients.push(coefs);
    }

    Ok(LocalCoefficients {
        coefficients,
        degenerate,
    })
}

/// Solves a single position, reporting whether the fallback was needed.
fn solve_position<T: Value>(xx: &DMatrix<T>, xy: &DMatrix<T>) -> Result<(DMatrix<T>, bool)> {
    if let Some(coefs) = xx.clone().lu().solve(xy) {
        if coefs.iter().all(Value::is_finite) {
            return Ok((coefs, false));
        }
    }

    // Singular or ill-conditioned: least-squares pseudo-inverse for this
    // position only
    let svd = xx.clone().svd(true, true);

    // ~= machine_epsilon * max(size) * max_singular
    let max_size = T::from_positive_int(xx.nrows().max(xx.ncols()));
    let epsilon = T::epsilon() * max_size * svd.singular_values.max();

    let pinv = svd.pseudo_inverse(epsilon).map_err(Error::Algebra)?;
    Ok((pinv * xy, true))
}
