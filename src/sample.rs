//! Evaluation of position-varying coefficients on the query grid
//!
//! The final step of a fit: each query-grid feature row is multiplied by the
//! coefficient matrix solved for that same position, producing one output
//! point per position. The smoothing step already aligned positions
//! one-to-one, so the query matrix and the coefficient tensor must have the
//! same length.

use nalgebra::DMatrix;

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Evaluates `curve[i] = query[i] · coefficients[i]` for every position.
///
/// `query` is the `L×P` feature matrix of the dense grid; `coefficients`
/// holds `L` matrices of shape `P×K`. The result is the `L×K` curve.
///
/// # Errors
/// Returns [`Error::ShapeMismatch`] if `query` and `coefficients` have
/// different lengths.
pub fn sample_curve<T: Value>(
    query: &DMatrix<T>,
    coefficients: &[DMatrix<T>],
) -> Result<DMatrix<T>> {
    if query.nrows() != coefficients.len() {
        return Err(Error::ShapeMismatch {
            expected: coefficients.len(),
            found: query.nrows(),
        });
    }

    let output_dim = coefficients.first().map_or(0, |c| c.ncols());
    let mut curve = DMatrix::zeros(query.nrows(), output_dim);
    for (i, coefs) in coefficients.iter().enumerate() {
        let point = query.row(i) * coefs;
        curve.set_row(i, &point);
    }

    Ok(curve)
}
