//! Error types for smoothed local regression
//!
//! This module defines the common errors encountered when fitting a curve,
//! along with a convenient `Result` alias.

/// Errors that can occur while fitting a curve.
///
/// Precondition violations (bad shapes, bad parameters) are reported through
/// these variants and terminate the call immediately. A singular moment matrix
/// at an individual position is *not* an error: it is recovered locally with a
/// pseudo-inverse and reported on the fit result instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cannot fit a curve because there is no data.
    #[error("No data available for fitting")]
    NoData,

    /// Two sequences that must cover the same positions have different lengths.
    ///
    /// Usually the domain and target matrices disagree on row count.
    #[error("Sequence length mismatch: expected {expected} rows, found {found}")]
    ShapeMismatch {
        /// Expected number of rows
        expected: usize,
        /// Number of rows actually found
        found: usize,
    },

    /// The smoothing standard deviation must be strictly positive.
    ///
    /// A non-positive sigma would degenerate the Gaussian kernel to a point
    /// mass (or worse), so it is rejected up front.
    #[error("Smoothing standard deviation must be positive, got {0}")]
    InvalidSigma(String),

    /// The resolution factor must be at least 1.
    #[error("Resolution factor must be at least 1")]
    InvalidResolution,

    /// A numeric value could not be cast to the target type. This is usually a custom type much smaller than f64/f32
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// Failed to solve the algebraic system during fitting.
    ///
    /// Contains a static string describing the solver error.
    #[error("Failed to solve: {0}")]
    Algebra(&'static str),
}

/// Result type for the curve fitting
pub type Result<T> = std::result::Result<T, Error>;
