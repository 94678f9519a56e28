//! Plotting support for fitted curves, using the `plotters` crate
//!
//! Everything is coerced to `f64` for plotting purposes, and rendered with
//! the bitmap backend into PNG files.
//!
//! Curves are drawn as planar projections: the first two output dimensions
//! when there are at least two, otherwise the query grid against the single
//! output dimension.

use std::path::Path;

use nalgebra::DMatrix;
use plotters::prelude::*;

use crate::{
    fit::LocalFit,
    value::{linspace, Value},
};

pub use plotters;

/// Errors that can occur while rendering a plot.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// The backend failed to draw.
    #[error("Failed to draw plot: {0}")]
    Draw(String),

    /// A value could not be represented as `f64` for plotting.
    #[error("Failed to cast value for plotting")]
    Cast,
}

/// Options controlling plot appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotOptions {
    /// Caption drawn above the chart.
    pub title: String,

    /// Output image size in pixels, `(width, height)`.
    pub size: (u32, u32),
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: "Smoothed fit".to_string(),
            size: (800, 600),
        }
    }
}

/// Renders input points and one or more fitted curves to a PNG file.
///
/// `data` are the raw observations the fits were computed from; each entry of
/// `fits` is a legend label and a fit to overlay. All series share the same
/// planar projection.
///
/// # Errors
/// Returns [`PlotError::Draw`] if the backend fails, or [`PlotError::Cast`]
/// if a value cannot be represented as `f64`.
pub fn plot_fits<T: Value>(
    path: impl AsRef<Path>,
    data: &DMatrix<T>,
    fits: &[(&str, &LocalFit<T>)],
    options: &PlotOptions,
) -> Result<(), PlotError> {
    let mut series = Vec::with_capacity(fits.len());
    for (label, fit) in fits {
        series.push((*label, project(fit.grid(), fit.curve())?));
    }
    let points = project_data(data, fits)?;

    let (mut x_range, mut y_range) = bounds(points.iter().copied());
    for (_, curve) in &series {
        let (xr, yr) = bounds(curve.iter().copied());
        x_range = (x_range.0.min(xr.0), x_range.1.max(xr.1));
        y_range = (y_range.0.min(yr.0), y_range.1.max(yr.1));
    }
    let (x_range, y_range) = (pad(x_range), pad(y_range));

    let root = BitMapBackend::new(path.as_ref(), options.size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(draw_error)?;
    chart.configure_mesh().draw().map_err(draw_error)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, BLACK.filled())),
        )
        .map_err(draw_error)?;

    for (i, (label, curve)) in series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(curve.iter().copied(), &color))
            .map_err(draw_error)?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_error)?;
    root.present().map_err(draw_error)?;

    Ok(())
}

fn draw_error(e: impl std::fmt::Display) -> PlotError {
    PlotError::Draw(e.to_string())
}

/// Projects a grid/curve pair onto the drawing plane.
///
/// Two or more output dimensions plot as `(curve[0], curve[1])`; a single
/// output dimension plots against the first grid dimension.
fn project<T: Value>(grid: &DMatrix<T>, curve: &DMatrix<T>) -> Result<Vec<(f64, f64)>, PlotError> {
    let mut out = Vec::with_capacity(curve.nrows());
    for i in 0..curve.nrows() {
        let (x, y) = if curve.ncols() >= 2 {
            (curve[(i, 0)], curve[(i, 1)])
        } else {
            (grid[(i, 0)], curve[(i, 0)])
        };
        out.push((as_f64(x)?, as_f64(y)?));
    }
    Ok(out)
}

/// Projects the raw observations the same way as the curves.
///
/// With a single output dimension, observations are spread evenly over the
/// first fit's grid extent, matching the implicit domain of [`LocalFit::new`].
fn project_data<T: Value>(
    data: &DMatrix<T>,
    fits: &[(&str, &LocalFit<T>)],
) -> Result<Vec<(f64, f64)>, PlotError> {
    if data.ncols() >= 2 {
        let mut out = Vec::with_capacity(data.nrows());
        for i in 0..data.nrows() {
            out.push((as_f64(data[(i, 0)])?, as_f64(data[(i, 1)])?));
        }
        return Ok(out);
    }

    let (lo, hi) = fits.first().map_or((T::zero(), T::one()), |(_, fit)| {
        let grid = fit.grid();
        if grid.nrows() == 0 {
            (T::zero(), T::one())
        } else {
            (grid[(0, 0)], grid[(grid.nrows() - 1, 0)])
        }
    });

    let xs = linspace(lo, hi, data.nrows());
    let mut out = Vec::with_capacity(data.nrows());
    for (i, x) in xs.into_iter().enumerate() {
        out.push((as_f64(x)?, as_f64(data[(i, 0)])?));
    }
    Ok(out)
}

fn as_f64<T: Value>(v: T) -> Result<f64, PlotError> {
    num_traits::cast(v).ok_or(PlotError::Cast)
}

fn bounds(points: impl Iterator<Item = (f64, f64)>) -> ((f64, f64), (f64, f64)) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for (px, py) in points {
        x = (x.0.min(px), x.1.max(px));
        y = (y.0.min(py), y.1.max(py));
    }
    (x, y)
}

fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = (hi - lo).max(1e-9);
    (lo - 0.05 * span, hi + 0.05 * span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_projection_uses_first_two_outputs() {
        let grid = DMatrix::from_row_slice(2, 1, &[0.0, 1.0]);
        let curve = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let p = project(&grid, &curve).unwrap();
        assert_eq!(p, vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_single_output_projects_against_grid() {
        let grid = DMatrix::from_row_slice(2, 1, &[0.0, 1.0]);
        let curve = DMatrix::from_row_slice(2, 1, &[5.0, 6.0]);
        let p = project(&grid, &curve).unwrap();
        assert_eq!(p, vec![(0.0, 5.0), (1.0, 6.0)]);
    }

    #[test]
    fn test_padded_bounds() {
        let (lo, hi) = pad((0.0, 10.0));
        assert!(lo < 0.0 && hi > 10.0);

        // Degenerate ranges still produce a drawable span
        let (lo, hi) = pad((2.0, 2.0));
        assert!(lo < hi);

        assert_eq!(pad((f64::INFINITY, f64::NEG_INFINITY)), (0.0, 1.0));
    }
}
