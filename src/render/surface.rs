//! 3D surface views of the surface elevation field.

use ndarray::Array2;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{check_frame_index, Colormap, FramePlot, RenderError};
use crate::field::{nearest_index, DomainGrid, FieldError, ScalarSequence};

/// Animated 3D surface of surface elevation, axes in km.
///
/// The color scale spans the global min/max over the whole sequence so
/// frames share one scale. The vertical range is fixed (default
/// `[-0.3, 0.7]` m) rather than tracking the data, so a rising surface
/// visibly moves instead of being renormalized every frame.
pub struct SurfaceAnimation<'a> {
    sequence: &'a ScalarSequence,
    colormap: Colormap,
    x_km: Vec<f64>,
    y_km: Vec<f64>,
    value_range: (f64, f64),
    z_range: (f64, f64),
}

impl<'a> SurfaceAnimation<'a> {
    /// Build the view, validating the sequence against the grid.
    pub fn new(grid: &DomainGrid, sequence: &'a ScalarSequence) -> Result<Self, FieldError> {
        sequence.validate_against(grid)?;
        let value_range = global_range(sequence);
        let x_km = grid.x_axis().iter().map(|v| v / 1000.0).collect();
        let y_km = grid.y_axis().iter().map(|v| v / 1000.0).collect();
        Ok(Self {
            sequence,
            colormap: Colormap::diverging(),
            x_km,
            y_km,
            value_range,
            z_range: (-0.3, 0.7),
        })
    }

    /// Override the fixed vertical display range (meters).
    pub fn with_z_range(mut self, min: f64, max: f64) -> Self {
        self.z_range = (min, max);
        self
    }

    /// The global color-scale bounds over the whole sequence.
    pub fn value_range(&self) -> (f64, f64) {
        self.value_range
    }
}

/// Color bounds over every snapshot in the sequence.
fn global_range(sequence: &ScalarSequence) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for frame in sequence.frames() {
        for &v in frame {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if lo > hi {
        (0.0, 0.0)
    } else {
        (lo, hi)
    }
}

impl FramePlot for SurfaceAnimation<'_> {
    fn frame_count(&self) -> usize {
        self.sequence.len()
    }

    fn draw(
        &self,
        index: usize,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
    ) -> Result<(), RenderError> {
        check_frame_index(index, self.sequence.len())?;
        let eta = self.sequence.frame(index);
        let minutes = index as f64 * self.sequence.dt() / 60.0;
        let title = format!("Surface elevation η(x,y,t) after t = {minutes:.4} minutes");

        let (x0, x1) = axis_range(&self.x_km);
        let (y0, y1) = axis_range(&self.y_km);
        let (z0, z1) = self.z_range;
        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .build_cartesian_3d(x0..x1, z0..z1, y0..y1)
            .map_err(RenderError::draw_err)?;
        chart
            .configure_axes()
            .draw()
            .map_err(RenderError::draw_err)?;

        let (vmin, vmax) = self.value_range;
        let (nx, ny) = eta.dim();
        chart
            .draw_series(
                SurfaceSeries::xoz(
                    self.x_km.iter().copied(),
                    self.y_km.iter().copied(),
                    |x, y| {
                        let i = nearest_index(x, x0, x1, nx);
                        let j = nearest_index(y, y0, y1, ny);
                        eta[[i, j]]
                    },
                )
                .style_func(&|&h| self.colormap.sample(h, vmin, vmax).filled()),
            )
            .map_err(RenderError::draw_err)?;
        Ok(())
    }
}

fn axis_range(axis: &[f64]) -> (f64, f64) {
    match (axis.first(), axis.last()) {
        (Some(&a), Some(&b)) => (a.min(b), a.max(b)),
        _ => (0.0, 1.0),
    }
}

/// Write a single 3D surface figure of `eta` to `path`, axes in meters
/// with caller-supplied display limits.
pub fn surface_figure(
    path: impl AsRef<std::path::Path>,
    grid: &DomainGrid,
    eta: &Array2<f64>,
    x_lim: (f64, f64),
    y_lim: (f64, f64),
    z_lim: (f64, f64),
    size: (u32, u32),
) -> Result<(), RenderError> {
    if eta.dim() != grid.shape() {
        return Err(FieldError::GridMismatch {
            expected: grid.shape(),
            got: eta.dim(),
        }
        .into());
    }
    let root = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
    root.fill(&WHITE).map_err(RenderError::draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Surface elevation η", ("sans-serif", 20))
        .margin(10)
        .build_cartesian_3d(x_lim.0..x_lim.1, z_lim.0..z_lim.1, y_lim.0..y_lim.1)
        .map_err(RenderError::draw_err)?;
    chart
        .configure_axes()
        .draw()
        .map_err(RenderError::draw_err)?;

    let (vmin, vmax) = eta.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    let colormap = Colormap::turbo();
    let xs = grid.x_axis();
    let ys = grid.y_axis();
    let (gx0, gx1) = grid.x_range();
    let (gy0, gy1) = grid.y_range();
    let (nx, ny) = eta.dim();
    chart
        .draw_series(
            SurfaceSeries::xoz(xs.iter().copied(), ys.iter().copied(), |x, y| {
                let i = nearest_index(x, gx0, gx1, nx);
                let j = nearest_index(y, gy0, gy1, ny);
                eta[[i, j]]
            })
            .style_func(&|&h| colormap.sample(h, vmin, vmax).filled()),
        )
        .map_err(RenderError::draw_err)?;
    root.present().map_err(RenderError::draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn grid(nx: usize, ny: usize) -> DomainGrid {
        let x = Array2::from_shape_fn((nx, ny), |(i, _)| i as f64 * 1000.0);
        let y = Array2::from_shape_fn((nx, ny), |(_, j)| j as f64 * 1000.0);
        DomainGrid::new(x, y).unwrap()
    }

    #[test]
    fn test_global_color_scale() {
        let frames = vec![
            Array2::from_elem((3, 3), -5.0),
            Array2::from_elem((3, 3), 0.0),
            Array2::from_elem((3, 3), 7.0),
        ];
        let seq = ScalarSequence::new(frames, 1.0).unwrap();
        let g = grid(3, 3);
        let plot = SurfaceAnimation::new(&g, &seq).unwrap();
        assert_eq!(plot.value_range(), (-5.0, 7.0));
    }

    #[test]
    fn test_axes_converted_to_km() {
        let g = grid(3, 3);
        let seq = ScalarSequence::new(vec![Array2::zeros((3, 3))], 1.0).unwrap();
        let plot = SurfaceAnimation::new(&g, &seq).unwrap();
        assert_eq!(plot.x_km, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_z_range_override() {
        let g = grid(3, 3);
        let seq = ScalarSequence::new(vec![Array2::zeros((3, 3))], 1.0).unwrap();
        let plot = SurfaceAnimation::new(&g, &seq).unwrap().with_z_range(-1.0, 1.0);
        assert_eq!(plot.z_range, (-1.0, 1.0));
    }
}
