//! Quiver (arrow field) views of the velocity components.

use ndarray::Array2;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{check_frame_index, FramePlot, RenderError};
use crate::field::{DomainGrid, FieldError, VectorSequence};

/// Animated arrow field of the velocity components, axes in km.
///
/// Arrows are subsampled at a stride of `2%` of the smaller grid
/// dimension so dense grids stay readable.
pub struct QuiverAnimation<'a> {
    grid: &'a DomainGrid,
    sequence: &'a VectorSequence,
    stride: usize,
    arrow_scale: f64,
}

impl<'a> QuiverAnimation<'a> {
    /// Build the view, validating the sequence against the grid.
    pub fn new(grid: &'a DomainGrid, sequence: &'a VectorSequence) -> Result<Self, FieldError> {
        sequence.validate_against(grid)?;
        let (nx, ny) = grid.shape();
        let stride = ((0.02 * nx.min(ny) as f64) as usize).max(1);
        Ok(Self {
            grid,
            sequence,
            stride,
            arrow_scale: 2.0,
        })
    }

    /// Arrow length in axis units per unit velocity. Default 2.0.
    pub fn with_arrow_scale(mut self, scale: f64) -> Self {
        self.arrow_scale = scale;
        self
    }

    /// Subsampling stride between drawn arrows.
    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl FramePlot for QuiverAnimation<'_> {
    fn frame_count(&self) -> usize {
        self.sequence.len()
    }

    fn draw(
        &self,
        index: usize,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
    ) -> Result<(), RenderError> {
        check_frame_index(index, self.sequence.len())?;
        let (u, v) = self.sequence.frame(index);
        let minutes = index as f64 * self.sequence.dt() / 60.0;
        let title = format!("Velocity field u(x,y) after t = {minutes:.4} minutes");

        let (x0, x1) = self.grid.x_range();
        let (y0, y1) = self.grid.y_range();
        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x0 / 1000.0..x1 / 1000.0, y0 / 1000.0..y1 / 1000.0)
            .map_err(RenderError::draw_err)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("x [km]")
            .y_desc("y [km]")
            .draw()
            .map_err(RenderError::draw_err)?;

        draw_arrows(
            &mut chart,
            self.grid,
            u,
            v,
            self.stride,
            self.arrow_scale,
            1000.0,
        )
    }
}

/// Draw subsampled arrows; `unit` divides grid coordinates (1000 for km).
fn draw_arrows<DB: DrawingBackend>(
    chart: &mut ChartContext<
        '_,
        DB,
        plotters::coord::cartesian::Cartesian2d<
            plotters::coord::types::RangedCoordf64,
            plotters::coord::types::RangedCoordf64,
        >,
    >,
    grid: &DomainGrid,
    u: &Array2<f64>,
    v: &Array2<f64>,
    stride: usize,
    arrow_scale: f64,
    unit: f64,
) -> Result<(), RenderError> {
    let (nx, ny) = grid.shape();
    let x = grid.x();
    let y = grid.y();
    chart
        .draw_series(
            (0..nx)
                .step_by(stride)
                .flat_map(|i| (0..ny).step_by(stride).map(move |j| (i, j)))
                .map(|(i, j)| {
                    let base = (x[[i, j]] / unit, y[[i, j]] / unit);
                    let delta = (u[[i, j]] * arrow_scale, v[[i, j]] * arrow_scale);
                    PathElement::new(arrow_path(base, delta), BLACK.stroke_width(1))
                }),
        )
        .map_err(RenderError::draw_err)?;
    Ok(())
}

/// Polyline for one arrow: shaft plus a two-stroke head at the tip.
fn arrow_path(base: (f64, f64), delta: (f64, f64)) -> Vec<(f64, f64)> {
    let tip = (base.0 + delta.0, base.1 + delta.1);
    let len = delta.0.hypot(delta.1);
    if len == 0.0 {
        return vec![base, tip];
    }
    let head = 0.25 * len;
    let angle = delta.1.atan2(delta.0);
    let left = (
        tip.0 - head * (angle + 0.5).cos(),
        tip.1 - head * (angle + 0.5).sin(),
    );
    let right = (
        tip.0 - head * (angle - 0.5).cos(),
        tip.1 - head * (angle - 0.5).sin(),
    );
    vec![base, tip, left, tip, right]
}

/// Write a single quiver figure to `path`, axes in meters.
pub fn quiver_figure(
    path: impl AsRef<std::path::Path>,
    grid: &DomainGrid,
    u: &Array2<f64>,
    v: &Array2<f64>,
    title: &str,
    size: (u32, u32),
) -> Result<(), RenderError> {
    if u.dim() != grid.shape() || v.dim() != grid.shape() {
        return Err(FieldError::GridMismatch {
            expected: grid.shape(),
            got: if u.dim() != grid.shape() {
                u.dim()
            } else {
                v.dim()
            },
        }
        .into());
    }
    let root = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
    root.fill(&WHITE).map_err(RenderError::draw_err)?;

    let (x0, x1) = grid.x_range();
    let (y0, y1) = grid.y_range();
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(RenderError::draw_err)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x [m]")
        .y_desc("y [m]")
        .draw()
        .map_err(RenderError::draw_err)?;

    draw_arrows(&mut chart, grid, u, v, 4, 2.0, 1.0)?;
    root.present().map_err(RenderError::draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn grid(nx: usize, ny: usize) -> DomainGrid {
        let x = Array2::from_shape_fn((nx, ny), |(i, _)| i as f64);
        let y = Array2::from_shape_fn((nx, ny), |(_, j)| j as f64);
        DomainGrid::new(x, y).unwrap()
    }

    #[test]
    fn test_stride_floors_at_one() {
        let g = grid(10, 10);
        let seq =
            VectorSequence::new(vec![Array2::zeros((10, 10))], vec![Array2::zeros((10, 10))], 1.0)
                .unwrap();
        let plot = QuiverAnimation::new(&g, &seq).unwrap();
        assert_eq!(plot.stride(), 1);
    }

    #[test]
    fn test_stride_scales_with_grid() {
        let g = grid(200, 300);
        let seq = VectorSequence::new(
            vec![Array2::zeros((200, 300))],
            vec![Array2::zeros((200, 300))],
            1.0,
        )
        .unwrap();
        let plot = QuiverAnimation::new(&g, &seq).unwrap();
        assert_eq!(plot.stride(), 4);
    }

    #[test]
    fn test_arrow_path_has_head() {
        let path = arrow_path((0.0, 0.0), (1.0, 0.0));
        assert_eq!(path.len(), 5);
        assert_eq!(path[1], (1.0, 0.0));
        // Head strokes end behind the tip.
        assert!(path[2].0 < 1.0);
        assert!(path[4].0 < 1.0);
    }

    #[test]
    fn test_zero_velocity_arrow_degenerates() {
        let path = arrow_path((1.0, 2.0), (0.0, 0.0));
        assert_eq!(path, vec![(1.0, 2.0), (1.0, 2.0)]);
    }
}
