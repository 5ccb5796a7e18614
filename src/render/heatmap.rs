//! Pcolormesh-style heatmaps of the surface elevation field.

use ndarray::Array2;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{check_frame_index, Colormap, FramePlot, RenderError};
use crate::field::{DomainGrid, FieldError, ScalarSequence};

/// Animated heatmap of surface elevation over the domain grid.
///
/// Color bounds follow the original tooling: they are computed once from
/// the mid-sequence snapshot as `vmax = max|eta_mid|`, `vmin = -0.7 * vmax`.
/// Frames with values outside that range clip rather than rescale.
pub struct HeatmapAnimation<'a> {
    grid: &'a DomainGrid,
    sequence: &'a ScalarSequence,
    colormap: Colormap,
    value_range: (f64, f64),
}

impl<'a> HeatmapAnimation<'a> {
    /// Build the view, validating the sequence against the grid.
    pub fn new(grid: &'a DomainGrid, sequence: &'a ScalarSequence) -> Result<Self, FieldError> {
        sequence.validate_against(grid)?;
        let value_range = mid_sequence_range(sequence);
        Ok(Self {
            grid,
            sequence,
            colormap: Colormap::diverging(),
            value_range,
        })
    }

    /// The fixed color-scale bounds used for every frame.
    pub fn value_range(&self) -> (f64, f64) {
        self.value_range
    }
}

/// Color bounds from the representative mid-sequence snapshot.
fn mid_sequence_range(sequence: &ScalarSequence) -> (f64, f64) {
    let Some(mid) = sequence.mid_frame() else {
        return (0.0, 0.0);
    };
    let vmax = mid.iter().map(|v| v.abs()).fold(0.0_f64, f64::max);
    (-0.7 * vmax, vmax)
}

impl FramePlot for HeatmapAnimation<'_> {
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
        let title = format!("Surface elevation η after t = {minutes:.4} minutes");

        let (x0, x1) = self.grid.x_range();
        let (y0, y1) = self.grid.y_range();
        let mut chart = ChartBuilder::on(area)
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

        let (vmin, vmax) = self.value_range;
        draw_cells(&mut chart, self.grid, eta, &self.colormap, vmin, vmax)
    }
}

/// One colored rectangle per grid cell, corners taken from the meshgrid.
fn draw_cells<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    grid: &DomainGrid,
    values: &Array2<f64>,
    colormap: &Colormap,
    vmin: f64,
    vmax: f64,
) -> Result<(), RenderError> {
    let (nx, ny) = grid.shape();
    let x = grid.x();
    let y = grid.y();
    chart
        .draw_series(
            (0..nx.saturating_sub(1))
                .flat_map(|i| (0..ny.saturating_sub(1)).map(move |j| (i, j)))
                .map(|(i, j)| {
                    let color = colormap.sample(values[[i, j]], vmin, vmax);
                    Rectangle::new(
                        [
                            (x[[i, j]], y[[i, j]]),
                            (x[[i + 1, j + 1]], y[[i + 1, j + 1]]),
                        ],
                        color.filled(),
                    )
                }),
        )
        .map_err(RenderError::draw_err)?;
    Ok(())
}

/// Write a single heatmap figure of `eta` to `path`.
///
/// Color bounds span the data range of this snapshot alone.
pub fn heatmap_figure(
    path: impl AsRef<std::path::Path>,
    grid: &DomainGrid,
    eta: &Array2<f64>,
    title: &str,
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

    let (vmin, vmax) = eta.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    draw_cells(&mut chart, grid, eta, &Colormap::diverging(), vmin, vmax)?;
    root.present().map_err(RenderError::draw_err)?;
    Ok(())
}
