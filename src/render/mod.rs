//! Stateless rasterizers for model output.
//!
//! This module provides:
//! - **Animated views**: [`HeatmapAnimation`], [`QuiverAnimation`],
//!   [`SurfaceAnimation`] — immutable per-sequence descriptors that draw
//!   any frame on demand through the [`FramePlot`] trait
//! - **Static figures**: surface, colormap, quiver, Hovmüller, and a
//!   combined time-series + spectrum panel
//! - **Color mapping**: [`Colormap`] over `colorgrad` preset gradients
//!
//! Animated views hold no mutable state: frame `i` is rendered from the
//! descriptor and the snapshot alone, so frames cannot leak state into
//! each other.
//!
//! # Example
//!
//! ```ignore
//! use swe_viz::render::HeatmapAnimation;
//! use swe_viz::video::{render_animation, AnimationConfig, Mp4Writer};
//!
//! let plot = HeatmapAnimation::new(&grid, &eta)?;
//! let config = AnimationConfig::new("out").with_fps(10);
//! let mut sink = Mp4Writer::new("out/video.mp4", 10);
//! render_animation(&plot, &config, &mut sink)?;
//! ```

mod colormap;
mod heatmap;
mod hovmuller;
mod quiver;
mod spectrum;
mod surface;

pub use colormap::Colormap;
pub use heatmap::{heatmap_figure, HeatmapAnimation};
pub use hovmuller::hovmuller_figure;
pub use quiver::{quiver_figure, QuiverAnimation};
pub use spectrum::timeseries_spectrum_figure;
pub use surface::{surface_figure, SurfaceAnimation};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use thiserror::Error;

use crate::field::FieldError;

/// Error type for rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// I/O error while writing a figure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input arrays.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Frame index past the end of the sequence.
    #[error("frame index {index} out of range for {frames} frames")]
    FrameOutOfRange { index: usize, frames: usize },

    /// Backend drawing failure. The plotters error type is generic over
    /// the backend, so it is carried as text.
    #[error("drawing failed: {0}")]
    Draw(String),

    /// Too few samples to compute a spectrum.
    #[error("signal too short for spectrum plot: {0} samples")]
    SignalTooShort(usize),
}

impl RenderError {
    pub(crate) fn draw_err<E>(e: DrawingAreaErrorKind<E>) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        RenderError::Draw(e.to_string())
    }
}

/// A view that can rasterize any frame of a sequence into a drawing area.
///
/// Implementors are immutable; `draw` may be called for indices in any
/// order and must not depend on previous calls.
pub trait FramePlot {
    /// Number of frames this view can produce.
    fn frame_count(&self) -> usize;

    /// Draw frame `index` onto `area`.
    fn draw(
        &self,
        index: usize,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
    ) -> Result<(), RenderError>;
}

pub(crate) fn check_frame_index(index: usize, frames: usize) -> Result<(), RenderError> {
    if index >= frames {
        return Err(RenderError::FrameOutOfRange { index, frames });
    }
    Ok(())
}
