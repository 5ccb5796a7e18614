//! Frame-render-encode pipeline.
//!
//! This module provides:
//! - [`FrameSink`]: ordered, append-only consumer of encoded frames
//! - [`Mp4Writer`]: sink backed by an external `ffmpeg` process
//! - [`render_animation`]: the sequential loop tying a
//!   [`FramePlot`](crate::render::FramePlot) to frame files and a sink
//!
//! The loop is strictly single-threaded: the video container is one
//! ordered append-only stream, so frames must arrive in index order.
//!
//! # Example
//!
//! ```ignore
//! use swe_viz::render::HeatmapAnimation;
//! use swe_viz::video::{render_animation, AnimationConfig, Mp4Writer};
//!
//! let plot = HeatmapAnimation::new(&grid, &eta)?;
//! let config = AnimationConfig::new("out").with_fps(10).with_size(800, 800);
//! let mut sink = Mp4Writer::new("out/video.mp4", config.fps);
//! let summary = render_animation(&plot, &config, &mut sink)?;
//! assert_eq!(summary.frames, eta.len());
//! ```

mod animate;
mod mp4;

pub use animate::{render_animation, AnimationConfig, AnimationSummary};
pub use mp4::Mp4Writer;

use thiserror::Error;

use crate::render::RenderError;

/// Error type for the frame-render-encode pipeline.
#[derive(Debug, Error)]
pub enum VideoError {
    /// I/O error while writing frames or talking to the encoder.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A frame failed to rasterize.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A frame image file could not be written.
    #[error("frame image error: {0}")]
    Image(#[from] image::ImageError),

    /// The external encoder failed.
    #[error("video encoder error: {0}")]
    Encoder(String),

    /// A frame's byte size disagrees with the dimensions the container
    /// was opened with. Fatal: the container cannot continue.
    #[error("frame has {got} bytes, expected {expected} for {width}x{height}")]
    FrameSize {
        expected: usize,
        got: usize,
        width: u32,
        height: u32,
    },

    /// A frame was appended before the sink was started.
    #[error("frame sink has not been started")]
    NotStarted,
}

/// An ordered, append-only consumer of BGR24 frames.
///
/// `start` is called exactly once, with the dimensions of the first
/// rasterized frame, before any `write_frame`. Implementations must
/// reject frames whose byte length disagrees with those dimensions.
pub trait FrameSink {
    /// Open the container for frames of the given size.
    fn start(&mut self, width: u32, height: u32) -> Result<(), VideoError>;

    /// Append one frame of packed BGR24 pixels.
    fn write_frame(&mut self, bgr: &[u8]) -> Result<(), VideoError>;

    /// Finalize the container; returns the number of frames written.
    fn finish(&mut self) -> Result<usize, VideoError>;
}
