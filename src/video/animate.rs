//! The sequential frame-render-encode loop.

use std::path::PathBuf;

use plotters::prelude::*;

use super::{FrameSink, VideoError};
use crate::render::{FramePlot, RenderError};

/// Output directory, frame rate, and raster size of an animation run.
#[derive(Clone, Debug)]
pub struct AnimationConfig {
    /// Run directory; frame images land in `<out_dir>/frames/`.
    pub out_dir: PathBuf,
    /// Container frame rate in frames per second.
    pub fps: u32,
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
}

impl AnimationConfig {
    /// Config with the defaults: 10 fps, 800x800 pixels.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            fps: 10,
            width: 800,
            height: 800,
        }
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Completion record of an animation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationSummary {
    /// Frame images written.
    pub frames: usize,
    /// Frames the sink reported on finalization.
    pub video_frames: usize,
}

/// Render every frame of `plot`, persist each as a zero-padded PNG under
/// `<out_dir>/frames/`, and append it to `sink` in strict index order.
///
/// The sink is started with the raster dimensions once the first frame
/// exists and finalized after the last; an empty plot is a no-op and the
/// sink is never started, so no container file appears. Frame files are
/// overwritten on re-runs, never duplicated.
pub fn render_animation<P: FramePlot, S: FrameSink>(
    plot: &P,
    config: &AnimationConfig,
    sink: &mut S,
) -> Result<AnimationSummary, VideoError> {
    let n = plot.frame_count();
    if n == 0 {
        log::info!("animation has no frames, skipping");
        return Ok(AnimationSummary {
            frames: 0,
            video_frames: 0,
        });
    }

    let frames_dir = config.out_dir.join("frames");
    std::fs::create_dir_all(&frames_dir)?;

    let (width, height) = (config.width, config.height);
    let mut rgb = vec![0u8; width as usize * height as usize * 3];
    let mut bgr = vec![0u8; rgb.len()];
    log::info!("rendering {} frames into {}", n, frames_dir.display());

    for i in 0..n {
        {
            let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(RenderError::draw_err)?;
            plot.draw(i, &root)?;
            root.present().map_err(RenderError::draw_err)?;
        }

        let frame_path = frames_dir.join(format!("frame_{i:08}.png"));
        image::save_buffer(&frame_path, &rgb, width, height, image::ColorType::Rgb8)?;

        if i == 0 {
            sink.start(width, height)?;
        }
        for (dst, src) in bgr.chunks_exact_mut(3).zip(rgb.chunks_exact(3)) {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
        }
        sink.write_frame(&bgr)?;
        log::debug!("rendered frame {}/{}", i + 1, n);
    }

    let video_frames = sink.finish()?;
    Ok(AnimationSummary {
        frames: n,
        video_frames,
    })
}
