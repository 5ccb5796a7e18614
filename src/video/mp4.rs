//! MP4 output through an external `ffmpeg` process.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};

use super::{FrameSink, VideoError};

/// [`FrameSink`] that pipes raw BGR24 frames into `ffmpeg` and lets it
/// encode H.264 into an MP4 container.
///
/// The encoder is treated as a black box: spawning happens on `start`
/// (so an empty sequence never creates a file), frames stream over
/// stdin, and `finish` closes the pipe and waits for the process.
pub struct Mp4Writer {
    path: PathBuf,
    fps: u32,
    encoder: Option<Encoder>,
    frames: usize,
}

struct Encoder {
    child: Child,
    stdin: ChildStdin,
    frame_len: usize,
    width: u32,
    height: u32,
}

impl Mp4Writer {
    /// Create a writer targeting `path` at the given frame rate. No
    /// process is spawned until the first frame arrives.
    pub fn new(path: impl Into<PathBuf>, fps: u32) -> Self {
        Self {
            path: path.into(),
            fps,
            encoder: None,
            frames: 0,
        }
    }
}

impl FrameSink for Mp4Writer {
    fn start(&mut self, width: u32, height: u32) -> Result<(), VideoError> {
        let mut child = Command::new("ffmpeg")
            .args([
                "-y",
                "-f",
                "rawvideo",
                "-pixel_format",
                "bgr24",
                "-video_size",
                &format!("{width}x{height}"),
                "-framerate",
                &self.fps.to_string(),
                "-i",
                "-",
                "-an",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
            ])
            .arg(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| VideoError::Encoder(format!("failed to spawn ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| VideoError::Encoder("ffmpeg stdin unavailable".into()))?;
        self.encoder = Some(Encoder {
            child,
            stdin,
            frame_len: width as usize * height as usize * 3,
            width,
            height,
        });
        log::info!(
            "opened video container {} ({}x{} @ {} fps)",
            self.path.display(),
            width,
            height,
            self.fps
        );
        Ok(())
    }

    fn write_frame(&mut self, bgr: &[u8]) -> Result<(), VideoError> {
        let encoder = self.encoder.as_mut().ok_or(VideoError::NotStarted)?;
        if bgr.len() != encoder.frame_len {
            return Err(VideoError::FrameSize {
                expected: encoder.frame_len,
                got: bgr.len(),
                width: encoder.width,
                height: encoder.height,
            });
        }
        encoder.stdin.write_all(bgr)?;
        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<usize, VideoError> {
        let encoder = self.encoder.take().ok_or(VideoError::NotStarted)?;
        // Closing stdin signals end of stream to ffmpeg.
        drop(encoder.stdin);
        let mut child = encoder.child;
        let status = child.wait()?;
        if !status.success() {
            return Err(VideoError::Encoder(format!(
                "ffmpeg exited with {status}"
            )));
        }
        log::info!(
            "finalized {} with {} frames",
            self.path.display(),
            self.frames
        );
        Ok(self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_before_start_is_rejected() {
        let mut writer = Mp4Writer::new("/tmp/never-created.mp4", 10);
        let err = writer.write_frame(&[0u8; 12]).unwrap_err();
        assert!(matches!(err, VideoError::NotStarted));
    }

    #[test]
    fn test_finish_before_start_is_rejected() {
        let mut writer = Mp4Writer::new("/tmp/never-created.mp4", 10);
        assert!(matches!(writer.finish(), Err(VideoError::NotStarted)));
    }
}
