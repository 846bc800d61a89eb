//! Display sink abstraction.
//!
//! The fetch loop hands each resolved frame to a [`DisplaySink`]. The
//! hardware target pushes decoded tiles to a TFT panel; on a desktop the
//! [`FrameSink`] decodes the JPEG and writes the current frame to disk.

use crate::cache::Timestamp;
use image::ImageFormat;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Display-related errors.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The frame could not be decoded as a JPEG
    #[error("failed to decode frame {key}: {reason}")]
    Decode { key: Timestamp, reason: String },

    /// Writing the rendered frame failed
    #[error("display I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Accepts whole-image JPEG blobs to decode and draw.
pub trait DisplaySink {
    /// Present one frame. Callers treat a failure as a skipped frame,
    /// never as fatal.
    fn present(&mut self, key: &Timestamp, jpeg: &[u8]) -> Result<(), DisplayError>;
}

/// Sink that discards every frame.
///
/// Useful for cache warm-up runs and tests where no display is attached.
#[derive(Debug, Clone, Default)]
pub struct NoOpSink;

impl DisplaySink for NoOpSink {
    fn present(&mut self, _key: &Timestamp, _jpeg: &[u8]) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Sink that decodes each frame and writes it to a fixed output path.
///
/// Successive frames overwrite the same file, so the path always holds
/// the most recently presented image. Pointing a viewer at it gives the
/// replay animation.
#[derive(Debug)]
pub struct FrameSink {
    output: PathBuf,
    frames_presented: u64,
}

impl FrameSink {
    /// Create a sink rendering to `output`. The extension selects the
    /// encoder (`.png` is the usual choice).
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            frames_presented: 0,
        }
    }

    /// Number of frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl DisplaySink for FrameSink {
    fn present(&mut self, key: &Timestamp, jpeg: &[u8]) -> Result<(), DisplayError> {
        let frame = image::load_from_memory_with_format(jpeg, ImageFormat::Jpeg).map_err(|e| {
            DisplayError::Decode {
                key: key.clone(),
                reason: e.to_string(),
            }
        })?;

        frame.save(&self.output).map_err(|e| DisplayError::Decode {
            key: key.clone(),
            reason: e.to_string(),
        })?;

        self.frames_presented += 1;
        debug!(key = %key, output = %self.output.display(), "frame presented");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn tiny_jpeg() -> Vec<u8> {
        let img = RgbImage::from_pixel(4, 4, image::Rgb([120, 180, 240]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Jpeg).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_noop_sink_accepts_anything() {
        let mut sink = NoOpSink;
        assert!(sink.present(&Timestamp::new("20250109-0630"), &[1, 2, 3]).is_ok());
    }

    #[test]
    fn test_frame_sink_writes_output() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("frame.png");
        let mut sink = FrameSink::new(&out);

        sink.present(&Timestamp::new("20250109-0630"), &tiny_jpeg())
            .unwrap();

        assert!(out.exists());
        assert_eq!(sink.frames_presented(), 1);
    }

    #[test]
    fn test_frame_sink_overwrites_previous_frame() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("frame.png");
        let mut sink = FrameSink::new(&out);

        sink.present(&Timestamp::new("20250109-0600"), &tiny_jpeg())
            .unwrap();
        sink.present(&Timestamp::new("20250109-0630"), &tiny_jpeg())
            .unwrap();

        assert_eq!(sink.frames_presented(), 2);
    }

    #[test]
    fn test_frame_sink_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let mut sink = FrameSink::new(temp.path().join("frame.png"));

        let result = sink.present(&Timestamp::new("20250109-0630"), b"not a jpeg");

        assert!(matches!(result, Err(DisplayError::Decode { .. })));
        assert_eq!(sink.frames_presented(), 0);
    }
}
