//! Frame capture from cameras, files and network streams

use crate::error::{AppError, Result};
use crate::session::FrameSource;
use crate::source::VideoSource;
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture, CAP_ANY},
};

/// OpenCV video capture opened once for the whole session
pub struct CvCapture {
    cap: VideoCapture,
    frames_read: u64,
}

impl CvCapture {
    /// Open a camera by index or a file / stream URL
    pub fn open(source: &VideoSource) -> Result<Self> {
        log::info!("Opening video source: {}", source);

        let cap = match source {
            VideoSource::Camera(index) => VideoCapture::new(*index, CAP_ANY),
            VideoSource::File(path) => VideoCapture::from_file(path, CAP_ANY),
        }
        .map_err(|e| AppError::unavailable(format!("Failed to open {}: {}", source, e)))?;

        let opened = cap
            .is_opened()
            .map_err(|e| AppError::unavailable(format!("{} check failed: {}", source, e)))?;
        if !opened {
            return Err(AppError::unavailable(format!("No video from {}", source)));
        }

        let width = cap.get(videoio::CAP_PROP_FRAME_WIDTH).unwrap_or(0.0) as i32;
        let height = cap.get(videoio::CAP_PROP_FRAME_HEIGHT).unwrap_or(0.0) as i32;
        let fps = cap.get(videoio::CAP_PROP_FPS).unwrap_or(0.0);
        log::info!("Video properties: {}x{} @ {:.2} FPS", width, height, fps);

        Ok(Self {
            cap,
            frames_read: 0,
        })
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl FrameSource<Mat> for CvCapture {
    fn read(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        let read_success = self
            .cap
            .read(&mut frame)
            .map_err(|e| AppError::backend(format!("Failed to read frame: {}", e)))?;

        if !read_success || frame.empty() {
            log::debug!("Capture exhausted after {} frames", self.frames_read);
            return Ok(None);
        }

        self.frames_read += 1;
        Ok(Some(frame))
    }
}
