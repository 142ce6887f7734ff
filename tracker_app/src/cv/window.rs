//! highgui windows: region selection, annotated display and optional recording

use crate::config::AppConfig;
use crate::cv::trackers::{from_cv_rect, to_cv_rect};
use crate::error::{AppError, Result};
use crate::overlay::{Annotation, Bgr};
use crate::session::{Display, RoiSelector};
use opencv::{
    core::{Mat, Point, Rect, Scalar, Size, Vector},
    highgui, imgproc,
    prelude::*,
    videoio::VideoWriter,
};
use roitrack::Roi;

fn scalar(color: Bgr) -> Scalar {
    Scalar::new(color.b as f64, color.g as f64, color.r as f64, 0.0)
}

/// Draw annotations onto a BGR frame
pub fn draw_annotations(frame: &mut Mat, annotations: &[Annotation]) -> Result<()> {
    for annotation in annotations {
        match annotation {
            Annotation::Rect {
                roi,
                color,
                thickness,
                line_type,
            } => {
                imgproc::rectangle(frame, to_cv_rect(*roi), scalar(*color), *thickness, *line_type, 0)
                    .map_err(|e| AppError::backend(format!("Failed to draw {}: {}", roi, e)))?;
            }
            Annotation::Text {
                text,
                origin,
                color,
                scale,
                thickness,
            } => {
                imgproc::put_text(
                    frame,
                    text,
                    Point::new(origin.0, origin.1),
                    imgproc::FONT_HERSHEY_SIMPLEX,
                    *scale,
                    scalar(*color),
                    *thickness,
                    imgproc::LINE_8,
                    false,
                )
                .map_err(|e| AppError::backend(format!("Failed to draw text: {}", e)))?;
            }
        }
    }
    Ok(())
}

/// Selection and display windows of one tracking session
pub struct CvWindow {
    selection_window: String,
    display_window: String,
    record_path: Option<String>,
    record_fps: f64,
    writer: Option<VideoWriter>,
}

impl CvWindow {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            selection_window: config.selection_window.clone(),
            display_window: config.display_window.clone(),
            record_path: config.record.clone(),
            record_fps: config.record_fps,
            writer: None,
        }
    }

    /// Open the recorder on the first frame, sized to it
    fn record(&mut self, frame: &Mat) -> Result<()> {
        let Some(path) = &self.record_path else {
            return Ok(());
        };

        if self.writer.is_none() {
            let size = Size::new(frame.cols(), frame.rows());
            let fourcc = VideoWriter::fourcc('M', 'J', 'P', 'G')
                .map_err(|e| AppError::backend(format!("Invalid codec: {}", e)))?;
            let writer = VideoWriter::new(path, fourcc, self.record_fps, size, true)
                .map_err(|e| AppError::backend(format!("Failed to create {}: {}", path, e)))?;
            if !writer.is_opened().unwrap_or(false) {
                return Err(AppError::backend(format!("Cannot write video to {}", path)));
            }
            log::info!(
                "Recording {}x{} @ {:.1} FPS to {}",
                size.width,
                size.height,
                self.record_fps,
                path
            );
            self.writer = Some(writer);
        }

        if let Some(writer) = self.writer.as_mut() {
            writer
                .write(frame)
                .map_err(|e| AppError::backend(format!("Failed to write frame: {}", e)))?;
        }
        Ok(())
    }

    /// Close windows and finalize the recording
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .release()
                .map_err(|e| AppError::backend(format!("Failed to finalize recording: {}", e)))?;
        }
        highgui::destroy_all_windows()
            .map_err(|e| AppError::backend(format!("Failed to close windows: {}", e)))
    }
}

impl RoiSelector<Mat> for CvWindow {
    fn select(&mut self, frame: &Mat) -> Result<Vec<Roi>> {
        let mut boxes = Vector::<Rect>::new();
        highgui::select_rois_def(&self.selection_window, frame, &mut boxes)
            .map_err(|e| AppError::backend(format!("Region selection failed: {}", e)))?;

        if self.selection_window != self.display_window {
            if let Err(e) = highgui::destroy_window(&self.selection_window) {
                log::warn!(
                    "Failed to close selection window '{}': {}",
                    self.selection_window,
                    e
                );
            }
        }

        Ok(boxes.iter().map(from_cv_rect).collect())
    }
}

impl Display<Mat> for CvWindow {
    fn show(&mut self, frame: &mut Mat, annotations: &[Annotation]) -> Result<()> {
        draw_annotations(frame, annotations)?;
        self.record(frame)?;
        highgui::imshow(&self.display_window, &*frame)
            .map_err(|e| AppError::backend(format!("Failed to display frame: {}", e)))
    }

    fn poll_key(&mut self, delay_ms: i32) -> Result<Option<i32>> {
        let key = highgui::wait_key(delay_ms)
            .map_err(|e| AppError::backend(format!("Key poll failed: {}", e)))?;
        Ok((key >= 0).then_some(key & 0xFF))
    }
}
