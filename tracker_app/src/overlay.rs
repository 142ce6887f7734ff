//! Frame annotation layout
//!
//! Describes what has to be drawn on a tracked frame without touching any
//! pixels; the display backend turns [`Annotation`]s into draw calls.

use roitrack::{MultiTracker, Roi, TrackStatus, TrackerAlgorithm};

/// Color in BGR channel order (OpenCV's native layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

/// A single draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Rect {
        roi: Roi,
        color: Bgr,
        thickness: i32,
        line_type: i32,
    },
    Text {
        text: String,
        /// Bottom-left corner of the text
        origin: (i32, i32),
        color: Bgr,
        scale: f64,
        thickness: i32,
    },
}

/// Colors, positions and font settings of the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub box_color: Bgr,
    pub box_thickness: i32,
    pub box_line_type: i32,
    pub info_color: Bgr,
    pub failure_color: Bgr,
    pub font_scale: f64,
    pub font_thickness: i32,
    pub algorithm_origin: (i32, i32),
    pub fps_origin: (i32, i32),
    pub failure_origin: (i32, i32),
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            box_color: Bgr::new(255, 0, 0),
            box_thickness: 2,
            box_line_type: 1,
            info_color: Bgr::new(50, 170, 50),
            failure_color: Bgr::new(0, 0, 255),
            font_scale: 0.75,
            font_thickness: 2,
            algorithm_origin: (100, 20),
            fps_origin: (100, 50),
            failure_origin: (100, 80),
        }
    }
}

pub const FAILURE_TEXT: &str = "Tracking failure detected";

/// Builds the per-frame annotation list
#[derive(Debug, Clone)]
pub struct Overlay {
    algorithm: TrackerAlgorithm,
    style: OverlayStyle,
}

impl Overlay {
    pub fn new(algorithm: TrackerAlgorithm) -> Self {
        Self::with_style(algorithm, OverlayStyle::default())
    }

    pub fn with_style(algorithm: TrackerAlgorithm, style: OverlayStyle) -> Self {
        Self { algorithm, style }
    }

    /// Annotations for one frame
    ///
    /// Boxes are emitted for every object located on this frame; lost
    /// objects are skipped and `all_tracked == false` adds the failure notice.
    pub fn annotate<F>(
        &self,
        multi: &MultiTracker<F>,
        all_tracked: bool,
        fps: f64,
    ) -> Vec<Annotation> {
        let mut annotations = self.object_annotations(multi, all_tracked);
        annotations.extend(self.info_annotations(fps));
        annotations
    }

    /// Tracked boxes plus the failure notice when an object was lost
    pub fn object_annotations<F>(
        &self,
        multi: &MultiTracker<F>,
        all_tracked: bool,
    ) -> Vec<Annotation> {
        let mut annotations: Vec<Annotation> = multi
            .iter()
            .filter(|(_, status)| *status == TrackStatus::Tracked)
            .map(|(roi, _)| self.box_annotation(roi))
            .collect();

        if !all_tracked {
            annotations.push(self.text(
                FAILURE_TEXT.to_string(),
                self.style.failure_origin,
                self.style.failure_color,
            ));
        }
        annotations
    }

    /// Algorithm label and FPS readout
    pub fn info_annotations(&self, fps: f64) -> [Annotation; 2] {
        [
            self.text(
                format!("{} Tracker", self.algorithm),
                self.style.algorithm_origin,
                self.style.info_color,
            ),
            self.text(fps_label(fps), self.style.fps_origin, self.style.info_color),
        ]
    }

    fn box_annotation(&self, roi: Roi) -> Annotation {
        Annotation::Rect {
            roi,
            color: self.style.box_color,
            thickness: self.style.box_thickness,
            line_type: self.style.box_line_type,
        }
    }

    fn text(&self, text: String, origin: (i32, i32), color: Bgr) -> Annotation {
        Annotation::Text {
            text,
            origin,
            color,
            scale: self.style.font_scale,
            thickness: self.style.font_thickness,
        }
    }
}

/// FPS label, truncated to a whole number
pub fn fps_label(fps: f64) -> String {
    let whole = if fps.is_finite() { fps.trunc() as i64 } else { 0 };
    format!("FPS : {}", whole)
}
