//! Interactive multi-object tracking
//!
//! The user draws regions on the first frame of a camera or video stream;
//! each region gets an OpenCV tracker and the annotated stream is shown
//! live with the algorithm name and measured frame rate.

pub mod config;
pub mod error;
pub mod overlay;
pub mod session;
pub mod source;

#[cfg(feature = "opencv")]
pub mod cv;

pub use config::{AppConfig, Cli};
pub use error::{AppError, Result};
pub use overlay::{Annotation, Bgr, Overlay, OverlayStyle};
pub use session::{
    Display, FrameSource, RoiSelector, Session, SessionOutcome, SessionSettings,
};
pub use source::VideoSource;

/// Get library version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Names of the tracking algorithms that can be selected
pub fn algorithm_names() -> Vec<&'static str> {
    roitrack::TrackerAlgorithm::ALL
        .iter()
        .map(|alg| alg.name())
        .collect()
}
