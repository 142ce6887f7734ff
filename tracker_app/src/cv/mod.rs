//! OpenCV backend: capture, tracker construction and highgui display

mod capture;
mod trackers;
mod window;

pub use capture::CvCapture;
pub use trackers::{from_cv_rect, to_cv_rect, CvTracker, CvTrackerFactory};
pub use window::CvWindow;
