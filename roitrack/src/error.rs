//! Error types for the ROI tracking library

use thiserror::Error;

/// Result type alias for the tracking library
pub type Result<T> = std::result::Result<T, TrackError>;

/// Errors raised while selecting, creating or driving trackers
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Invalid tracking algorithm name: {0}")]
    UnknownAlgorithm(String),

    #[error("Multi-tracker already holds {0} objects")]
    AlreadyInitialized(usize),

    #[error("Got {trackers} trackers for {rois} regions")]
    RoiCountMismatch { trackers: usize, rois: usize },

    #[error("No regions of interest to track")]
    NoRegions,

    #[error("Tracker backend error: {0}")]
    Backend(String),
}

impl TrackError {
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }
}
