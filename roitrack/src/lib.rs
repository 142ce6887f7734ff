//! Multi-ROI tracking plumbing
//!
//! This crate holds the parts of the tracking demo that do not depend on a
//! vision backend: the algorithm selection table, the multi-object tracker
//! aggregate and frame-rate metering. The trackers themselves are supplied
//! by a backend through the [`TrackerFactory`] trait.
//!
//! ```rust,ignore
//! use roitrack::{MultiTracker, TrackerAlgorithm, TrackerFactory};
//!
//! let algorithm: TrackerAlgorithm = "KCF".parse()?;
//! let trackers = factory.create_many(algorithm, rois.len())?;
//! let mut multi = MultiTracker::new(algorithm);
//! multi.add(trackers, &first_frame, &rois)?;
//! let all_found = multi.update(&next_frame)?;
//! ```

pub mod algorithm;
pub mod bbox;
pub mod error;
pub mod fps;
pub mod multi;
pub mod tracker;

pub use algorithm::TrackerAlgorithm;
pub use bbox::Roi;
pub use error::{Result, TrackError};
pub use fps::{FpsMeter, FrameStats};
pub use multi::{MultiTracker, TrackStatus};
pub use tracker::{ObjectTracker, TrackerFactory};
