//! Construction of OpenCV trackers by algorithm
//!
//! KCF, CSRT, MIL and GOTURN come from the current tracking API; TLD,
//! BOOSTING, MEDIAN_FLOW and MOSSE only exist in the legacy API, which works
//! with `Rect2d` boxes and reports init failures as `false`.

use opencv::{
    core::{Mat, Ptr, Rect, Rect2d},
    prelude::*,
    tracking::{
        legacy_Tracker, legacy_TrackerBoosting, legacy_TrackerBoosting_Params,
        legacy_TrackerMOSSE, legacy_TrackerMedianFlow, legacy_TrackerMedianFlow_Params,
        legacy_TrackerTLD, legacy_TrackerTLD_Params, TrackerCSRT, TrackerCSRT_Params, TrackerKCF,
        TrackerKCF_Params,
    },
    video::{Tracker, TrackerGOTURN, TrackerGOTURN_Params, TrackerMIL, TrackerMIL_Params},
};
use roitrack::{ObjectTracker, Roi, TrackError, TrackerAlgorithm, TrackerFactory};

fn backend_err(algorithm: TrackerAlgorithm, action: &str, e: opencv::Error) -> TrackError {
    TrackError::backend(format!("{} {} failed: {}", algorithm, action, e))
}

/// Round a region to the integer rectangle used by the current tracking API
pub fn to_cv_rect(roi: Roi) -> Rect {
    Rect::new(
        roi.x.round() as i32,
        roi.y.round() as i32,
        roi.width.round() as i32,
        roi.height.round() as i32,
    )
}

pub fn from_cv_rect(rect: Rect) -> Roi {
    Roi::new(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    )
}

fn to_cv_rect2d(roi: Roi) -> Rect2d {
    Rect2d::new(roi.x, roi.y, roi.width, roi.height)
}

fn from_cv_rect2d(rect: Rect2d) -> Roi {
    Roi::new(rect.x, rect.y, rect.width, rect.height)
}

enum Backend {
    Current(Ptr<Tracker>),
    Legacy(Ptr<legacy_Tracker>),
}

/// A single OpenCV tracker instance
pub struct CvTracker {
    algorithm: TrackerAlgorithm,
    backend: Backend,
}

impl CvTracker {
    pub fn new(algorithm: TrackerAlgorithm) -> roitrack::Result<Self> {
        let err = |e: opencv::Error| backend_err(algorithm, "create", e);

        let backend = match algorithm {
            TrackerAlgorithm::Kcf => {
                let params = TrackerKCF_Params::default().map_err(err)?;
                Backend::Current(TrackerKCF::create(params).map_err(err)?.into())
            }
            TrackerAlgorithm::Csrt => {
                let params = TrackerCSRT_Params::default().map_err(err)?;
                Backend::Current(TrackerCSRT::create(&params).map_err(err)?.into())
            }
            TrackerAlgorithm::Mil => {
                let params = TrackerMIL_Params::default().map_err(err)?;
                Backend::Current(TrackerMIL::create(params).map_err(err)?.into())
            }
            TrackerAlgorithm::Goturn => {
                let params = TrackerGOTURN_Params::default().map_err(err)?;
                Backend::Current(TrackerGOTURN::create(&params).map_err(err)?.into())
            }
            TrackerAlgorithm::Tld => {
                let params = legacy_TrackerTLD_Params::default().map_err(err)?;
                Backend::Legacy(legacy_TrackerTLD::create(&params).map_err(err)?.into())
            }
            TrackerAlgorithm::Boosting => {
                let params = legacy_TrackerBoosting_Params::default().map_err(err)?;
                Backend::Legacy(legacy_TrackerBoosting::create(&params).map_err(err)?.into())
            }
            TrackerAlgorithm::MedianFlow => {
                let params = legacy_TrackerMedianFlow_Params::default().map_err(err)?;
                Backend::Legacy(legacy_TrackerMedianFlow::create(&params).map_err(err)?.into())
            }
            TrackerAlgorithm::Mosse => {
                Backend::Legacy(legacy_TrackerMOSSE::create().map_err(err)?.into())
            }
        };

        log::debug!(
            "Created {} tracker ({} API)",
            algorithm,
            if algorithm.is_legacy() { "legacy" } else { "current" }
        );

        Ok(Self { algorithm, backend })
    }
}

impl ObjectTracker<Mat> for CvTracker {
    fn init(&mut self, frame: &Mat, roi: Roi) -> roitrack::Result<()> {
        let algorithm = self.algorithm;
        match &mut self.backend {
            Backend::Current(tracker) => tracker
                .init(frame, to_cv_rect(roi))
                .map_err(|e| backend_err(algorithm, "init", e)),
            Backend::Legacy(tracker) => {
                let ok = tracker
                    .init(frame, to_cv_rect2d(roi))
                    .map_err(|e| backend_err(algorithm, "init", e))?;
                if ok {
                    Ok(())
                } else {
                    Err(TrackError::backend(format!(
                        "{} tracker refused region {}",
                        algorithm, roi
                    )))
                }
            }
        }
    }

    /// Located boxes are clipped to the frame
    fn update(&mut self, frame: &Mat) -> roitrack::Result<Option<Roi>> {
        let algorithm = self.algorithm;
        let (width, height) = (frame.cols() as f64, frame.rows() as f64);
        let located = match &mut self.backend {
            Backend::Current(tracker) => {
                let mut rect = Rect::default();
                let found = tracker
                    .update(frame, &mut rect)
                    .map_err(|e| backend_err(algorithm, "update", e))?;
                found.then(|| from_cv_rect(rect))
            }
            Backend::Legacy(tracker) => {
                let mut rect = Rect2d::default();
                let found = tracker
                    .update(frame, &mut rect)
                    .map_err(|e| backend_err(algorithm, "update", e))?;
                found.then(|| from_cv_rect2d(rect))
            }
        };
        Ok(located.map(|roi| roi.clamp_to(width, height)))
    }

    fn algorithm(&self) -> TrackerAlgorithm {
        self.algorithm
    }
}

/// Creates [`CvTracker`]s for any supported algorithm
#[derive(Debug, Default, Clone, Copy)]
pub struct CvTrackerFactory;

impl CvTrackerFactory {
    pub fn new() -> Self {
        Self
    }
}

impl TrackerFactory<Mat> for CvTrackerFactory {
    fn create(&self, algorithm: TrackerAlgorithm) -> roitrack::Result<Box<dyn ObjectTracker<Mat>>> {
        Ok(Box::new(CvTracker::new(algorithm)?))
    }
}
