//! Multi-object tracker aggregate
//!
//! Groups one single-object tracker per region of interest. Every tracker in
//! the aggregate runs the same algorithm, and the set of tracked objects is
//! fixed once [`MultiTracker::add`] has succeeded.

use crate::algorithm::TrackerAlgorithm;
use crate::bbox::Roi;
use crate::error::{Result, TrackError};
use crate::tracker::ObjectTracker;

/// Per-object tracking state after the latest update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStatus {
    Tracked,
    /// Target not found on the latest frame; the ROI holds its last known position
    Lost,
}

struct TrackedObject<F> {
    tracker: Box<dyn ObjectTracker<F>>,
    roi: Roi,
    status: TrackStatus,
}

pub struct MultiTracker<F> {
    algorithm: TrackerAlgorithm,
    objects: Vec<TrackedObject<F>>,
    /// number of update() calls since initialization
    pub n_steps: u32,
}

impl<F> MultiTracker<F> {
    pub fn new(algorithm: TrackerAlgorithm) -> Self {
        Self {
            algorithm,
            objects: Vec::new(),
            n_steps: 0,
        }
    }

    /// Initialize one tracker per region on `frame` and take ownership of them
    pub fn add(
        &mut self,
        trackers: Vec<Box<dyn ObjectTracker<F>>>,
        frame: &F,
        rois: &[Roi],
    ) -> Result<()> {
        if !self.objects.is_empty() {
            return Err(TrackError::AlreadyInitialized(self.objects.len()));
        }
        if trackers.len() != rois.len() {
            return Err(TrackError::RoiCountMismatch {
                trackers: trackers.len(),
                rois: rois.len(),
            });
        }
        if rois.is_empty() {
            return Err(TrackError::NoRegions);
        }

        let mut objects = Vec::with_capacity(rois.len());
        for (mut tracker, roi) in trackers.into_iter().zip(rois.iter().copied()) {
            if tracker.algorithm() != self.algorithm {
                log::warn!(
                    "Tracker for {} uses {} instead of {}",
                    roi,
                    tracker.algorithm(),
                    self.algorithm
                );
            }
            tracker.init(frame, roi)?;
            objects.push(TrackedObject {
                tracker,
                roi,
                status: TrackStatus::Tracked,
            });
        }

        log::info!(
            "Initialized {} {} trackers",
            objects.len(),
            self.algorithm
        );
        self.objects = objects;
        Ok(())
    }

    /// Update every tracker with a new frame
    ///
    /// Returns `true` only if all objects were located. Lost objects keep
    /// their previous ROI and may be recovered on later frames.
    pub fn update(&mut self, frame: &F) -> Result<bool> {
        let mut all_tracked = true;

        for object in &mut self.objects {
            match object.tracker.update(frame)? {
                Some(roi) => {
                    object.roi = roi;
                    object.status = TrackStatus::Tracked;
                }
                None => {
                    object.status = TrackStatus::Lost;
                    all_tracked = false;
                }
            }
        }

        self.n_steps += 1;
        Ok(all_tracked)
    }

    /// Current regions in insertion order
    pub fn objects(&self) -> Vec<Roi> {
        self.objects.iter().map(|o| o.roi).collect()
    }

    pub fn statuses(&self) -> Vec<TrackStatus> {
        self.objects.iter().map(|o| o.status).collect()
    }

    /// Regions paired with their status
    pub fn iter(&self) -> impl Iterator<Item = (Roi, TrackStatus)> + '_ {
        self.objects.iter().map(|o| (o.roi, o.status))
    }

    pub fn lost_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| o.status == TrackStatus::Lost)
            .count()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn algorithm(&self) -> TrackerAlgorithm {
        self.algorithm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Tracker replaying a fixed script of update results
    struct ScriptedTracker {
        algorithm: TrackerAlgorithm,
        script: VecDeque<Option<Roi>>,
    }

    impl ScriptedTracker {
        fn boxed(script: Vec<Option<Roi>>) -> Box<dyn ObjectTracker<()>> {
            Box::new(Self {
                algorithm: TrackerAlgorithm::Csrt,
                script: script.into(),
            })
        }
    }

    impl ObjectTracker<()> for ScriptedTracker {
        fn init(&mut self, _frame: &(), _roi: Roi) -> Result<()> {
            Ok(())
        }

        fn update(&mut self, _frame: &()) -> Result<Option<Roi>> {
            Ok(self.script.pop_front().flatten())
        }

        fn algorithm(&self) -> TrackerAlgorithm {
            self.algorithm
        }
    }

    struct FailingTracker;

    impl ObjectTracker<()> for FailingTracker {
        fn init(&mut self, _frame: &(), _roi: Roi) -> Result<()> {
            Ok(())
        }

        fn update(&mut self, _frame: &()) -> Result<Option<Roi>> {
            Err(TrackError::backend("model weights missing"))
        }

        fn algorithm(&self) -> TrackerAlgorithm {
            TrackerAlgorithm::Csrt
        }
    }

    fn roi(x: f64) -> Roi {
        Roi::new(x, 10.0, 20.0, 20.0)
    }

    #[test]
    fn test_add_and_update_all_tracked() {
        let mut multi = MultiTracker::new(TrackerAlgorithm::Csrt);
        let trackers = vec![
            ScriptedTracker::boxed(vec![Some(roi(1.0)), Some(roi(2.0))]),
            ScriptedTracker::boxed(vec![Some(roi(101.0)), Some(roi(102.0))]),
        ];
        multi.add(trackers, &(), &[roi(0.0), roi(100.0)]).unwrap();
        assert_eq!(multi.len(), 2);
        assert_eq!(multi.objects(), vec![roi(0.0), roi(100.0)]);

        assert!(multi.update(&()).unwrap());
        assert_eq!(multi.objects(), vec![roi(1.0), roi(101.0)]);
        assert!(multi.update(&()).unwrap());
        assert_eq!(multi.objects(), vec![roi(2.0), roi(102.0)]);
        assert_eq!(multi.n_steps, 2);
        assert_eq!(multi.lost_count(), 0);
    }

    #[test]
    fn test_lost_object_keeps_last_roi_and_recovers() {
        let mut multi = MultiTracker::new(TrackerAlgorithm::Csrt);
        let trackers = vec![
            ScriptedTracker::boxed(vec![Some(roi(1.0)), Some(roi(2.0)), Some(roi(3.0))]),
            ScriptedTracker::boxed(vec![Some(roi(51.0)), None, Some(roi(55.0))]),
        ];
        multi.add(trackers, &(), &[roi(0.0), roi(50.0)]).unwrap();

        assert!(multi.update(&()).unwrap());
        assert!(!multi.update(&()).unwrap());
        assert_eq!(multi.objects()[1], roi(51.0));
        assert_eq!(
            multi.statuses(),
            vec![TrackStatus::Tracked, TrackStatus::Lost]
        );
        assert_eq!(multi.lost_count(), 1);

        assert!(multi.update(&()).unwrap());
        assert_eq!(multi.objects()[1], roi(55.0));
        assert_eq!(multi.lost_count(), 0);
    }

    #[test]
    fn test_collection_is_fixed_after_add() {
        let mut multi = MultiTracker::new(TrackerAlgorithm::Csrt);
        multi
            .add(vec![ScriptedTracker::boxed(vec![])], &(), &[roi(0.0)])
            .unwrap();
        let err = multi
            .add(vec![ScriptedTracker::boxed(vec![])], &(), &[roi(5.0)])
            .unwrap_err();
        assert!(matches!(err, TrackError::AlreadyInitialized(1)));
        assert_eq!(multi.len(), 1);
    }

    #[test]
    fn test_add_rejects_mismatched_and_empty_inputs() {
        let mut multi: MultiTracker<()> = MultiTracker::new(TrackerAlgorithm::Kcf);
        let err = multi
            .add(vec![ScriptedTracker::boxed(vec![])], &(), &[roi(0.0), roi(1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            TrackError::RoiCountMismatch {
                trackers: 1,
                rois: 2
            }
        ));

        let err = multi.add(Vec::new(), &(), &[]).unwrap_err();
        assert!(matches!(err, TrackError::NoRegions));
        assert!(multi.is_empty());
    }

    #[test]
    fn test_backend_error_propagates() {
        let mut multi = MultiTracker::new(TrackerAlgorithm::Csrt);
        multi
            .add(
                vec![Box::new(FailingTracker) as Box<dyn ObjectTracker<()>>],
                &(),
                &[roi(0.0)],
            )
            .unwrap();
        assert!(matches!(multi.update(&()), Err(TrackError::Backend(_))));
    }
}
