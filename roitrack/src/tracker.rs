//! Single-object tracker interface
//!
//! The tracking computation itself lives in an external vision library.
//! These traits are the seam between the multi-object aggregate and that
//! library, generic over the frame type `F` the backend works on.

use crate::algorithm::TrackerAlgorithm;
use crate::bbox::Roi;
use crate::error::Result;

/// Common interface for single-object trackers
pub trait ObjectTracker<F> {
    /// Initialize the tracker on `frame` with the target at `roi`
    fn init(&mut self, frame: &F, roi: Roi) -> Result<()>;

    /// Locate the target in `frame`
    ///
    /// Returns `Ok(None)` when the tracker lost the target on this frame.
    fn update(&mut self, frame: &F) -> Result<Option<Roi>>;

    /// Algorithm backing this tracker
    fn algorithm(&self) -> TrackerAlgorithm;
}

/// Creates tracker instances for an algorithm
pub trait TrackerFactory<F> {
    fn create(&self, algorithm: TrackerAlgorithm) -> Result<Box<dyn ObjectTracker<F>>>;

    /// Create `count` trackers of the same algorithm
    fn create_many(
        &self,
        algorithm: TrackerAlgorithm,
        count: usize,
    ) -> Result<Vec<Box<dyn ObjectTracker<F>>>> {
        (0..count).map(|_| self.create(algorithm)).collect()
    }
}
