//! Tracking session control loop
//!
//! One session runs the whole interaction: grab the first frame, let the
//! user pick regions, build one tracker per region and then update, annotate
//! and display every following frame until the stream ends or the user quits.
//! Capture, selection and display are traits so the loop runs unchanged on
//! OpenCV or on test doubles.

use crate::error::Result;
use crate::overlay::{Annotation, Overlay};
use roitrack::{FpsMeter, FrameStats, MultiTracker, Roi, TrackerAlgorithm, TrackerFactory};

pub const ESCAPE_KEY: i32 = 27;
pub const PAUSE_KEY: i32 = 'p' as i32;

/// Delay between key polls while paused (ms)
const PAUSE_POLL_MS: i32 = 100;

/// Produces frames from a camera, file or stream
pub trait FrameSource<F> {
    /// Next frame, `None` once the stream is exhausted
    fn read(&mut self) -> Result<Option<F>>;
}

/// Interactive region selection on the first frame
pub trait RoiSelector<F> {
    fn select(&mut self, frame: &F) -> Result<Vec<Roi>>;
}

/// Renders annotated frames and reports key presses
pub trait Display<F> {
    fn show(&mut self, frame: &mut F, annotations: &[Annotation]) -> Result<()>;

    /// Wait up to `delay_ms` for a key press
    fn poll_key(&mut self, delay_ms: i32) -> Result<Option<i32>>;
}

/// Loop parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub algorithm: TrackerAlgorithm,
    pub wait_ms: i32,
    pub progress_interval: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            algorithm: TrackerAlgorithm::default(),
            wait_ms: 33,
            progress_interval: 100,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The source did not deliver a first frame
    NoFrames,
    /// No region was selected; the tracking loop never started
    NoRegions,
    /// The stream ran out of frames
    Completed(FrameStats),
    /// The user pressed the exit key
    Stopped(FrameStats),
}

impl SessionOutcome {
    pub fn stats(&self) -> Option<&FrameStats> {
        match self {
            SessionOutcome::Completed(stats) | SessionOutcome::Stopped(stats) => Some(stats),
            _ => None,
        }
    }
}

pub struct Session<'a, F> {
    settings: SessionSettings,
    factory: &'a dyn TrackerFactory<F>,
}

impl<'a, F> Session<'a, F> {
    pub fn new(settings: SessionSettings, factory: &'a dyn TrackerFactory<F>) -> Self {
        Self { settings, factory }
    }

    pub fn run<S, U>(&self, source: &mut S, ui: &mut U) -> Result<SessionOutcome>
    where
        S: FrameSource<F> + ?Sized,
        U: RoiSelector<F> + Display<F> + ?Sized,
    {
        let Some(first_frame) = source.read()? else {
            log::warn!("Video source produced no frames");
            return Ok(SessionOutcome::NoFrames);
        };

        let rois = select_regions(ui, &first_frame)?;
        if rois.is_empty() {
            log::debug!("No regions selected, exiting");
            return Ok(SessionOutcome::NoRegions);
        }

        let algorithm = self.settings.algorithm;
        let trackers = self.factory.create_many(algorithm, rois.len())?;
        let mut multi = MultiTracker::new(algorithm);
        multi.add(trackers, &first_frame, &rois)?;
        drop(first_frame);

        let overlay = Overlay::new(algorithm);
        let mut meter = FpsMeter::new();

        loop {
            let Some(mut frame) = source.read()? else {
                let stats = meter.into_stats();
                log::info!("End of video stream after {} frames", stats.total_frames);
                return Ok(SessionOutcome::Completed(stats));
            };

            meter.start();
            let all_tracked = multi.update(&frame)?;
            let mut annotations = overlay.object_annotations(&multi, all_tracked);
            let fps = meter.stop();
            annotations.extend(overlay.info_annotations(fps));
            if !all_tracked {
                meter.record_failure();
                log::trace!(
                    "Frame {}: {} of {} objects lost",
                    meter.stats().total_frames,
                    multi.lost_count(),
                    multi.len()
                );
            }

            ui.show(&mut frame, &annotations)?;

            let frames = meter.stats().total_frames;
            if self.settings.progress_interval > 0 && frames % self.settings.progress_interval == 0 {
                log::debug!(
                    "Frame {}: {:.1} FPS | lost: {}/{}",
                    frames,
                    fps,
                    multi.lost_count(),
                    multi.len()
                );
            }

            match ui.poll_key(self.settings.wait_ms)? {
                Some(ESCAPE_KEY) => return Ok(SessionOutcome::Stopped(meter.into_stats())),
                Some(PAUSE_KEY) => {
                    log::info!("Paused, press 'p' to resume");
                    if !wait_for_resume::<F, U>(ui)? {
                        return Ok(SessionOutcome::Stopped(meter.into_stats()));
                    }
                }
                _ => {}
            }
        }
    }
}

/// Ask the user for regions, dropping degenerate rectangles
fn select_regions<F, U>(ui: &mut U, frame: &F) -> Result<Vec<Roi>>
where
    U: RoiSelector<F> + ?Sized,
{
    let selected = ui.select(frame)?;
    let total = selected.len();
    let rois: Vec<Roi> = selected.into_iter().filter(|roi| !roi.is_empty()).collect();

    if rois.len() < total {
        log::warn!("Ignoring {} empty region(s)", total - rois.len());
    }
    if !rois.is_empty() {
        log::info!("Selected {} region(s)", rois.len());
    }
    Ok(rois)
}

/// Block until the pause key is pressed again; `false` if the user quit instead
fn wait_for_resume<F, U>(ui: &mut U) -> Result<bool>
where
    U: Display<F> + ?Sized,
{
    loop {
        match ui.poll_key(PAUSE_POLL_MS)? {
            Some(PAUSE_KEY) => return Ok(true),
            Some(ESCAPE_KEY) => return Ok(false),
            _ => {}
        }
    }
}
