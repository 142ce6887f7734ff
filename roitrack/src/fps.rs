//! Frame-rate measurement

use std::time::{Duration, Instant};

/// Measures per-frame processing rate and accumulates run statistics
///
/// `start()` is called before the tracker update and `stop()` once the box
/// annotations are built, so the figure covers tracking but not display.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    frame_start: Option<Instant>,
    stats: FrameStats,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self {
            frame_start: None,
            stats: FrameStats::default(),
        }
    }

    /// Mark the beginning of a frame
    pub fn start(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Mark the end of a frame, returning the instantaneous FPS
    pub fn stop(&mut self) -> f64 {
        match self.frame_start.take() {
            Some(start) => self.record(start.elapsed()),
            None => 0.0,
        }
    }

    /// Account one frame that took `elapsed`, returning its FPS
    pub fn record(&mut self, elapsed: Duration) -> f64 {
        self.stats.total_frames += 1;
        self.stats.total_time += elapsed;
        fps_from_elapsed(elapsed)
    }

    /// Count a frame on which at least one object was lost
    pub fn record_failure(&mut self) {
        self.stats.failure_frames += 1;
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn into_stats(self) -> FrameStats {
        self.stats
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames per second for a single frame that took `elapsed`
pub fn fps_from_elapsed(elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        1.0 / secs
    } else {
        0.0
    }
}

/// Tracking run statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub total_frames: u64,
    pub failure_frames: u64,
    pub total_time: Duration,
}

impl FrameStats {
    pub fn average_fps(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if self.total_frames > 0 && secs > 0.0 {
            self.total_frames as f64 / secs
        } else {
            0.0
        }
    }

    pub fn average_frame_time_ms(&self) -> f64 {
        if self.total_frames > 0 {
            self.total_time.as_secs_f64() * 1000.0 / self.total_frames as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fps_from_elapsed() {
        assert_abs_diff_eq!(fps_from_elapsed(Duration::from_millis(40)), 25.0, epsilon = 1e-9);
        assert_eq!(fps_from_elapsed(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_stop_without_start() {
        let mut meter = FpsMeter::new();
        assert_eq!(meter.stop(), 0.0);
        assert_eq!(meter.stats().total_frames, 0);
    }

    #[test]
    fn test_start_stop_counts_frame() {
        let mut meter = FpsMeter::new();
        meter.start();
        std::thread::sleep(Duration::from_millis(2));
        let fps = meter.stop();
        assert!(fps > 0.0 && fps <= 500.0);
        assert_eq!(meter.stats().total_frames, 1);
        assert!(meter.stats().total_time >= Duration::from_millis(2));
    }

    #[test]
    fn test_average_statistics() {
        let mut meter = FpsMeter::new();
        meter.record(Duration::from_millis(20));
        meter.record(Duration::from_millis(30));
        meter.record_failure();

        let stats = meter.into_stats();
        assert_eq!(stats.total_frames, 2);
        assert_eq!(stats.failure_frames, 1);
        assert_abs_diff_eq!(stats.average_fps(), 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(stats.average_frame_time_ms(), 25.0, epsilon = 1e-9);
        assert_eq!(FrameStats::default().average_fps(), 0.0);
    }
}
