use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub tps: f32,
    pub frame_time_ms: f32,
    pub worst_frame_ms: f32,
}

/// Counts frames and simulation ticks over a fixed wall-clock window and
/// turns them into rates once the window has elapsed.
#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    window_start: Instant,
    window: Duration,
    frames: u32,
    ticks: u32,
    frame_time_total: Duration,
    worst_frame: Duration,
}

impl MetricsAccumulator {
    pub(crate) fn new(window: Duration, now: Instant) -> Self {
        Self {
            window_start: now,
            window,
            frames: 0,
            ticks: 0,
            frame_time_total: Duration::ZERO,
            worst_frame: Duration::ZERO,
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration) {
        self.frames = self.frames.saturating_add(1);
        self.frame_time_total = self.frame_time_total.saturating_add(frame_dt);
        self.worst_frame = self.worst_frame.max(frame_dt);
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.window {
            return None;
        }

        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let frame_time_ms = match self.frames {
            0 => 0.0,
            frames => self.frame_time_total.as_secs_f32() * 1000.0 / frames as f32,
        };
        let snapshot = LoopMetricsSnapshot {
            fps: self.frames as f32 / elapsed_seconds,
            tps: self.ticks as f32 / elapsed_seconds,
            frame_time_ms,
            worst_frame_ms: self.worst_frame.as_secs_f32() * 1000.0,
        };

        *self = Self::new(self.window, now);
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_snapshot_before_window_elapses() {
        let start = Instant::now();
        let mut metrics = MetricsAccumulator::new(Duration::from_secs(1), start);
        metrics.record_frame(Duration::from_millis(16));

        assert!(metrics
            .maybe_snapshot(start + Duration::from_millis(500))
            .is_none());
    }

    #[test]
    fn snapshot_reports_rates_and_resets() {
        let start = Instant::now();
        let mut metrics = MetricsAccumulator::new(Duration::from_secs(1), start);
        for _ in 0..4 {
            metrics.record_frame(Duration::from_millis(10));
        }
        metrics.record_frame(Duration::from_millis(30));
        for _ in 0..6 {
            metrics.record_tick();
        }

        let end = start + Duration::from_secs(2);
        let snapshot = metrics.maybe_snapshot(end).expect("snapshot");
        assert!((snapshot.fps - 2.5).abs() < 1e-4);
        assert!((snapshot.tps - 3.0).abs() < 1e-4);
        assert!((snapshot.frame_time_ms - 14.0).abs() < 1e-3);
        assert!((snapshot.worst_frame_ms - 30.0).abs() < 1e-3);

        assert!(metrics.maybe_snapshot(end).is_none());
    }
}
