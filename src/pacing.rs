use std::time::{Duration, Instant};

/// Caps the loop at a target number of generations per second.
///
/// Each frame gets `1s / fps`; whatever the frame did not use is waited out.
/// A frame that overruns its budget is followed immediately by the next one,
/// with no catch-up and no skipped generations.
pub struct FramePacer {
    budget: Duration,
    frame_started: Option<Instant>,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            budget: Duration::from_secs(1) / fps.max(1),
            frame_started: None,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Mark the start of a frame
    pub fn begin(&mut self, now: Instant) {
        self.frame_started = Some(now);
    }

    /// Time left to wait after a frame that took `elapsed`
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }

    /// When the next frame should start; `None` before the first frame
    pub fn next_frame_at(&self) -> Option<Instant> {
        self.frame_started.map(|started| started + self.budget)
    }

    /// Start a new frame at `now` if one is due.
    ///
    /// Returns false for redraws arriving before the deadline; those should
    /// repaint the current generation without advancing it.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        let due = self.is_due(now);
        if due {
            self.begin(now);
        }
        due
    }

    /// Whether the next frame may start at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_frame_at().map_or(true, |deadline| now >= deadline)
    }
}

/// Measures the effective generation rate
pub struct RateCounter {
    last_update: Instant,
    frame_count: u32,
}

impl RateCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            last_update: now,
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(rate) about once a second
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = now.duration_since(self.last_update);

        if elapsed.as_secs_f64() >= 1.0 {
            let rate = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = now;
            Some(rate)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_from_fps() {
        assert_eq!(FramePacer::new(10).budget(), Duration::from_millis(100));
        assert_eq!(FramePacer::new(1).budget(), Duration::from_secs(1));
        assert_eq!(FramePacer::new(4).budget(), Duration::from_millis(250));
    }

    #[test]
    fn test_remaining_subtracts_elapsed() {
        let pacer = FramePacer::new(10);
        assert_eq!(pacer.remaining(Duration::ZERO), Duration::from_millis(100));
        assert_eq!(pacer.remaining(Duration::from_millis(30)), Duration::from_millis(70));
    }

    #[test]
    fn test_overrun_waits_nothing() {
        let pacer = FramePacer::new(10);
        assert_eq!(pacer.remaining(Duration::from_millis(100)), Duration::ZERO);
        assert_eq!(pacer.remaining(Duration::from_millis(350)), Duration::ZERO);
    }

    #[test]
    fn test_deadline_follows_frame_start() {
        let mut pacer = FramePacer::new(20);
        let start = Instant::now();
        assert!(pacer.is_due(start));
        assert_eq!(pacer.next_frame_at(), None);

        pacer.begin(start);
        assert_eq!(pacer.next_frame_at(), Some(start + Duration::from_millis(50)));
        assert!(!pacer.is_due(start + Duration::from_millis(49)));
        assert!(pacer.is_due(start + Duration::from_millis(50)));
        assert!(pacer.is_due(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_early_redraw_does_not_start_a_frame() {
        let mut pacer = FramePacer::new(10);
        let start = Instant::now();
        assert!(pacer.try_begin(start));

        // Redraws forced before the deadline keep the original frame start
        assert!(!pacer.try_begin(start + Duration::from_millis(10)));
        assert!(!pacer.try_begin(start + Duration::from_millis(99)));
        assert_eq!(pacer.next_frame_at(), Some(start + Duration::from_millis(100)));

        assert!(pacer.try_begin(start + Duration::from_millis(100)));
        assert_eq!(pacer.next_frame_at(), Some(start + Duration::from_millis(200)));
    }

    #[test]
    fn test_rate_counter_reports_once_per_second() {
        let start = Instant::now();
        let mut counter = RateCounter::new(start);

        for i in 1..10 {
            assert_eq!(counter.tick(start + Duration::from_millis(i * 100)), None);
        }
        let rate = counter.tick(start + Duration::from_secs(1)).unwrap();
        assert!((rate - 10.0).abs() < 1e-9);

        assert_eq!(counter.tick(start + Duration::from_millis(1100)), None);
    }
}
