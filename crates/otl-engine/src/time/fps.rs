use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frames-per-second over a sliding window of recent ticks.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    ticks: VecDeque<Instant>,
    window: Duration,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl FpsMeter {
    pub fn new(window: Duration) -> Self {
        Self {
            ticks: VecDeque::new(),
            window,
        }
    }

    /// Records a tick and drops ticks older than the window.
    pub fn record(&mut self, now: Instant) {
        self.ticks.push_back(now);
        while let Some(&front) = self.ticks.front() {
            if now.saturating_duration_since(front) > self.window {
                self.ticks.pop_front();
            } else {
                break;
            }
        }
    }

    /// Average rate between the oldest and newest tick in the window.
    ///
    /// `0.0` until two ticks exist.
    pub fn fps(&self) -> f32 {
        let (Some(first), Some(last)) = (self.ticks.front(), self.ticks.back()) else {
            return 0.0;
        };
        let span = last.saturating_duration_since(*first).as_secs_f32();
        if self.ticks.len() < 2 || span <= 0.0 {
            return 0.0;
        }
        (self.ticks.len() - 1) as f32 / span
    }
}
