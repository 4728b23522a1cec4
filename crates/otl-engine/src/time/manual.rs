use std::time::{Duration, Instant};

use super::{Clock, FrameTime};

/// Deterministic [`Clock`] that only moves when told to.
///
/// Each `tick` advances time by a fixed frame step, which also becomes the next
/// `dt`. Used to drive phases in tests and headless tools.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Duration,
    step: Duration,
    dt: f32,
    ticks: u64,
}

impl ManualClock {
    /// Clock whose ticks each advance time by `step`.
    pub fn new(step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Duration::ZERO,
            step,
            dt: 0.0,
            ticks: 0,
        }
    }

    /// Moves time forward without a tick.
    pub fn advance(&mut self, by: Duration) {
        self.elapsed += by;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    fn dt(&self) -> f32 {
        self.dt
    }

    fn tick(&mut self, _fps_cap: Option<u32>) -> FrameTime {
        self.elapsed += self.step;
        self.dt = self.step.as_secs_f32();
        let ft = FrameTime {
            dt: self.dt,
            now: self.now(),
            frame_index: self.ticks,
        };
        self.ticks += 1;
        ft
    }

    fn fps(&self) -> f32 {
        if self.step.is_zero() {
            0.0
        } else {
            1.0 / self.step.as_secs_f32()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_by_step() {
        let mut clock = ManualClock::new(Duration::from_millis(10));
        let start = clock.now();
        clock.tick(None);
        clock.tick(Some(30));
        assert_eq!(clock.now() - start, Duration::from_millis(20));
        assert!((clock.dt() - 0.01).abs() < 1e-6);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn advance_moves_time_without_dt() {
        let mut clock = ManualClock::new(Duration::from_millis(10));
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.elapsed(), Duration::from_secs(1));
        assert_eq!(clock.dt(), 0.0);
    }
}
