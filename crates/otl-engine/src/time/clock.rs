use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::FpsMeter;

/// Shared, single-threaded handle to the process clock.
pub type ClockHandle = Rc<RefCell<dyn Clock>>;

/// Frame timing snapshot produced by [`Clock::tick`].
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Time source consumed by the phase driver.
pub trait Clock {
    /// Current monotonic time. Lifetime deadlines are measured against this.
    fn now(&self) -> Instant;

    /// Seconds between the two most recent ticks; `0.0` before the second tick.
    fn dt(&self) -> f32;

    /// Ends the current frame. With `fps_cap`, blocks until at least
    /// `1 / fps_cap` seconds have passed since the previous tick.
    fn tick(&mut self, fps_cap: Option<u32>) -> FrameTime;

    /// Measured frames per second.
    fn fps(&self) -> f32;
}

/// Wall-clock [`Clock`].
///
/// Delta time is clamped from above so a stall (debugger, window drag,
/// minimised window) does not feed a huge step into the simulation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    dt: f32,
    frame_index: u64,
    dt_max: Duration,
    meter: FpsMeter,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_dt(Duration::from_millis(250))
    }

    pub fn with_max_dt(dt_max: Duration) -> Self {
        Self {
            last: Instant::now(),
            dt: 0.0,
            frame_index: 0,
            dt_max,
            meter: FpsMeter::default(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn dt(&self) -> f32 {
        self.dt
    }

    fn tick(&mut self, fps_cap: Option<u32>) -> FrameTime {
        if let Some(budget) = frame_budget(fps_cap) {
            let elapsed = self.last.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            }
        }

        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);

        self.last = now;
        self.dt = dt.as_secs_f32();
        self.meter.record(now);

        let ft = FrameTime {
            dt: self.dt,
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    fn fps(&self) -> f32 {
        self.meter.fps()
    }
}

/// Minimum frame duration for a cap; `None` and `Some(0)` mean uncapped.
pub(crate) fn frame_budget(fps_cap: Option<u32>) -> Option<Duration> {
    match fps_cap {
        Some(fps) if fps > 0 => Some(Duration::from_secs_f64(1.0 / fps as f64)),
        _ => None,
    }
}
