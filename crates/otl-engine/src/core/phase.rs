use std::fmt;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::input::InputEvent;
use crate::time::ClockHandle;
use crate::window::ScreenHandle;

/// Zero-argument job run once per iteration, before `step`.
pub type Task = Box<dyn FnMut() -> Result<()>>;

/// How long a phase may run once its deadline is armed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lifetime {
    Finite(Duration),
    Infinite,
}

impl Lifetime {
    /// Finite lifetime from seconds. Input no `Duration` can hold is zero.
    pub fn from_secs_f32(secs: f32) -> Self {
        Lifetime::Finite(Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO))
    }
}

/// State every phase carries: shared handles, tasks, liveness and deadline.
pub struct PhaseState {
    screen: ScreenHandle,
    clock: ClockHandle,
    tasks: Vec<Task>,

    alive: bool,
    lifetime: Lifetime,
    start_time: Option<Instant>,

    fps_cap: Option<u32>,
}

impl PhaseState {
    pub fn new(screen: ScreenHandle, clock: ClockHandle, lifetime: Lifetime) -> Self {
        Self {
            screen,
            clock,
            tasks: Vec::new(),
            alive: true,
            lifetime,
            start_time: None,
            fps_cap: None,
        }
    }

    #[inline]
    pub fn screen(&self) -> &ScreenHandle {
        &self.screen
    }

    #[inline]
    pub fn clock(&self) -> &ClockHandle {
        &self.clock
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Stops the phase after the current iteration. Irreversible.
    pub fn end(&mut self) {
        self.alive = false;
    }

    #[inline]
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.start_time.is_some()
    }

    /// Arms the deadline at `now`. Only the first call has an effect.
    pub fn arm(&mut self, now: Instant) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Arms the deadline at the shared clock's current time.
    pub fn arm_now(&mut self) {
        let now = self.clock.borrow().now();
        self.arm(now);
    }

    /// Whether the lifetime has run out at `now`. Never true before arming.
    pub fn expired(&self, now: Instant) -> bool {
        match (self.start_time, self.lifetime) {
            (Some(start), Lifetime::Finite(l)) => now.saturating_duration_since(start) >= l,
            _ => false,
        }
    }

    pub fn add_task(&mut self, task: impl FnMut() -> Result<()> + 'static) {
        self.tasks.push(Box::new(task));
    }

    /// Runs every task in registration order; the first failure stops the run.
    pub fn run_tasks(&mut self) -> Result<()> {
        for task in &mut self.tasks {
            task()?;
        }
        Ok(())
    }

    #[inline]
    pub fn fps_cap(&self) -> Option<u32> {
        self.fps_cap
    }

    /// Frame-rate cap honored by the clock tick; `None` or `Some(0)` is uncapped.
    pub fn set_fps_cap(&mut self, cap: Option<u32>) {
        self.fps_cap = cap.filter(|&c| c > 0);
    }
}

impl fmt::Debug for PhaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseState")
            .field("alive", &self.alive)
            .field("lifetime", &self.lifetime)
            .field("start_time", &self.start_time)
            .field("tasks", &self.tasks.len())
            .field("fps_cap", &self.fps_cap)
            .finish()
    }
}

/// One phase of the program.
///
/// Implementors override the hooks they need; the frame cycle itself lives in
/// [`Driver`](super::Driver) and cannot be changed per phase.
pub trait MicroApp {
    /// Used in logs.
    fn name(&self) -> &str;

    fn state(&self) -> &PhaseState;

    fn state_mut(&mut self) -> &mut PhaseState;

    /// One-time setup before the first iteration. The default arms the deadline.
    fn run_once(&mut self) -> Result<()> {
        self.state_mut().arm_now();
        Ok(())
    }

    /// Receives every drained event except `Quit`.
    fn on_event(&mut self, event: &InputEvent) -> Result<()> {
        let _ = event;
        Ok(())
    }

    /// Advances the phase by `dt` seconds.
    fn step(&mut self, dt: f32) -> Result<()> {
        let _ = dt;
        Ok(())
    }

    /// Records the frame into the shared canvas.
    fn draw(&mut self) -> Result<()> {
        Ok(())
    }

    /// One-time teardown after the last iteration. Not called on quit.
    fn at_exit(&mut self) -> Result<()> {
        Ok(())
    }

    /// Phase to run next, taking priority over the scheduler queue.
    /// Polled once, after `at_exit`.
    fn successor(&mut self) -> Option<Box<dyn MicroApp>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::coords::Viewport;
    use crate::time::{Clock, ManualClock};
    use crate::window::HeadlessScreen;

    fn state(lifetime: Lifetime) -> (PhaseState, Rc<RefCell<ManualClock>>) {
        let clock = Rc::new(RefCell::new(ManualClock::new(Duration::from_millis(10))));
        let screen: ScreenHandle = Rc::new(RefCell::new(HeadlessScreen::new(Viewport::new(8.0, 8.0))));
        (PhaseState::new(screen, clock.clone(), lifetime), clock)
    }

    // ── deadline ─────────────────────────────────────────────────────────

    #[test]
    fn arming_is_idempotent() {
        let (mut s, clock) = state(Lifetime::Finite(Duration::from_secs(1)));
        let start = clock.borrow().now();
        s.arm_now();
        clock.borrow_mut().advance(Duration::from_millis(500));
        s.arm_now();
        assert!(!s.expired(start + Duration::from_millis(999)));
        assert!(s.expired(start + Duration::from_secs(1)));
    }

    #[test]
    fn expires_at_exact_lifetime() {
        let (mut s, clock) = state(Lifetime::Finite(Duration::from_secs(2)));
        s.arm_now();
        let start = clock.borrow().now();
        assert!(!s.expired(start + Duration::from_millis(1999)));
        assert!(s.expired(start + Duration::from_secs(2)));
    }

    #[test]
    fn unarmed_or_infinite_never_expires() {
        let (s, clock) = state(Lifetime::Finite(Duration::ZERO));
        assert!(!s.expired(clock.borrow().now()));

        let (mut s, clock) = state(Lifetime::Infinite);
        s.arm_now();
        assert!(!s.expired(clock.borrow().now() + Duration::from_secs(86_400)));
    }

    #[test]
    fn negative_seconds_are_zero_lifetime() {
        assert_eq!(Lifetime::from_secs_f32(-1.0), Lifetime::Finite(Duration::ZERO));
        assert_eq!(Lifetime::from_secs_f32(1.5), Lifetime::Finite(Duration::from_millis(1500)));
    }

    #[test]
    fn end_is_monotonic() {
        let (mut s, _) = state(Lifetime::Infinite);
        assert!(s.is_alive());
        s.end();
        s.end();
        assert!(!s.is_alive());
    }

    // ── tasks ────────────────────────────────────────────────────────────

    #[test]
    fn tasks_run_in_registration_order() {
        let (mut s, _) = state(Lifetime::Infinite);
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = log.clone();
            s.add_task(move || {
                log.borrow_mut().push(i);
                Ok(())
            });
        }
        s.run_tasks().unwrap();
        s.run_tasks().unwrap();
        assert_eq!(*log.borrow(), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn failing_task_stops_the_run() {
        let (mut s, _) = state(Lifetime::Infinite);
        let ran = Rc::new(RefCell::new(false));
        s.add_task(|| anyhow::bail!("task failed"));
        let flag = ran.clone();
        s.add_task(move || {
            *flag.borrow_mut() = true;
            Ok(())
        });
        let err = s.run_tasks().unwrap_err();
        assert_eq!(err.to_string(), "task failed");
        assert!(!*ran.borrow());
    }

    #[test]
    fn zero_fps_cap_means_uncapped() {
        let (mut s, _) = state(Lifetime::Infinite);
        s.set_fps_cap(Some(0));
        assert_eq!(s.fps_cap(), None);
        s.set_fps_cap(Some(60));
        assert_eq!(s.fps_cap(), Some(60));
    }
}
