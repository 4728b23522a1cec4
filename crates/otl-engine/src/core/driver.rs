use std::fmt;
use std::rc::Rc;

use anyhow::Result;

use super::MicroApp;

/// Result of one pass through the frame cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Iteration {
    /// A full frame ran.
    Ran,
    /// The lifetime ran out; the phase is no longer alive.
    Expired,
    /// The user asked to quit; the rest of the frame was skipped.
    Quit,
}

/// How a phase's `run` ended.
pub enum Outcome {
    /// The phase ran to completion, with its successor if it named one.
    Finished(Option<Box<dyn MicroApp>>),
    /// Quit was requested mid-phase. `at_exit` did not run.
    Quit,
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Finished(next) => f
                .debug_tuple("Finished")
                .field(&next.as_ref().map(|p| p.name()))
                .finish(),
            Outcome::Quit => f.write_str("Quit"),
        }
    }
}

/// The fixed frame cycle, implemented once for every [`MicroApp`].
pub trait Driver: MicroApp {
    /// Runs one frame: deadline check, events, tasks, `step`, `draw` and
    /// present, clock tick and frame-rate readout.
    fn on_iteration(&mut self) -> Result<Iteration>;

    /// Runs the phase to completion. Blocks until the phase ends or quit is
    /// requested; hook and task errors propagate unchanged.
    fn run(&mut self) -> Result<Outcome>;
}

impl<T: MicroApp + ?Sized> Driver for T {
    fn on_iteration(&mut self) -> Result<Iteration> {
        let screen = Rc::clone(self.state().screen());
        let clock = Rc::clone(self.state().clock());

        let now = clock.borrow().now();
        if self.state().expired(now) {
            log::debug!("{} expired, lifetime {:?}", self.name(), self.state().lifetime());
            self.state_mut().end();
            return Ok(Iteration::Expired);
        }

        let events = screen.borrow_mut().poll_events()?;
        for ev in &events {
            if ev.is_quit() {
                return Ok(Iteration::Quit);
            }
            self.on_event(ev)?;
        }

        self.state_mut().run_tasks()?;

        let dt = clock.borrow().dt();
        self.step(dt)?;

        self.draw()?;
        screen.borrow_mut().present()?;

        let fps_cap = self.state().fps_cap();
        let fps = {
            let mut clock = clock.borrow_mut();
            let ft = clock.tick(fps_cap);
            log::trace!("{} frame {} dt={:.4}", self.name(), ft.frame_index, ft.dt);
            clock.fps()
        };
        screen.borrow_mut().show_fps(fps);

        Ok(Iteration::Ran)
    }

    fn run(&mut self) -> Result<Outcome> {
        self.run_once()?;
        if !self.state().is_armed() {
            self.state_mut().arm_now();
        }

        while self.state().is_alive() {
            if self.on_iteration()? == Iteration::Quit {
                log::info!("quit requested during {}", self.name());
                return Ok(Outcome::Quit);
            }
        }

        self.at_exit()?;
        Ok(Outcome::Finished(self.successor()))
    }
}
