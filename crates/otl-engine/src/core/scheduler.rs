use std::collections::VecDeque;

use anyhow::Result;

use super::{Driver, MicroApp, Outcome};

/// How the scheduler stopped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Exit {
    /// Every phase ran to completion.
    Drained,
    /// A phase saw a quit request. Remaining phases did not run.
    Quit,
}

/// Runs phases one at a time, in order.
///
/// A successor returned by the finishing phase runs next, ahead of the queue.
/// The scheduler never touches the shared screen or clock.
#[derive(Default)]
pub struct App {
    current: Option<Box<dyn MicroApp>>,
    queue: VecDeque<Box<dyn MicroApp>>,
}

impl App {
    pub fn new(phases: impl IntoIterator<Item = Box<dyn MicroApp>>) -> Self {
        Self {
            current: None,
            queue: phases.into_iter().collect(),
        }
    }

    /// Scheduler whose first phase is `current`, followed by `rest`.
    pub fn starting_with(
        current: Box<dyn MicroApp>,
        rest: impl IntoIterator<Item = Box<dyn MicroApp>>,
    ) -> Self {
        Self {
            current: Some(current),
            ..Self::new(rest)
        }
    }

    /// Appends a phase to the back of the queue.
    pub fn push(&mut self, phase: Box<dyn MicroApp>) {
        self.queue.push_back(phase);
    }

    /// Phases waiting to run.
    pub fn len(&self) -> usize {
        self.queue.len() + usize::from(self.current.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs until the queue drains, quit is requested or a phase fails.
    pub fn run(&mut self) -> Result<Exit> {
        loop {
            let Some(mut phase) = self.current.take().or_else(|| self.queue.pop_front()) else {
                log::info!("all phases finished");
                return Ok(Exit::Drained);
            };

            log::info!("phase start: {}", phase.name());
            match phase.run()? {
                Outcome::Finished(next) => {
                    if let Some(next) = &next {
                        log::debug!("{} hands over to {}", phase.name(), next.name());
                    }
                    log::info!("phase end: {}", phase.name());
                    self.current = next;
                }
                Outcome::Quit => return Ok(Exit::Quit),
            }
        }
    }
}
