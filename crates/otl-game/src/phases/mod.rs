//! The program's phases, in run order: [`Init`], [`LoadingScreen`], [`Game`].

mod game;
mod init;
mod loading;

use std::rc::Rc;

use otl_engine::config::Settings;
use otl_engine::core::{Lifetime, PhaseState};
use otl_engine::time::ClockHandle;
use otl_engine::window::ScreenHandle;

pub use game::Game;
pub use init::Init;
pub use loading::LoadingScreen;

/// Process-wide resources every phase is built from.
#[derive(Clone)]
pub struct Shared {
    pub screen: ScreenHandle,
    pub clock: ClockHandle,
    pub settings: Rc<Settings>,
}

impl Shared {
    pub fn new(screen: ScreenHandle, clock: ClockHandle, settings: Settings) -> Self {
        Self {
            screen,
            clock,
            settings: Rc::new(settings),
        }
    }

    fn phase_state(&self, lifetime: Lifetime) -> PhaseState {
        PhaseState::new(self.screen.clone(), self.clock.clone(), lifetime)
    }
}
