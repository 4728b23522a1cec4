use std::time::Duration;

use anyhow::{Context, Result};
use semver::{Version, VersionReq};

use otl_engine::coords::Viewport;
use otl_engine::core::{EnvironmentError, Lifetime, MicroApp, PhaseState};

use super::{Game, LoadingScreen, Shared};

/// Startup check. Runs no frames.
pub struct Init {
    state: PhaseState,
    shared: Shared,
}

impl Init {
    pub fn new(shared: &Shared) -> Self {
        Self {
            state: shared.phase_state(Lifetime::Finite(Duration::ZERO)),
            shared: shared.clone(),
        }
    }
}

/// Fails when the engine is older than required or the display is empty.
pub fn check_environment(
    engine: &Version,
    requires: &VersionReq,
    display: Viewport,
) -> Result<(), EnvironmentError> {
    if !requires.matches(engine) {
        return Err(EnvironmentError::UnsupportedEngine {
            version: engine.clone(),
            requires: requires.clone(),
        });
    }
    if !display.is_valid() {
        return Err(EnvironmentError::EmptyDisplay {
            width: display.width,
            height: display.height,
        });
    }
    Ok(())
}

impl MicroApp for Init {
    fn name(&self) -> &str {
        "init"
    }

    fn state(&self) -> &PhaseState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PhaseState {
        &mut self.state
    }

    fn run_once(&mut self) -> Result<()> {
        self.state.arm_now();

        let engine = Version::parse(otl_engine::VERSION).context("engine version is not semver")?;
        let requires = self.shared.settings.runtime_requirement()?;
        let display = self.shared.screen.borrow().size();

        check_environment(&engine, &requires, display)?;
        log::info!(
            "environment ok: engine {engine} ({requires}), display {}x{}",
            display.width,
            display.height
        );
        Ok(())
    }

    fn successor(&mut self) -> Option<Box<dyn MicroApp>> {
        if self.shared.settings.loading.enabled {
            Some(Box::new(LoadingScreen::from_settings(&self.shared)))
        } else {
            Some(Box::new(Game::new(&self.shared)))
        }
    }
}
