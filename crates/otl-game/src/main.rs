//! Need For Otl 10.
//!
//! Opens the window, then runs the startup check, the loading screen and the
//! game, one after another.

mod camera;
mod level;
mod phases;

use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::Result;

use otl_engine::config::Settings;
use otl_engine::core::{App, EnvironmentError, Exit, MicroApp};
use otl_engine::logging::{init_logging, LoggingConfig};
use otl_engine::time::{ClockHandle, FrameClock};
use otl_engine::window::{ScreenHandle, WindowConfig, WindowScreen};

use phases::{Init, Shared};

fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(LoggingConfig::default());
            return fail(&e);
        }
    };
    init_logging(LoggingConfig::from(&settings.logging));

    match run(settings) {
        Ok(Exit::Drained) => ExitCode::SUCCESS,
        // Quit ends the process on the spot; the running phase gets no teardown.
        Ok(Exit::Quit) => std::process::exit(0),
        Err(e) => fail(&e),
    }
}

fn run(settings: Settings) -> Result<Exit> {
    let window = WindowScreen::open(WindowConfig::from(&settings.window))?;
    let screen: ScreenHandle = Rc::new(RefCell::new(window));
    let clock: ClockHandle = Rc::new(RefCell::new(FrameClock::with_max_dt(
        settings.timing.max_frame(),
    )));

    let shared = Shared::new(screen, clock, settings);
    let mut app = App::new([Box::new(Init::new(&shared)) as Box<dyn MicroApp>]);
    app.run()
}

fn fail(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<EnvironmentError>() {
        Some(env) => {
            log::error!("environment check failed: {env}");
            eprintln!("otl: cannot start: {env}");
        }
        None => {
            log::error!("{e:#}");
            eprintln!("otl: {e:#}");
        }
    }
    ExitCode::FAILURE
}
