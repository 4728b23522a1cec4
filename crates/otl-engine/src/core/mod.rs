//! Phase lifecycle.
//!
//! A [`MicroApp`] is one phase of the program (boot check, loading screen,
//! game). [`Driver`] runs a phase through the fixed per-frame cycle and
//! [`App`] sequences phases one after another.

mod driver;
mod error;
mod phase;
mod scheduler;

pub use driver::{Driver, Iteration, Outcome};
pub use error::EnvironmentError;
pub use phase::{Lifetime, MicroApp, PhaseState, Task};
pub use scheduler::{App, Exit};
