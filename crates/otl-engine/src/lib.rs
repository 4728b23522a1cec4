//! otl engine crate.
//!
//! Phase lifecycle and scheduling plus the platform pieces every phase
//! shares: window and GPU, input, clock, canvas, sound, settings and logging.

pub mod core;
pub mod window;
pub mod device;
pub mod input;
pub mod time;

pub mod audio;
pub mod config;
pub mod logging;
pub mod coords;
pub mod render;

/// Engine version, checked against `runtime.requires` at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
