//! Time subsystem.
//!
//! The runner reads time only through the [`Clock`] trait so that phases can be
//! driven by wall-clock time in the game and by [`ManualClock`] in tests.
//! Intended usage:
//! - one clock per process, shared by every phase
//! - `tick()` exactly once per presented frame

mod clock;
mod fps;
mod manual;

pub use clock::{Clock, ClockHandle, FrameClock, FrameTime};
pub use fps::FpsMeter;
pub use manual::ManualClock;
