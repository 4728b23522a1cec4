//! The shared display surface.
//!
//! [`Screen`] is what phases see: drain events, draw into the canvas, present,
//! show the frame-rate readout. [`WindowScreen`] backs it with a winit window
//! and wgpu; [`HeadlessScreen`] backs it with memory for tests and tools.

mod headless;
mod runtime;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use crate::coords::Viewport;
use crate::input::{InputEvent, InputState};
use crate::render::Canvas;

pub use headless::HeadlessScreen;
pub use runtime::{WindowConfig, WindowScreen};

/// Shared, single-threaded handle to the process display.
pub type ScreenHandle = Rc<RefCell<dyn Screen>>;

/// Display surface shared by every phase.
pub trait Screen {
    /// Takes every event that arrived since the previous call, in arrival order.
    ///
    /// Held-key/button state in [`input`](Screen::input) already includes them.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;

    fn input(&self) -> &InputState;

    /// Surface the current frame is recorded into.
    fn canvas(&mut self) -> &mut Canvas;

    /// Drawable size in logical pixels.
    fn size(&self) -> Viewport;

    /// Shows the recorded frame and starts a new one.
    fn present(&mut self) -> Result<()>;

    /// Updates the frame-rate readout (the window title).
    fn show_fps(&mut self, fps: f32);
}

/// Title text for the frame-rate readout.
pub fn fps_title(title: &str, fps: f32) -> String {
    format!("{title} | {fps:.1} fps")
}
