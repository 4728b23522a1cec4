//! wgpu bring-up for the game window.
//!
//! [`Gpu`] owns the device, queue and surface, reconfigures on resize and
//! hands out one [`GpuFrame`] per present. Surface failures are classified
//! into a [`SurfaceErrorAction`] for the caller.

mod gpu;

pub use gpu::{Gpu, GpuConfig, GpuFrame, SurfaceErrorAction};
