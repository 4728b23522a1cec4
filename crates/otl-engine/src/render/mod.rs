//! Frame rendering.
//!
//! Phases record into a [`Canvas`] (CPU-side, no GPU types); the window screen
//! hands the canvas to [`PolygonRenderer`] once per presented frame.
//!
//! Convention:
//! - canvas geometry is in logical pixels (top-left origin, +Y down)
//! - the vertex shader converts to NDC using a viewport uniform

mod canvas;
mod ctx;
mod polygon;

pub use canvas::{Canvas, CanvasVertex};
pub use ctx::{RenderCtx, RenderTarget};
pub use polygon::PolygonRenderer;
