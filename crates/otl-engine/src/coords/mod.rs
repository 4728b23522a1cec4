//! Coordinate and geometry types shared by the canvas, renderer and game content.
//!
//! Canonical screen space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! World-space content (levels, cameras) uses the same `Vec2`/`Rect` types with
//! +Y up; the camera is responsible for the flip.

mod color;
mod rect;
mod vec2;
mod viewport;

pub use color::Color;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
