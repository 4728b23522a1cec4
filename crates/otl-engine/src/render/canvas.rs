use crate::coords::{Color, Rect, Vec2, Viewport};

/// One corner of a recorded triangle, in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasVertex {
    pub pos: Vec2,
    pub color: Color,
}

/// The shared frame surface phases draw into.
///
/// Records a fill color plus a triangle list for the current frame. Nothing is
/// rasterised here; the screen uploads the recording when it presents and then
/// calls [`reset`](Canvas::reset).
#[derive(Debug, Clone)]
pub struct Canvas {
    size: Viewport,
    clear: Color,
    vertices: Vec<CanvasVertex>,
}

impl Canvas {
    pub fn new(size: Viewport) -> Self {
        Self {
            size,
            clear: Color::black(),
            vertices: Vec::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> Viewport {
        self.size
    }

    pub fn set_size(&mut self, size: Viewport) {
        self.size = size;
    }

    #[inline]
    pub fn clear_color(&self) -> Color {
        self.clear
    }

    /// Triangle list in paint order (three vertices per triangle).
    #[inline]
    pub fn vertices(&self) -> &[CanvasVertex] {
        &self.vertices
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Paints the whole surface; anything recorded earlier this frame is covered.
    pub fn fill(&mut self, color: Color) {
        self.clear = color;
        self.vertices.clear();
    }

    /// Fills a convex polygon. Fewer than three points draw nothing.
    pub fn polygon(&mut self, points: &[Vec2], color: Color) {
        let [first, rest @ ..] = points else { return };
        for pair in rest.windows(2) {
            self.triangle([*first, pair[0], pair[1]], color);
        }
    }

    pub fn triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.vertices
            .extend(points.iter().map(|&pos| CanvasVertex { pos, color }));
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        let r = rect.normalized();
        if r.is_empty() {
            return;
        }
        self.polygon(&r.corners(), color);
    }

    /// Straight segment drawn as a quad `width` pixels thick.
    pub fn line(&mut self, a: Vec2, b: Vec2, width: f32, color: Color) {
        let normal = (b - a).normalized().perp() * (width / 2.0);
        if normal == Vec2::zero() || width <= 0.0 {
            return;
        }
        self.polygon(&[a + normal, b + normal, b - normal, a - normal], color);
    }

    /// Closed outline through `points`.
    pub fn outline(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.line(a, b, width, color);
        }
    }

    /// Drops recorded geometry after a present. The fill color is kept.
    pub fn reset(&mut self) {
        self.vertices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(Viewport::new(100.0, 100.0))
    }

    #[test]
    fn polygon_is_fan_triangulated() {
        let mut c = canvas();
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(5.0, 15.0),
            Vec2::new(0.0, 10.0),
        ];
        c.polygon(&pts, Color::white());
        assert_eq!(c.triangle_count(), 3);
        assert!(c.vertices().iter().step_by(3).all(|v| v.pos == pts[0]));
    }

    #[test]
    fn degenerate_shapes_draw_nothing() {
        let mut c = canvas();
        c.polygon(&[Vec2::zero(), Vec2::new(1.0, 1.0)], Color::white());
        c.rect(Rect::new(0.0, 0.0, 0.0, 5.0), Color::white());
        c.line(Vec2::zero(), Vec2::zero(), 2.0, Color::white());
        assert_eq!(c.triangle_count(), 0);
    }

    #[test]
    fn fill_covers_earlier_geometry() {
        let mut c = canvas();
        c.rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::white());
        c.fill(Color::rgb(100, 100, 254));
        assert_eq!(c.triangle_count(), 0);
        assert_eq!(c.clear_color(), Color::rgb(100, 100, 254));
    }

    #[test]
    fn line_has_requested_thickness() {
        let mut c = canvas();
        c.line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 4.0, Color::white());
        let ys: Vec<f32> = c.vertices().iter().map(|v| v.pos.y).collect();
        let span = ys.iter().cloned().fold(f32::MIN, f32::max) - ys.iter().cloned().fold(f32::MAX, f32::min);
        assert!((span - 4.0).abs() < 1e-5);
    }

    #[test]
    fn outline_draws_one_quad_per_edge() {
        let mut c = canvas();
        c.outline(&Rect::new(0.0, 0.0, 10.0, 10.0).corners(), 1.0, Color::white());
        assert_eq!(c.triangle_count(), 8);
    }

    #[test]
    fn reset_keeps_fill_color() {
        let mut c = canvas();
        c.fill(Color::white());
        c.rect(Rect::new(40.0, 40.0, 20.0, 20.0), Color::black());
        c.reset();
        assert_eq!(c.triangle_count(), 0);
        assert_eq!(c.clear_color(), Color::white());
    }
}
