use otl_engine::coords::{Color, Rect, Vec2, Viewport};
use otl_engine::render::Canvas;

use crate::level::TestLevel;

/// Distance the `R` key resets to.
pub const RESET_DISTANCE: f32 = 14.0;

/// Closest the camera gets, in world units of visible height.
const MIN_DISTANCE: f32 = 1.0;

const SKY: Color = Color::new(0.53, 0.75, 0.92, 1.0);

/// 2D camera over a y-up world.
///
/// `distance` is the world height visible on screen, so the pixel scale is
/// `screen_height / distance`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// World point shown at the screen center.
    pub position: Vec2,
    pub distance: f32,
}

impl Camera {
    pub fn new(distance: f32) -> Self {
        Self {
            position: Vec2::zero(),
            distance,
        }
    }

    /// Screen pixels per world unit.
    pub fn scale_factor(&self, screen: Viewport) -> f32 {
        screen.height / self.distance.max(MIN_DISTANCE)
    }

    /// Drags the view with the pointer: `(dx, dy)` are screen pixels.
    pub fn pan(&mut self, dx: f32, dy: f32, screen: Viewport) {
        let scale = self.scale_factor(screen);
        if scale > 0.0 {
            self.position += Vec2::new(dx, dy).scale(Vec2::new(-1.0, 1.0)) / scale;
        }
    }

    /// Wheel up moves closer.
    pub fn zoom(&mut self, wheel_y: f32) {
        self.distance -= wheel_y;
    }

    pub fn reset(&mut self) {
        self.position = Vec2::zero();
        self.distance = RESET_DISTANCE;
    }

    pub fn world_to_screen(&self, p: Vec2, screen: Viewport) -> Vec2 {
        let s = self.scale_factor(screen);
        let c = screen.center();
        let rel = p - self.position;
        Vec2::new(c.x + rel.x * s, c.y - rel.y * s)
    }

    fn rect_to_screen(&self, r: Rect, screen: Viewport) -> Rect {
        let a = self.world_to_screen(r.min(), screen);
        let b = self.world_to_screen(r.max(), screen);
        Rect::new(a.x, a.y, b.x - a.x, b.y - a.y).normalized()
    }

    /// Draws the level: sky, platforms, player.
    pub fn view(&self, level: &TestLevel, canvas: &mut Canvas) {
        let screen = canvas.size();
        canvas.fill(SKY);
        for platform in &level.platforms {
            canvas.rect(self.rect_to_screen(platform.rect, screen), platform.color);
        }
        canvas.rect(self.rect_to_screen(level.player.rect, screen), level.player.color());
    }

    /// Collision boxes, the player's velocity and the world origin.
    pub fn debug_view(&self, level: &TestLevel, canvas: &mut Canvas) {
        let screen = canvas.size();
        let lime = Color::rgb(0, 255, 0);
        let magenta = Color::rgb(255, 0, 255);

        for platform in &level.platforms {
            let r = self.rect_to_screen(platform.rect, screen);
            canvas.outline(&r.corners(), 1.0, lime);
        }

        let player = &level.player;
        let r = self.rect_to_screen(player.rect, screen);
        canvas.outline(&r.corners(), 1.0, magenta);
        let from = self.world_to_screen(player.rect.center(), screen);
        let to = self.world_to_screen(player.rect.center() + player.velocity * 0.25, screen);
        canvas.line(from, to, 2.0, magenta);

        let origin = self.world_to_screen(Vec2::zero(), screen);
        canvas.line(origin - Vec2::new(8.0, 0.0), origin + Vec2::new(8.0, 0.0), 1.0, Color::white());
        canvas.line(origin - Vec2::new(0.0, 8.0), origin + Vec2::new(0.0, 8.0), 1.0, Color::white());
    }
}
