use std::f32::consts::FRAC_PI_4;

use anyhow::Result;

use otl_engine::audio::{self, Melody, Sound};
use otl_engine::coords::{Color, Rect, Vec2, Viewport};
use otl_engine::core::{MicroApp, PhaseState};
use otl_engine::input::InputEvent;
use otl_engine::render::Canvas;

use super::{Game, Shared};

const BACKGROUND: (u8, u8, u8) = (100, 100, 254);

const STRIPE_COLORS: [(u8, u8, u8); 5] = [
    (212, 6, 6),
    (238, 156, 0),
    (227, 255, 0),
    (6, 191, 0),
    (0, 26, 152),
];

/// Stripes per color. The pattern only wraps seamlessly when the stripe count
/// is a multiple of the color count.
const STRIPES_PER_COLOR: usize = 5;

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::rgb(r, g, b)
}

/// Slanted color stripes sliding sideways through a centered band.
#[derive(Debug, Clone, PartialEq)]
pub struct Stripes {
    band: Rect,
    count: usize,
    len: f32,
    position: f32,
    speed: f32,
}

impl Stripes {
    /// Band 60% of the screen wide and a fifth of it tall, centered.
    pub fn new(screen: Viewport, speed: f32) -> Self {
        let mut stripes = Self {
            band: Rect::default(),
            count: STRIPES_PER_COLOR * STRIPE_COLORS.len(),
            len: 0.0,
            position: 0.0,
            speed,
        };
        stripes.resize(screen);
        stripes
    }

    /// Refits the band to a new screen size, keeping the scroll offset.
    pub fn resize(&mut self, screen: Viewport) {
        let size = Vec2::new(screen.width * 0.6, screen.height / 5.0);
        self.band = Rect::centered(screen.center(), size);
        self.len = (size.x + size.y * FRAC_PI_4.cos()) / (self.count - 1) as f32;
    }

    pub fn step(&mut self, dt: f32) {
        self.position += self.speed * dt;
    }

    pub fn band(&self) -> Rect {
        self.band
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Each stripe's corners in screen pixels, unclipped, with its color.
    pub fn parallelograms(&self) -> impl Iterator<Item = ([Vec2; 4], Color)> + '_ {
        let h = self.band.size.y;
        let slant = h * FRAC_PI_4.cos();
        let period = self.len * self.count as f32;
        let o = self.band.origin;

        (0..self.count).map(move |i| {
            let x = (i as f32 * self.len + self.position).rem_euclid(period) - self.len;
            let corners = [
                Vec2::new(x, 0.0),
                Vec2::new(x - slant, h),
                Vec2::new(x + self.len - slant, h),
                Vec2::new(x + self.len, 0.0),
            ]
            .map(|p| p + o);
            (corners, rgb(STRIPE_COLORS[i % STRIPE_COLORS.len()]))
        })
    }

    /// Draws the stripes clipped to the band.
    pub fn draw(&self, canvas: &mut Canvas) {
        let (min_x, max_x) = (self.band.min().x, self.band.max().x);
        for (corners, color) in self.parallelograms() {
            let clipped = clip_x(&corners, min_x, max_x);
            canvas.polygon(&clipped, color);
        }
    }
}

/// Clips a convex polygon to the vertical slab `min_x..=max_x`.
fn clip_x(points: &[Vec2], min_x: f32, max_x: f32) -> Vec<Vec2> {
    let left = clip_edge(points, min_x, |x| x >= min_x);
    clip_edge(&left, max_x, |x| x <= max_x)
}

fn clip_edge(points: &[Vec2], edge: f32, inside: impl Fn(f32) -> bool) -> Vec<Vec2> {
    let mut out = Vec::with_capacity(points.len() + 2);
    for (i, &cur) in points.iter().enumerate() {
        let prev = points[(i + points.len() - 1) % points.len()];
        let (cur_in, prev_in) = (inside(cur.x), inside(prev.x));
        if cur_in != prev_in {
            let t = (edge - prev.x) / (cur.x - prev.x);
            out.push(prev + (cur - prev) * t);
        }
        if cur_in {
            out.push(cur);
        }
    }
    out
}

/// Animated loading screen with background music.
pub struct LoadingScreen {
    state: PhaseState,
    shared: Shared,
    stripes: Stripes,
    sound: Box<dyn Sound>,
}

impl LoadingScreen {
    pub fn new(shared: &Shared, sound: Box<dyn Sound>) -> Self {
        let loading = &shared.settings.loading;
        let size = shared.screen.borrow().size();
        Self {
            state: shared.phase_state(loading.lifetime()),
            shared: shared.clone(),
            stripes: Stripes::new(size, loading.stripe_speed),
            sound,
        }
    }

    /// Loading screen with the synthesized loop, or silence if sound is off.
    pub fn from_settings(shared: &Shared) -> Self {
        let sound = audio::background_loop(shared.settings.loading.sound, Melody::default());
        Self::new(shared, sound)
    }

    pub fn stripes(&self) -> &Stripes {
        &self.stripes
    }
}

impl MicroApp for LoadingScreen {
    fn name(&self) -> &str {
        "loading"
    }

    fn state(&self) -> &PhaseState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PhaseState {
        &mut self.state
    }

    fn run_once(&mut self) -> Result<()> {
        self.state.arm_now();
        self.sound.play()
    }

    fn on_event(&mut self, event: &InputEvent) -> Result<()> {
        if let InputEvent::Resized { width, height } = *event {
            self.stripes.resize(Viewport::new(width, height));
        }
        Ok(())
    }

    fn step(&mut self, dt: f32) -> Result<()> {
        self.stripes.step(dt);
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let mut screen = self.state.screen().borrow_mut();
        let canvas = screen.canvas();
        canvas.fill(rgb(BACKGROUND));
        self.stripes.draw(canvas);
        Ok(())
    }

    fn at_exit(&mut self) -> Result<()> {
        self.sound.stop();
        Ok(())
    }

    fn successor(&mut self) -> Option<Box<dyn MicroApp>> {
        Some(Box::new(Game::new(&self.shared)))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use otl_engine::config::Settings;
    use otl_engine::core::{Driver, Outcome};

    use super::*;
    use crate::phases::testing::rig;

    const SCREEN: Viewport = Viewport::new(1000.0, 500.0);

    /// Records play/stop calls.
    struct Spy(Rc<RefCell<Vec<&'static str>>>);

    impl Sound for Spy {
        fn play(&mut self) -> Result<()> {
            self.0.borrow_mut().push("play");
            Ok(())
        }
        fn stop(&mut self) {
            self.0.borrow_mut().push("stop");
        }
        fn is_playing(&self) -> bool {
            self.0.borrow().last() == Some(&"play")
        }
    }

    // ── stripes ──────────────────────────────────────────────────────────

    #[test]
    fn band_is_centered() {
        let s = Stripes::new(SCREEN, 70.0);
        assert_eq!(s.band(), Rect::new(200.0, 200.0, 600.0, 100.0));
        assert_eq!(s.count(), 25);
    }

    #[test]
    fn colors_cycle_in_order() {
        let s = Stripes::new(SCREEN, 70.0);
        let colors: Vec<Color> = s.parallelograms().map(|(_, c)| c).collect();
        assert_eq!(colors.len(), 25);
        for (i, c) in colors.iter().enumerate() {
            assert_eq!(*c, rgb(STRIPE_COLORS[i % 5]));
        }
    }

    #[test]
    fn zero_step_keeps_stripes() {
        let mut s = Stripes::new(SCREEN, 70.0);
        s.step(0.3);
        let before = s.clone();
        s.step(0.0);
        assert_eq!(s, before);
    }

    #[test]
    fn slides_at_speed() {
        let mut s = Stripes::new(SCREEN, 70.0);
        s.step(0.5);
        assert_eq!(s.position(), 35.0);
    }

    #[test]
    fn stripes_are_slanted_parallelograms() {
        let s = Stripes::new(SCREEN, 70.0);
        let ([top_l, bot_l, bot_r, top_r], _) = s.parallelograms().next().unwrap();
        assert_eq!(top_l.y, 200.0);
        assert_eq!(bot_l.y, 300.0);
        assert!((top_l.x - bot_l.x - 100.0 * FRAC_PI_4.cos()).abs() < 1e-3);
        assert!(((top_r - top_l).x - (bot_r - bot_l).x).abs() < 1e-3);
    }

    #[test]
    fn drawing_stays_inside_band() {
        let mut s = Stripes::new(SCREEN, 70.0);
        s.step(1.7);
        let mut canvas = Canvas::new(SCREEN);
        s.draw(&mut canvas);
        assert!(canvas.triangle_count() >= 20);
        for v in canvas.vertices() {
            assert!(v.pos.x >= 200.0 - 1e-3 && v.pos.x <= 800.0 + 1e-3, "{:?}", v.pos);
            assert!(v.pos.y >= 200.0 - 1e-3 && v.pos.y <= 300.0 + 1e-3, "{:?}", v.pos);
        }
    }

    #[test]
    fn clip_cuts_polygon_at_both_edges() {
        let square = [
            Vec2::new(-1.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ];
        let clipped = clip_x(&square, 0.0, 2.0);
        assert_eq!(clipped.len(), 4);
        assert!(clipped.iter().all(|p| (0.0..=2.0).contains(&p.x)));
        assert!(clip_x(&square, 5.0, 6.0).is_empty());
    }

    // ── phase ────────────────────────────────────────────────────────────

    #[test]
    fn runs_for_its_lifetime_then_hands_over_to_game() {
        let mut settings = Settings::default();
        settings.loading.lifetime_secs = 0.5;
        let rig = rig(settings, SCREEN);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut loading = LoadingScreen::new(&rig.shared, Box::new(Spy(calls.clone())));

        let next = match loading.run().unwrap() {
            Outcome::Finished(Some(next)) => next,
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert_eq!(next.name(), "game");
        assert_eq!(rig.screen.borrow().presents(), 5);
        assert_eq!(*calls.borrow(), vec!["play", "stop"]);

        let frame = rig.screen.borrow().last_frame().cloned().unwrap();
        assert_eq!(frame.clear_color(), rgb(BACKGROUND));
        assert!((loading.stripes().position() - 70.0 * 0.4).abs() < 1e-3);
    }

    #[test]
    fn quit_leaves_music_to_process_exit() {
        let rig = rig(Settings::default(), SCREEN);
        rig.screen.borrow_mut().queue_frame(vec![InputEvent::Quit]);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut loading = LoadingScreen::new(&rig.shared, Box::new(Spy(calls.clone())));

        assert!(matches!(loading.run().unwrap(), Outcome::Quit));
        assert_eq!(*calls.borrow(), vec!["play"]);
    }

    #[test]
    fn resize_refits_band() {
        let rig = rig(Settings::default(), SCREEN);
        let mut loading = LoadingScreen::new(&rig.shared, Box::new(audio::Silence::default()));
        loading
            .on_event(&InputEvent::Resized { width: 500.0, height: 1000.0 })
            .unwrap();
        assert_eq!(loading.stripes().band(), Rect::new(100.0, 400.0, 300.0, 200.0));
    }
}
