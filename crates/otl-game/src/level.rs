//! The test level: static platforms and one player box, in world units
//! (y up).

use otl_engine::coords::{Color, Rect, Vec2};
use otl_engine::input::{InputState, Key};

const GRAVITY: f32 = 30.0;
const RUN_SPEED: f32 = 8.0;
const JUMP_SPEED: f32 = 14.0;
const MAX_FALL_SPEED: f32 = 40.0;

/// Falling below this puts the player back at the spawn point.
const KILL_PLANE: f32 = -40.0;

const SPAWN: Vec2 = Vec2::new(0.0, 3.0);
const PLAYER_SIZE: Vec2 = Vec2::new(1.0, 1.8);

/// What the player wants to do this step.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Controls {
    /// Arrow keys or WASD; jump is Up, W or Space.
    pub fn from_keys(input: &InputState) -> Self {
        Self {
            left: input.key_down(Key::ArrowLeft) || input.key_down(Key::Letter('A')),
            right: input.key_down(Key::ArrowRight) || input.key_down(Key::Letter('D')),
            jump: input.key_down(Key::ArrowUp)
                || input.key_down(Key::Letter('W'))
                || input.key_down(Key::Space),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub velocity: Vec2,
    pub on_ground: bool,
    pub controls: Controls,
}

impl Player {
    fn spawn() -> Self {
        Self {
            rect: Rect::centered(SPAWN, PLAYER_SIZE),
            velocity: Vec2::zero(),
            on_ground: false,
            controls: Controls::default(),
        }
    }

    /// Copies the held keys into the player's controls.
    pub fn keyboard_handler(&mut self, input: &InputState) {
        self.controls = Controls::from_keys(input);
    }

    pub fn color(&self) -> Color {
        Color::rgb(230, 60, 40)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestLevel {
    pub platforms: Vec<Platform>,
    pub player: Player,
}

impl Default for TestLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLevel {
    pub fn new() -> Self {
        let ground = Color::rgb(70, 140, 60);
        let ledge = Color::rgb(120, 90, 60);
        Self {
            platforms: vec![
                Platform { rect: Rect::new(-20.0, -1.0, 40.0, 1.0), color: ground },
                Platform { rect: Rect::new(4.0, 2.0, 5.0, 0.5), color: ledge },
                Platform { rect: Rect::new(-10.0, 4.0, 4.0, 0.5), color: ledge },
                Platform { rect: Rect::new(11.0, 5.0, 3.0, 0.5), color: ledge },
            ],
            player: Player::spawn(),
        }
    }

    /// Advances the simulation by `dt` seconds. A zero step changes nothing.
    pub fn step(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }

        let player = &mut self.player;
        let c = player.controls;

        player.velocity.x = (c.right as i8 - c.left as i8) as f32 * RUN_SPEED;
        if c.jump && player.on_ground {
            player.velocity.y = JUMP_SPEED;
        }
        player.velocity.y = (player.velocity.y - GRAVITY * dt).max(-MAX_FALL_SPEED);
        player.rect = player.rect.translated(player.velocity * dt);

        player.on_ground = false;
        for platform in &self.platforms {
            let Some(push) = player.rect.separation_from(platform.rect) else {
                continue;
            };
            player.rect = player.rect.translated(push);
            if push.y > 0.0 {
                player.on_ground = true;
                player.velocity.y = player.velocity.y.max(0.0);
            } else if push.y < 0.0 {
                player.velocity.y = player.velocity.y.min(0.0);
            } else {
                player.velocity.x = 0.0;
            }
        }

        if player.rect.max().y < KILL_PLANE {
            log::debug!("player fell out of the level, respawning");
            let controls = player.controls;
            *player = Player::spawn();
            player.controls = controls;
        }
    }
}

#[cfg(test)]
mod tests {
    use otl_engine::input::{InputEvent, KeyState};

    use super::*;

    fn settle(level: &mut TestLevel) {
        for _ in 0..240 {
            level.step(1.0 / 60.0);
        }
    }

    // ── step ─────────────────────────────────────────────────────────────

    #[test]
    fn zero_step_changes_nothing() {
        let mut level = TestLevel::new();
        level.player.controls = Controls { left: false, right: true, jump: true };
        let before = level.clone();
        level.step(0.0);
        assert_eq!(level, before);
    }

    #[test]
    fn player_lands_on_ground() {
        let mut level = TestLevel::new();
        settle(&mut level);
        assert!(level.player.on_ground);
        assert!((level.player.rect.min().y - 0.0).abs() < 1e-3);
        assert_eq!(level.player.velocity.y, 0.0);
    }

    #[test]
    fn running_moves_player() {
        let mut level = TestLevel::new();
        settle(&mut level);
        let x = level.player.rect.center().x;
        level.player.controls.right = true;
        for _ in 0..30 {
            level.step(1.0 / 60.0);
        }
        assert!(level.player.rect.center().x > x + 3.0);
    }

    #[test]
    fn jump_needs_ground() {
        let mut level = TestLevel::new();
        level.player.controls.jump = true;
        level.step(1.0 / 60.0);
        assert!(level.player.velocity.y < 0.0);

        settle(&mut level);
        level.player.controls.jump = true;
        level.step(1.0 / 60.0);
        assert!(level.player.velocity.y > 0.0);
    }

    #[test]
    fn falling_out_respawns() {
        let mut level = TestLevel::new();
        level.player.rect = Rect::centered(Vec2::new(100.0, -41.0), PLAYER_SIZE);
        level.step(0.1);
        assert_eq!(level.player.rect, Rect::centered(SPAWN, PLAYER_SIZE));
    }

    // ── controls ─────────────────────────────────────────────────────────

    #[test]
    fn controls_follow_held_keys() {
        let mut input = InputState::default();
        input.apply(&InputEvent::Key { key: Key::Letter('A'), state: KeyState::Pressed, repeat: false });
        input.apply(&InputEvent::Key { key: Key::Space, state: KeyState::Pressed, repeat: false });
        let c = Controls::from_keys(&input);
        assert_eq!(c, Controls { left: true, right: false, jump: true });
    }
}
