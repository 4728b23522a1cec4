use anyhow::Result;

use otl_engine::core::{Lifetime, MicroApp, PhaseState};
use otl_engine::input::{InputEvent, Key, MouseButton};

use super::Shared;
use crate::camera::Camera;
use crate::level::TestLevel;

/// The main game. Runs until quit.
pub struct Game {
    state: PhaseState,
    level: TestLevel,
    camera: Camera,
    debug_overlay: bool,
}

impl Game {
    pub fn new(shared: &Shared) -> Self {
        let settings = &shared.settings;
        let mut state = shared.phase_state(Lifetime::Infinite);
        state.set_fps_cap(settings.timing.game_fps_cap());

        let debug_overlay = settings.game.debug_overlay;
        if debug_overlay {
            log::info!("debug overlay on (F3 toggles)");
        }

        Self {
            state,
            level: TestLevel::new(),
            camera: Camera::new(settings.game.camera_distance),
            debug_overlay,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn level(&self) -> &TestLevel {
        &self.level
    }

    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }
}

impl MicroApp for Game {
    fn name(&self) -> &str {
        "game"
    }

    fn state(&self) -> &PhaseState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PhaseState {
        &mut self.state
    }

    fn on_event(&mut self, event: &InputEvent) -> Result<()> {
        match *event {
            InputEvent::PointerMoved { dx, dy, .. } => {
                let screen = self.state.screen().borrow();
                if screen.input().button_down(MouseButton::Left) {
                    self.camera.pan(dx, dy, screen.size());
                }
            }
            InputEvent::MouseWheel { y, .. } => self.camera.zoom(y),
            ref ev if ev.is_key_press(Key::Letter('R')) => self.camera.reset(),
            ref ev if ev.is_key_press(Key::Function(3)) => {
                self.debug_overlay = !self.debug_overlay;
                log::info!("debug overlay {}", if self.debug_overlay { "on" } else { "off" });
            }
            _ => {}
        }
        Ok(())
    }

    fn step(&mut self, dt: f32) -> Result<()> {
        {
            let screen = self.state.screen().borrow();
            self.level.player.keyboard_handler(screen.input());
        }
        self.level.step(dt);
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let mut screen = self.state.screen().borrow_mut();
        let canvas = screen.canvas();
        self.camera.view(&self.level, canvas);
        if self.debug_overlay {
            self.camera.debug_view(&self.level, canvas);
        }
        Ok(())
    }
}
