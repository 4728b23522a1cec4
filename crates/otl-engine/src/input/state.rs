use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState};

/// Held keys, held buttons and pointer position for the display.
///
/// The display folds every event into this before handing events to the
/// running phase, so `key_down` reflects the same frame the phase sees.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y, .. } => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton { button, state, x, y } => {
                self.pointer_pos = Some((*x, *y));
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            InputEvent::Quit | InputEvent::MouseWheel { .. } | InputEvent::Resized { .. } => {}
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Motion since `pointer_pos`, for platforms that only report absolute positions.
    pub fn motion_to(&self, x: f32, y: f32) -> (f32, f32) {
        match self.pointer_pos {
            Some((px, py)) => (x - px, y - py),
            None => (0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, repeat: false }
    }

    #[test]
    fn tracks_held_keys() {
        let mut s = InputState::default();
        s.apply(&press(Key::ArrowLeft));
        assert!(s.key_down(Key::ArrowLeft));
        s.apply(&InputEvent::Key { key: Key::ArrowLeft, state: KeyState::Released, repeat: false });
        assert!(!s.key_down(Key::ArrowLeft));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut s = InputState::default();
        s.apply(&press(Key::Space));
        s.apply(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 1.0,
            y: 2.0,
        });
        s.apply(&InputEvent::Focused(false));
        assert!(!s.key_down(Key::Space));
        assert!(!s.button_down(MouseButton::Left));
    }

    #[test]
    fn motion_is_relative_to_last_position() {
        let mut s = InputState::default();
        assert_eq!(s.motion_to(5.0, 5.0), (0.0, 0.0));
        s.apply(&InputEvent::PointerMoved { x: 5.0, y: 5.0, dx: 0.0, dy: 0.0 });
        assert_eq!(s.motion_to(8.0, 1.0), (3.0, -4.0));
    }
}
