use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys the runner and its phases react to get named variants; the
/// rest arrive as `Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// Latin letter, always uppercase (`'A'..='Z'`).
    Letter(char),

    /// Top-row digit `0..=9`.
    Digit(u8),

    /// Function key `F1..=F12`.
    Function(u8),

    Unknown(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Letter(c) => write!(f, "{c}"),
            Key::Digit(d) => write!(f, "{d}"),
            Key::Function(n) => write!(f, "F{n}"),
            Key::Unknown(code) => write!(f, "Unknown({code})"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Events drained from the display once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The user asked to close the program. Handled by the driver, never
    /// delivered to phases.
    Quit,

    Key {
        key: Key,
        state: KeyState,
        /// True for auto-repeat presses.
        repeat: bool,
    },

    /// Pointer position in logical pixels, with motion since the previous
    /// position (`dx`, `dy` are zero for the first sample).
    PointerMoved { x: f32, y: f32, dx: f32, dy: f32 },

    PointerButton {
        button: MouseButton,
        state: MouseButtonState,
        x: f32,
        y: f32,
    },

    /// Wheel motion in lines; positive `y` scrolls up / away from the user.
    MouseWheel { x: f32, y: f32 },

    /// Pointer left the window.
    PointerLeft,

    Focused(bool),

    /// New drawable size in logical pixels.
    Resized { width: f32, height: f32 },
}

impl InputEvent {
    #[inline]
    pub fn is_quit(&self) -> bool {
        matches!(self, InputEvent::Quit)
    }

    /// True for a fresh (non-repeat) press of `key`.
    #[inline]
    pub fn is_key_press(&self, key: Key) -> bool {
        matches!(
            self,
            InputEvent::Key { key: k, state: KeyState::Pressed, repeat: false } if *k == key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_is_not_a_fresh_press() {
        let ev = InputEvent::Key { key: Key::Letter('R'), state: KeyState::Pressed, repeat: true };
        assert!(!ev.is_key_press(Key::Letter('R')));
    }

    #[test]
    fn key_display_names() {
        assert_eq!(Key::Function(3).to_string(), "F3");
        assert_eq!(Key::Letter('R').to_string(), "R");
        assert_eq!(Key::Escape.to_string(), "Escape");
    }
}
