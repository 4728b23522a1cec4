//! winit → [`InputEvent`] translation.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::{InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState};

/// Pixels per wheel "line" when a touchpad reports pixel deltas.
const PIXELS_PER_LINE: f32 = 40.0;

/// Translates one window event. `scale` is the window's DPI scale factor.
///
/// `state` must not have seen this event yet: pointer motion is computed
/// against its last known position.
pub(crate) fn translate(event: &WindowEvent, state: &InputState, scale: f64) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(InputEvent::Quit),

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::Resized(size) => {
            let logical = size.to_logical::<f64>(scale);
            Some(InputEvent::Resized {
                width: logical.width as f32,
                height: logical.height as f32,
            })
        }

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical(*position, scale);
            let (dx, dy) = state.motion_to(x, y);
            Some(InputEvent::PointerMoved { x, y, dx, dy })
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let (x, y) = state.pointer_pos.unwrap_or((0.0, 0.0));
            Some(InputEvent::PointerButton {
                button: map_mouse_button(*button),
                state: match st {
                    ElementState::Pressed => MouseButtonState::Pressed,
                    ElementState::Released => MouseButtonState::Released,
                },
                x,
                y,
            })
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(p) => {
                    let (x, y) = to_logical(*p, scale);
                    (x / PIXELS_PER_LINE, y / PIXELS_PER_LINE)
                }
            };
            Some(InputEvent::MouseWheel { x, y })
        }

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
            repeat: event.repeat,
        }),

        _ => None,
    }
}

fn to_logical(pos: PhysicalPosition<f64>, scale: f64) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale);
    (logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Space => Key::Space,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::F1 => Key::Function(1),
        KeyCode::F2 => Key::Function(2),
        KeyCode::F3 => Key::Function(3),
        KeyCode::F4 => Key::Function(4),
        KeyCode::F5 => Key::Function(5),
        KeyCode::F6 => Key::Function(6),
        KeyCode::F7 => Key::Function(7),
        KeyCode::F8 => Key::Function(8),
        KeyCode::F9 => Key::Function(9),
        KeyCode::F10 => Key::Function(10),
        KeyCode::F11 => Key::Function(11),
        KeyCode::F12 => Key::Function(12),

        KeyCode::KeyA => Key::Letter('A'),
        KeyCode::KeyB => Key::Letter('B'),
        KeyCode::KeyC => Key::Letter('C'),
        KeyCode::KeyD => Key::Letter('D'),
        KeyCode::KeyE => Key::Letter('E'),
        KeyCode::KeyF => Key::Letter('F'),
        KeyCode::KeyG => Key::Letter('G'),
        KeyCode::KeyH => Key::Letter('H'),
        KeyCode::KeyI => Key::Letter('I'),
        KeyCode::KeyJ => Key::Letter('J'),
        KeyCode::KeyK => Key::Letter('K'),
        KeyCode::KeyL => Key::Letter('L'),
        KeyCode::KeyM => Key::Letter('M'),
        KeyCode::KeyN => Key::Letter('N'),
        KeyCode::KeyO => Key::Letter('O'),
        KeyCode::KeyP => Key::Letter('P'),
        KeyCode::KeyQ => Key::Letter('Q'),
        KeyCode::KeyR => Key::Letter('R'),
        KeyCode::KeyS => Key::Letter('S'),
        KeyCode::KeyT => Key::Letter('T'),
        KeyCode::KeyU => Key::Letter('U'),
        KeyCode::KeyV => Key::Letter('V'),
        KeyCode::KeyW => Key::Letter('W'),
        KeyCode::KeyX => Key::Letter('X'),
        KeyCode::KeyY => Key::Letter('Y'),
        KeyCode::KeyZ => Key::Letter('Z'),

        KeyCode::Digit0 => Key::Digit(0),
        KeyCode::Digit1 => Key::Digit(1),
        KeyCode::Digit2 => Key::Digit(2),
        KeyCode::Digit3 => Key::Digit(3),
        KeyCode::Digit4 => Key::Digit(4),
        KeyCode::Digit5 => Key::Digit(5),
        KeyCode::Digit6 => Key::Digit(6),
        KeyCode::Digit7 => Key::Digit(7),
        KeyCode::Digit8 => Key::Digit(8),
        KeyCode::Digit9 => Key::Digit(9),

        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_resolve() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyR)), Key::Letter('R'));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Digit7)), Key::Digit(7));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::F3)), Key::Function(3));
    }

    #[test]
    fn unrelated_codes_are_unknown() {
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::CapsLock)), Key::Unknown(_)));
    }
}
