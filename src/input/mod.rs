use macroquad::prelude::*;

use crate::application::{InputEvent, PointerButton};

/// Function keys act on release, the same moment the classic editor did.
const KEY_BINDINGS: [(KeyCode, InputEvent); 6] = [
    (KeyCode::F1, InputEvent::ToggleRun),
    (KeyCode::F2, InputEvent::Clear),
    (KeyCode::F3, InputEvent::SaveRequest),
    (KeyCode::F4, InputEvent::LoadRequest),
    (KeyCode::F5, InputEvent::HelpRequest),
    (KeyCode::R, InputEvent::Randomize),
];

const BUTTON_BINDINGS: [(MouseButton, PointerButton); 2] = [
    (MouseButton::Left, PointerButton::Primary),
    (MouseButton::Right, PointerButton::Secondary),
];

/// Drain this frame's input into discrete events. Never blocks; returns an
/// empty queue apart from the pointer position when nothing happened.
pub fn poll_events() -> Vec<InputEvent> {
    let mut events = Vec::new();

    if is_quit_requested() {
        events.push(InputEvent::Quit);
    }

    events.extend(
        KEY_BINDINGS
            .iter()
            .filter(|(key, _)| is_key_released(*key))
            .map(|(_, event)| *event),
    );

    for (mouse, button) in BUTTON_BINDINGS {
        if is_mouse_button_pressed(mouse) {
            events.push(InputEvent::PointerDown(button));
        }
        if is_mouse_button_released(mouse) {
            events.push(InputEvent::PointerUp(button));
        }
    }

    let (_, wheel_y) = mouse_wheel();
    if wheel_y != 0.0 {
        events.push(InputEvent::Wheel(wheel_y));
    }

    let (x, y) = mouse_position();
    events.push(InputEvent::PointerMoved { x, y });

    events
}
