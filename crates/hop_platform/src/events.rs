//! Translation from winit window events to the engine's input events.

use hop_core::input::{InputEvent, Key};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::NumpadEnter => Some(Key::KpEnter),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

/// OS auto-repeat is dropped: a held key produces one key-down and one key-up.
pub fn key_input(key_code: KeyCode, state: ElementState, repeat: bool) -> Option<InputEvent> {
    if repeat {
        return None;
    }
    let key = map_key(key_code)?;
    Some(match state {
        ElementState::Pressed => InputEvent::key_down(key),
        ElementState::Released => InputEvent::key_up(key),
    })
}

pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::Quit),
        WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
            PhysicalKey::Code(key_code) => key_input(key_code, event.state, event.repeat),
            PhysicalKey::Unidentified(_) => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_enter_keys_are_mapped_separately() {
        assert_eq!(map_key(KeyCode::Enter), Some(Key::Enter));
        assert_eq!(map_key(KeyCode::NumpadEnter), Some(Key::KpEnter));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(map_key(KeyCode::KeyQ), None);
        assert_eq!(key_input(KeyCode::KeyQ, ElementState::Pressed, false), None);
    }

    #[test]
    fn press_and_release_become_key_down_and_key_up() {
        assert_eq!(
            key_input(KeyCode::ArrowLeft, ElementState::Pressed, false),
            Some(InputEvent::key_down(Key::Left))
        );
        assert_eq!(
            key_input(KeyCode::ArrowLeft, ElementState::Released, false),
            Some(InputEvent::key_up(Key::Left))
        );
    }

    #[test]
    fn auto_repeat_is_dropped() {
        assert_eq!(key_input(KeyCode::Space, ElementState::Pressed, true), None);
    }

    #[test]
    fn close_request_is_quit() {
        assert_eq!(
            translate_window_event(&WindowEvent::CloseRequested),
            Some(InputEvent::Quit)
        );
        assert_eq!(translate_window_event(&WindowEvent::Focused(true)), None);
    }
}
