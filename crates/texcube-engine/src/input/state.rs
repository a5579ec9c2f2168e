use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// Held keys/buttons and pointer position for one window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// `None` while the pointer is outside the window.
    pub pointer_pos: Option<Vec2>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the current state and records transitions in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered to unfocused windows.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(p) => self.pointer_pos = Some(*p),
            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton { button, state, pos } => {
                self.pointer_pos = Some(*pos);
                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }
        }

        frame.events.push(ev);
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton { button, state: MouseButtonState::Pressed, pos: Vec2::new(x, y) }
    }

    fn release(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton { button, state: MouseButtonState::Released, pos: Vec2::new(x, y) }
    }

    #[test]
    fn press_release_records_transitions() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, press(MouseButton::Left, 3.0, 4.0));
        assert!(st.button_down(MouseButton::Left));
        assert!(fr.buttons_pressed.contains(&MouseButton::Left));
        assert_eq!(st.pointer_pos, Some(Vec2::new(3.0, 4.0)));

        fr.clear();
        st.apply_event(&mut fr, release(MouseButton::Left, 5.0, 4.0));
        assert!(!st.button_down(MouseButton::Left));
        assert!(fr.buttons_released.contains(&MouseButton::Left));
        assert!(fr.buttons_pressed.is_empty());
    }

    #[test]
    fn repeated_key_press_is_one_transition() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let ev = InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, repeat: false };
        st.apply_event(&mut fr, ev.clone());
        fr.clear();
        st.apply_event(&mut fr, InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, repeat: true });
        assert!(!fr.key_pressed(Key::Escape));
        assert_eq!(fr.events.len(), 1);
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, press(MouseButton::Left, 0.0, 0.0));
        st.apply_event(&mut fr, InputEvent::Focused(false));
        assert!(st.buttons_down.is_empty());
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::PointerMoved(Vec2::new(1.0, 1.0)));
        st.apply_event(&mut fr, InputEvent::PointerLeft);
        assert_eq!(st.pointer_pos, None);
    }
}
