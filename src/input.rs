//! Pointer and key state over raw window events.
//!
//! Tracks the last known pointer position (mouse or first touch point),
//! per-frame pointer deltas for drag interaction, mouse button state, and
//! just-pressed keys. The pointer starts as `None` and stays that way until
//! the first cursor or touch event, so nothing downstream ever computes a
//! distance against a position that does not exist yet.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Input state tracking for the backdrop and the demo scenes.
#[derive(Debug, Default)]
pub struct Input {
    /// Last known pointer position in physical pixels, `None` before the
    /// first cursor/touch event.
    pointer: Option<Vec2>,
    /// Accumulated pointer movement since the last `begin_frame`.
    pointer_delta: Vec2,

    mouse_held: HashSet<MouseButton>,
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position, if any event has arrived yet.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Pointer movement accumulated this frame.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_delta
    }

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Called at the start of each frame to clear per-frame state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.pointer_delta = Vec2::ZERO;
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = Vec2::new(position.x as f32, position.y as f32);
                self.move_pointer(new_pos);
            }

            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started | TouchPhase::Moved => {
                    let new_pos = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                    self.move_pointer(new_pos);
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {}
            },

            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => {
                    self.mouse_held.insert(*button);
                }
                ElementState::Released => {
                    self.mouse_held.remove(button);
                }
            },

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            // No key repeat: only fire on the initial press.
                            if !self.keys_held.contains(&key) {
                                self.keys_pressed.insert(key);
                            }
                            self.keys_held.insert(key);
                        }
                        ElementState::Released => {
                            self.keys_held.remove(&key);
                        }
                    }
                }
            }

            _ => {}
        }
    }

    fn move_pointer(&mut self, new_pos: Vec2) {
        if let Some(old) = self.pointer {
            self.pointer_delta += new_pos - old;
        }
        self.pointer = Some(new_pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_is_none_until_first_event() {
        let input = Input::new();
        assert_eq!(input.pointer(), None);
        assert_eq!(input.pointer_delta(), Vec2::ZERO);
    }

    #[test]
    fn pointer_deltas_accumulate_within_a_frame() {
        let mut input = Input::new();
        input.move_pointer(Vec2::new(10.0, 10.0));
        // First event establishes the position without producing a delta.
        assert_eq!(input.pointer_delta(), Vec2::ZERO);

        input.move_pointer(Vec2::new(13.0, 10.0));
        input.move_pointer(Vec2::new(13.0, 14.0));
        assert_eq!(input.pointer(), Some(Vec2::new(13.0, 14.0)));
        assert_eq!(input.pointer_delta(), Vec2::new(3.0, 4.0));

        input.begin_frame();
        assert_eq!(input.pointer_delta(), Vec2::ZERO);
        assert_eq!(input.pointer(), Some(Vec2::new(13.0, 14.0)));
    }

    #[test]
    fn key_pressed_clears_on_begin_frame_but_held_persists() {
        let mut input = Input::new();
        input.keys_pressed.insert(KeyCode::KeyT);
        input.keys_held.insert(KeyCode::KeyT);

        assert!(input.key_pressed(KeyCode::KeyT));
        input.begin_frame();
        assert!(!input.key_pressed(KeyCode::KeyT));
        assert!(input.keys_held.contains(&KeyCode::KeyT));
    }

    #[test]
    fn mouse_held_tracks_press_and_release() {
        let mut input = Input::new();
        assert!(!input.mouse_held(MouseButton::Left));
        input.mouse_held.insert(MouseButton::Left);
        assert!(input.mouse_held(MouseButton::Left));
        input.mouse_held.remove(&MouseButton::Left);
        assert!(!input.mouse_held(MouseButton::Left));
    }
}
