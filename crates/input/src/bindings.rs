use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::action::{Action, InputFrame, MoveKeys};

/// A keyboard key as reported by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Space,
    Escape,
}

impl Key {
    /// Letters compare case-insensitively.
    fn normalized(self) -> Self {
        match self {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Raw event delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RawEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseDown { button: MouseButton, cursor: Vec2 },
    CloseRequested,
}

/// Which physical controls drive which logical inputs.
///
/// Defaults follow an AZERTY layout: z/q/s/d to move, space to jump,
/// escape to quit, u/y to undo/redo edits, left click to place, right click
/// to break.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
    pub jump: Key,
    pub exit: Key,
    pub undo: Key,
    pub redo: Key,
    pub place: MouseButton,
    pub break_block: MouseButton,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: Key::Char('z'),
            down: Key::Char('s'),
            left: Key::Char('q'),
            right: Key::Char('d'),
            jump: Key::Space,
            exit: Key::Escape,
            undo: Key::Char('u'),
            redo: Key::Char('y'),
            place: MouseButton::Left,
            break_block: MouseButton::Right,
        }
    }
}

/// Accumulates raw events between frames.
///
/// Movement keys are level-triggered (held state), everything else is
/// edge-triggered and queued as actions until the next [`InputState::take_frame`].
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    held: MoveKeys,
    pending: Vec<Action>,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: MoveKeys::default(),
            pending: Vec::new(),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn held(&self) -> MoveKeys {
        self.held
    }

    pub fn handle(&mut self, event: RawEvent) {
        match event {
            RawEvent::KeyDown(key) => self.key(key, true),
            RawEvent::KeyUp(key) => self.key(key, false),
            RawEvent::MouseDown { button, cursor } => {
                if button == self.bindings.place {
                    self.pending.push(Action::PlaceBlock(cursor));
                } else if button == self.bindings.break_block {
                    self.pending.push(Action::BreakBlock(cursor));
                }
            }
            RawEvent::CloseRequested => self.pending.push(Action::Quit),
        }
    }

    /// Snapshot held keys and drain queued actions.
    pub fn take_frame(&mut self) -> InputFrame {
        InputFrame {
            held: self.held,
            actions: std::mem::take(&mut self.pending),
        }
    }

    fn key(&mut self, key: Key, pressed: bool) {
        let key = key.normalized();
        let b = self.bindings;
        if key == b.up.normalized() {
            self.held.up = pressed;
        } else if key == b.down.normalized() {
            self.held.down = pressed;
        } else if key == b.left.normalized() {
            self.held.left = pressed;
        } else if key == b.right.normalized() {
            self.held.right = pressed;
        } else if pressed && key == b.jump.normalized() {
            self.pending.push(Action::Jump);
        } else if pressed && key == b.exit.normalized() {
            self.pending.push(Action::Quit);
        } else if pressed && key == b.undo.normalized() {
            self.pending.push(Action::Undo);
        } else if pressed && key == b.redo.normalized() {
            self.pending.push(Action::Redo);
        } else if pressed {
            tracing::trace!(?key, "unbound key");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_persist_across_frames() {
        let mut input = InputState::default();
        input.handle(RawEvent::KeyDown(Key::Char('d')));
        assert!(input.take_frame().held.right);
        assert!(input.take_frame().held.right);
        input.handle(RawEvent::KeyUp(Key::Char('d')));
        assert!(!input.take_frame().held.right);
    }

    #[test]
    fn letters_are_case_insensitive() {
        let mut input = InputState::default();
        input.handle(RawEvent::KeyDown(Key::Char('Z')));
        assert!(input.held().up);
    }

    #[test]
    fn triggers_are_queued_once() {
        let mut input = InputState::default();
        input.handle(RawEvent::KeyDown(Key::Space));
        input.handle(RawEvent::KeyUp(Key::Space));
        let frame = input.take_frame();
        assert_eq!(frame.actions, vec![Action::Jump]);
        assert!(input.take_frame().actions.is_empty());
    }

    #[test]
    fn mouse_buttons_map_to_block_edits() {
        let mut input = InputState::default();
        let at = Vec2::new(12.0, 34.0);
        input.handle(RawEvent::MouseDown { button: MouseButton::Left, cursor: at });
        input.handle(RawEvent::MouseDown { button: MouseButton::Right, cursor: at });
        input.handle(RawEvent::MouseDown { button: MouseButton::Middle, cursor: at });
        assert_eq!(
            input.take_frame().actions,
            vec![Action::PlaceBlock(at), Action::BreakBlock(at)]
        );
    }

    #[test]
    fn undo_and_redo_keys() {
        let mut input = InputState::default();
        input.handle(RawEvent::KeyDown(Key::Char('u')));
        input.handle(RawEvent::KeyDown(Key::Char('Y')));
        assert_eq!(input.take_frame().actions, vec![Action::Undo, Action::Redo]);
    }

    #[test]
    fn escape_and_close_quit() {
        let mut input = InputState::default();
        input.handle(RawEvent::KeyDown(Key::Escape));
        assert!(input.take_frame().wants_quit());
        input.handle(RawEvent::CloseRequested);
        assert!(input.take_frame().wants_quit());
    }

    #[test]
    fn custom_bindings() {
        let bindings = KeyBindings {
            up: Key::Char('w'),
            left: Key::Char('a'),
            ..KeyBindings::default()
        };
        let mut input = InputState::new(bindings);
        input.handle(RawEvent::KeyDown(Key::Char('w')));
        input.handle(RawEvent::KeyDown(Key::Char('a')));
        input.handle(RawEvent::KeyDown(Key::Char('z')));
        let held = input.take_frame().held;
        assert!(held.up && held.left);
        assert_eq!(held.axis(), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn bindings_deserialize_partially() {
        let b: KeyBindings = serde_json::from_str(r#"{ "jump": { "Char": "j" } }"#).unwrap();
        assert_eq!(b.jump, Key::Char('j'));
        assert_eq!(b.exit, Key::Escape);
    }
}
