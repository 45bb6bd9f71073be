use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A discrete player command produced by the input layer.
///
/// The game consumes actions, never raw events. Cursor positions are in
/// viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Impulse away from the closest planet.
    Jump,
    /// Stop the frame loop.
    Quit,
    /// Fill the block under the cursor.
    PlaceBlock(Vec2),
    /// Replace the block under the cursor with air.
    BreakBlock(Vec2),
    /// Revert the last block edit.
    Undo,
    /// Reapply the last reverted block edit.
    Redo,
}

/// Movement keys currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    /// Raw screen-space axis, each component in -1..=1.
    ///
    /// When opposite keys are both held, left and up win.
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.right {
            axis.x = 1.0;
        }
        if self.left {
            axis.x = -1.0;
        }
        if self.down {
            axis.y = 1.0;
        }
        if self.up {
            axis.y = -1.0;
        }
        axis
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Everything the update phase needs from input for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub held: MoveKeys,
    pub actions: Vec<Action>,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn holding(held: MoveKeys) -> Self {
        Self {
            held,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn wants_quit(&self) -> bool {
        self.actions.contains(&Action::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_keys_map_to_axes() {
        let right = MoveKeys { right: true, ..MoveKeys::default() };
        assert_eq!(right.axis(), Vec2::new(1.0, 0.0));
        let up = MoveKeys { up: true, ..MoveKeys::default() };
        assert_eq!(up.axis(), Vec2::new(0.0, -1.0));
        assert_eq!(MoveKeys::default().axis(), Vec2::ZERO);
    }

    #[test]
    fn opposing_keys_left_and_up_win() {
        let all = MoveKeys {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        assert_eq!(all.axis(), Vec2::new(-1.0, -1.0));
        assert!(all.any());
    }

    #[test]
    fn quit_detection() {
        let frame = InputFrame::idle().with_action(Action::Jump);
        assert!(!frame.wants_quit());
        assert!(frame.with_action(Action::Quit).wants_quit());
    }
}
