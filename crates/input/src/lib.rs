//! Input mapping: raw keyboard and mouse events turned into held movement
//! keys and discrete player actions.
//!
//! # Invariants
//! - Movement is level-triggered, every other command edge-triggered.
//! - The game never sees raw events.

pub mod action;
pub mod bindings;

pub use action::{Action, InputFrame, MoveKeys};
pub use bindings::{InputState, Key, KeyBindings, MouseButton, RawEvent};
