//! The frame loop tying world, editor, renderer and diagnostics together.
//!
//! # Invariants
//! - Update (actions, physics) runs strictly before draw (camera, render).
//! - Player actions that need a closest planet are dropped, not fatal,
//!   while none is known.

mod error;
mod game;

pub use error::GameError;
pub use game::Game;
