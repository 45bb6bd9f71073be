//! Planet kernel: authoritative world state, procedural planets, gravity and
//! player physics, screen orientation.
//!
//! # Invariants
//! - Block geometry is fixed at generation; only block types change.
//! - The closest planet is an index recomputed every gravity step.
//! - All world mutations flow through explicit operations and are logged.

pub mod block;
pub mod camera;
pub mod collision;
pub mod error;
pub mod gravity;
pub mod planet;
pub mod player;
pub mod world;

pub use block::Block;
pub use camera::ScreenOrientation;
pub use collision::{Body, CollisionStrategy, NoCollision};
pub use error::{PlanetError, WorldError};
pub use planet::Planet;
pub use player::Player;
pub use world::{BlockTarget, World, WorldEvent};
