//! Rendering adapter: renderer-agnostic interface plus a CPU backend.
//!
//! # Invariants
//! - Renderer cannot mutate world truth directly.
//! - Render state derives from world state and view.
//! - Only blocks inside the rotated render window are drawn; air never is.

pub mod draw;
pub mod error;
pub mod material;
mod renderer;
pub mod surface;
pub mod view;

pub use draw::{draw_planet, BlockTexturing};
pub use error::RenderError;
pub use material::{MaterialTable, Texture};
pub use renderer::{FrameStats, Renderer, SoftwareRenderer, DEFAULT_PLAYER_SIZE};
pub use surface::{Rgb, Surface};
pub use view::{RenderView, RenderWindow};
