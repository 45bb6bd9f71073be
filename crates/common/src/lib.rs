//! Shared value types for the planetfall engine: grid coordinates, block
//! tags, screen-angle math and session configuration.

pub mod angle;
pub mod config;
pub mod types;

pub use config::{
    ConfigError, GravityConfig, PlanetConfig, PlayerConfig, ViewportConfig, WorldConfig,
    DEFAULT_BLOCK_HEIGHT,
};
pub use types::{Aabb2, BlockType, GridCoord, PlanetId};
