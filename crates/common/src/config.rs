//! Configuration for a session: viewport, player tuning, gravity and the
//! planets to generate.
//!
//! Defaults reproduce the stock single-planet scene. Every struct
//! deserializes with `#[serde(default)]` so partial JSON files work.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Height of a planet block in world units when a planet does not say otherwise.
pub const DEFAULT_BLOCK_HEIGHT: u32 = 90;

/// Errors raised while validating configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("viewport must be at least 1x1, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("{field} must be a finite number in {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        value: f32,
    },
}

/// Size of the visible output frame, in pixels.
///
/// Everything derived from the screen size (render window, the oversized
/// internal surface, the calibration offset) is computed from this value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 800,
        }
    }
}

impl ViewportConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn half(&self) -> Vec2 {
        self.size() * 0.5
    }

    pub fn diagonal(&self) -> f32 {
        self.size().length()
    }

    /// Side of the square internal surface. A square this large can be
    /// rotated by any angle and still cover the whole viewport.
    pub fn internal_side(&self) -> u32 {
        self.diagonal().ceil() as u32
    }

    /// Offset that places the viewport center at the center of the internal
    /// surface. Added to every world-to-scene translation.
    pub fn calibration(&self) -> Vec2 {
        let d = self.diagonal();
        Vec2::new((d - self.width as f32) / 2.0, (d - self.height as f32) / 2.0) + self.half()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Tuning constants for the player body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Velocity added per frame while a movement key is held.
    pub speed: f32,
    /// Impulse added by a jump.
    pub jump_force: f32,
    /// Per-frame velocity multiplier, in (0, 1].
    pub drag: f32,
    /// Velocity magnitude cap. Zero disables the cap.
    pub max_velocity: f32,
    /// Converts simulation velocity into world units per second.
    pub time_scale: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            jump_force: 20.0,
            drag: 0.9,
            max_velocity: 80.0,
            time_scale: 50.0,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("player.speed", "[0, inf)", self.speed, |v| v >= 0.0)?;
        check("player.jump_force", "[0, inf)", self.jump_force, |v| v >= 0.0)?;
        check("player.drag", "(0, 1]", self.drag, |v| v > 0.0 && v <= 1.0)?;
        check("player.max_velocity", "[0, inf)", self.max_velocity, |v| v >= 0.0)?;
        check("player.time_scale", "(0, inf)", self.time_scale, |v| v > 0.0)?;
        Ok(())
    }
}

/// Inverse-square gravity constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    pub constant: f32,
    /// Lower bound on the squared distance, keeps the force finite at a
    /// planet's center.
    pub min_distance_sq: f32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            constant: 6.67e-11,
            min_distance_sq: 1e-5,
        }
    }
}

impl GravityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("gravity.constant", "[0, inf)", self.constant, |v| v >= 0.0)?;
        check("gravity.min_distance_sq", "(0, inf)", self.min_distance_sq, |v| v > 0.0)?;
        Ok(())
    }
}

/// Parameters of one procedurally generated planet.
///
/// `blocks_per_layer` and `core_radius` are derived from `num_layers` when
/// left unset. Positivity is checked when the planet is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    pub name: String,
    pub position: Vec2,
    pub mass: f32,
    pub num_layers: u32,
    pub blocks_per_layer: Option<u32>,
    pub core_radius: Option<u32>,
    pub block_height: u32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            name: "Planet 1".into(),
            position: Vec2::new(1000.0, 500.0),
            mass: 6e15,
            num_layers: 50,
            blocks_per_layer: None,
            core_radius: None,
            block_height: DEFAULT_BLOCK_HEIGHT,
        }
    }
}

/// Everything needed to start a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub viewport: ViewportConfig,
    pub player: PlayerConfig,
    pub player_start: Vec2,
    pub gravity: GravityConfig,
    pub planets: Vec<PlanetConfig>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            player: PlayerConfig::default(),
            player_start: Vec2::new(1000.0, -3110.0),
            gravity: GravityConfig::default(),
            planets: vec![PlanetConfig::default()],
        }
    }
}

impl WorldConfig {
    /// Validate the scalar settings. Planet grids are validated by the
    /// planet constructor, which knows the derived defaults.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewport.validate()?;
        self.player.validate()?;
        self.gravity.validate()?;
        if !self.player_start.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "player_start",
                range: "finite",
                value: f32::NAN,
            });
        }
        Ok(())
    }
}

fn check(
    field: &'static str,
    range: &'static str,
    value: f32,
    ok: impl Fn(f32) -> bool,
) -> Result<(), ConfigError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            range,
            value,
        })
    }
}
