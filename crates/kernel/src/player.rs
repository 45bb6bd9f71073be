use glam::Vec2;
use planetfall_common::angle::{bearing_deg, rotate_deg, UP};
use planetfall_common::{GravityConfig, PlanetId, PlayerConfig};

use crate::collision::{Body, CollisionStrategy};
use crate::error::WorldError;
use crate::gravity;
use crate::planet::Planet;

/// Scale a raw key axis (components in -1..=1) to a movement impulse.
///
/// Diagonals are normalized so every held direction has the same length.
pub fn input_impulse(axis: Vec2, speed: f32) -> Vec2 {
    if axis.length_squared() >= 1.0 {
        axis.normalize() * speed
    } else {
        axis
    }
}

/// The player body: continuous simulation under gravity and input.
///
/// The closest planet is an index into the world's planet list, refreshed
/// on every gravity step.
#[derive(Debug, Clone)]
pub struct Player {
    body: Body,
    config: PlayerConfig,
    closest_planet: Option<PlanetId>,
}

impl Player {
    pub fn new(position: Vec2, config: PlayerConfig) -> Self {
        Self {
            body: Body {
                position,
                velocity: Vec2::ZERO,
            },
            config,
            closest_planet: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.body.velocity = velocity;
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn closest_planet(&self) -> Option<PlanetId> {
        self.closest_planet
    }

    /// Clockwise angle from up to the player as seen from the closest
    /// planet's center. 0° when standing on top of the planet.
    pub fn bearing(&self, planets: &[Planet]) -> Result<f32, WorldError> {
        let planet = self.closest(planets)?;
        Ok(bearing_deg(self.body.position - planet.position()))
    }

    /// Re-evaluate the closest planet without touching velocity.
    pub fn track_closest(&mut self, planets: &[Planet], gravity: &GravityConfig) {
        self.closest_planet = gravity::strongest(gravity, planets, self.body.position);
    }

    /// Accumulate the pull of every planet into velocity and remember the
    /// planet pulling hardest.
    pub fn apply_gravity(&mut self, planets: &[Planet], gravity: &GravityConfig) {
        let mut strongest: Option<(PlanetId, f32)> = None;
        for pull in gravity::pulls(gravity, planets, self.body.position) {
            if strongest.is_none_or(|(_, max)| pull.magnitude > max) {
                strongest = Some((pull.planet, pull.magnitude));
            }
            self.body.velocity += pull.delta_v;
        }
        self.closest_planet = strongest.map(|(id, _)| id);
    }

    /// Add the held movement direction, turned so that screen-up points away
    /// from the closest planet. Without a planet the axis is used as is.
    pub fn apply_input(&mut self, axis: Vec2, planets: &[Planet]) {
        let mut impulse = input_impulse(axis, self.config.speed);
        if impulse == Vec2::ZERO {
            return;
        }
        if let Ok(bearing) = self.bearing(planets) {
            impulse = rotate_deg(impulse, bearing);
        }
        self.body.velocity += impulse;
    }

    /// Push the player away from the closest planet.
    pub fn jump(&mut self, planets: &[Planet]) -> Result<(), WorldError> {
        let bearing = self.bearing(planets)?;
        self.body.velocity += rotate_deg(UP, bearing) * self.config.jump_force;
        Ok(())
    }

    /// Apply drag, cap the speed and advance the position.
    pub fn integrate(&mut self, dt: f32) {
        self.body.velocity *= self.config.drag;
        if self.config.max_velocity > 0.0 {
            self.body.velocity = self.body.velocity.clamp_length_max(self.config.max_velocity);
        }
        self.body.position += self.body.velocity * dt * self.config.time_scale;
    }

    pub fn resolve_collisions(&mut self, strategy: &dyn CollisionStrategy, planets: &[Planet]) {
        strategy.resolve(&mut self.body, planets);
    }

    fn closest<'p>(&self, planets: &'p [Planet]) -> Result<&'p Planet, WorldError> {
        let id = self.closest_planet.ok_or(WorldError::NoClosestPlanet)?;
        planets.get(id.0).ok_or(WorldError::UnknownPlanet(id))
    }
}
