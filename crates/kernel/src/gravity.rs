//! Inverse-square attraction toward planet centers.

use glam::Vec2;
use planetfall_common::{GravityConfig, PlanetId};

use crate::planet::Planet;

/// Pull of one planet on a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pull {
    pub planet: PlanetId,
    /// `G * mass / max(d², ε)`.
    pub magnitude: f32,
    /// Velocity change for this frame: magnitude along the unit direction to
    /// the planet center. Zero when the point sits exactly on the center.
    pub delta_v: Vec2,
}

/// `G * mass / max(distance_sq, ε)`. Never divides by zero.
#[inline]
pub fn force_magnitude(gravity: &GravityConfig, mass: f32, distance_sq: f32) -> f32 {
    gravity.constant * mass / distance_sq.max(gravity.min_distance_sq)
}

/// Pull of `planet` on a body at `position`.
pub fn pull(gravity: &GravityConfig, id: PlanetId, planet: &Planet, position: Vec2) -> Pull {
    let to_center = planet.position() - position;
    let magnitude = force_magnitude(gravity, planet.mass(), to_center.length_squared());
    Pull {
        planet: id,
        magnitude,
        delta_v: to_center.normalize_or_zero() * magnitude,
    }
}

/// Pull of every planet, in list order.
pub fn pulls<'a>(
    gravity: &'a GravityConfig,
    planets: &'a [Planet],
    position: Vec2,
) -> impl Iterator<Item = Pull> + 'a {
    planets
        .iter()
        .enumerate()
        .map(move |(i, planet)| pull(gravity, PlanetId(i), planet, position))
}

/// The planet pulling hardest on `position`. On equal force the planet
/// listed first wins.
pub fn strongest(gravity: &GravityConfig, planets: &[Planet], position: Vec2) -> Option<PlanetId> {
    let mut best: Option<Pull> = None;
    for p in pulls(gravity, planets, position) {
        if best.is_none_or(|b| p.magnitude > b.magnitude) {
            best = Some(p);
        }
    }
    best.map(|p| p.planet)
}
