use glam::Vec2;

use crate::planet::Planet;

/// Kinematic state handed to a collision strategy after each move step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Hook run after the player moves. Implementations may correct the body's
/// position and velocity against the planets.
pub trait CollisionStrategy: std::fmt::Debug {
    fn resolve(&self, body: &mut Body, planets: &[Planet]);
}

/// Leaves the body untouched: the player passes through terrain.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCollision;

impl CollisionStrategy for NoCollision {
    fn resolve(&self, _body: &mut Body, _planets: &[Planet]) {}
}
