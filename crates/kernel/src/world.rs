use glam::Vec2;
use planetfall_common::angle::rotate_deg;
use planetfall_common::{BlockType, GravityConfig, GridCoord, PlanetId, ViewportConfig, WorldConfig};
use serde::{Deserialize, Serialize};

use crate::camera::ScreenOrientation;
use crate::collision::{CollisionStrategy, NoCollision};
use crate::error::WorldError;
use crate::planet::Planet;
use crate::player::Player;

/// An event record produced by every mutation of the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// A block changed type. Edits that keep the type are not recorded.
    BlockChanged {
        planet: PlanetId,
        coords: GridCoord,
        old: BlockType,
        new: BlockType,
    },
    /// A planet was generated again from scratch.
    PlanetRegenerated { planet: PlanetId },
    /// The planet pulling hardest on the player changed.
    ClosestPlanetChanged {
        from: Option<PlanetId>,
        to: Option<PlanetId>,
    },
    /// The player jumped off a planet.
    Jumped { planet: PlanetId },
    /// Simulation advanced one tick.
    Stepped { tick: u64 },
}

/// Address of one block in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockTarget {
    pub planet: PlanetId,
    pub coords: GridCoord,
}

/// The authoritative world state: every planet, the player and the screen
/// orientation derived from them.
///
/// All mutations go through explicit operations and leave a record in the
/// event log. Renderers and tools only read from it.
#[derive(Debug)]
pub struct World {
    viewport: ViewportConfig,
    gravity: GravityConfig,
    planets: Vec<Planet>,
    player: Player,
    orientation: ScreenOrientation,
    collision: Box<dyn CollisionStrategy>,
    tick: u64,
    /// Append-only event log of all mutations.
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Validate the configuration and generate every planet.
    pub fn new(config: &WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let planets = config
            .planets
            .iter()
            .map(Planet::new)
            .collect::<Result<Vec<_>, _>>()?;

        let mut player = Player::new(config.player_start, config.player);
        player.track_closest(&planets, &config.gravity);
        let orientation = ScreenOrientation::new(player.bearing(&planets).unwrap_or(0.0));

        tracing::info!(
            planets = planets.len(),
            player = ?config.player_start,
            closest = ?player.closest_planet(),
            "world created"
        );

        Ok(Self {
            viewport: config.viewport,
            gravity: config.gravity,
            planets,
            player,
            orientation,
            collision: Box::new(NoCollision),
            tick: 0,
            event_log: Vec::new(),
        })
    }

    /// Replace the collision hook run after each move step.
    pub fn with_collision(mut self, strategy: Box<dyn CollisionStrategy>) -> Self {
        self.collision = strategy;
        self
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planet(&self, id: PlanetId) -> Result<&Planet, WorldError> {
        self.planets.get(id.0).ok_or(WorldError::UnknownPlanet(id))
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn orientation(&self) -> &ScreenOrientation {
        &self.orientation
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// The planet evaluated as closest on the last gravity step.
    pub fn closest_planet(&self) -> Result<(PlanetId, &Planet), WorldError> {
        let id = self
            .player
            .closest_planet()
            .ok_or(WorldError::NoClosestPlanet)?;
        Ok((id, self.planet(id)?))
    }

    /// The player's bearing on the closest planet.
    pub fn bearing(&self) -> Result<f32, WorldError> {
        self.player.bearing(&self.planets)
    }

    /// Advance the player one frame: gravity, held movement keys, move,
    /// collision hook.
    ///
    /// `move_axis` holds the raw key axes, each component in -1..=1.
    pub fn step(&mut self, move_axis: Vec2, dt: f32) {
        let before = self.player.closest_planet();

        self.player.apply_gravity(&self.planets, &self.gravity);
        self.player.apply_input(move_axis, &self.planets);
        self.player.integrate(dt);
        self.player
            .resolve_collisions(self.collision.as_ref(), &self.planets);

        let after = self.player.closest_planet();
        if before != after {
            tracing::debug!(?before, ?after, "closest planet changed");
            self.event_log.push(WorldEvent::ClosestPlanetChanged {
                from: before,
                to: after,
            });
        }

        self.tick += 1;
        self.event_log.push(WorldEvent::Stepped { tick: self.tick });
        tracing::trace!(
            tick = self.tick,
            position = ?self.player.position(),
            velocity = ?self.player.velocity(),
            "world step"
        );
    }

    pub fn jump(&mut self) -> Result<(), WorldError> {
        let (planet, _) = self.closest_planet()?;
        self.player.jump(&self.planets)?;
        self.event_log.push(WorldEvent::Jumped { planet });
        Ok(())
    }

    /// Ease the screen orientation toward the player's bearing. Holds the
    /// current angle while no planet is known.
    pub fn update_camera(&mut self) -> f32 {
        match self.bearing() {
            Ok(bearing) => self.orientation.advance(bearing),
            Err(_) => self.orientation.angle(),
        }
    }

    /// World position under a cursor given in viewport pixels.
    ///
    /// Undoes the screen rotation around the viewport center, which is
    /// where the player is drawn.
    pub fn cursor_to_world(&self, cursor: Vec2) -> Vec2 {
        rotate_deg(cursor - self.viewport.half(), self.orientation.angle())
            + self.player.position()
    }

    /// Block of the closest planet nearest to `point`.
    pub fn nearest_block(&self, point: Vec2) -> Result<BlockTarget, WorldError> {
        let (id, planet) = self.closest_planet()?;
        let block = planet
            .closest_block(point)
            .ok_or(WorldError::NoBlockNearby(id))?;
        Ok(BlockTarget {
            planet: id,
            coords: block.coords(),
        })
    }

    /// Block under a cursor in viewport pixels.
    pub fn block_at_cursor(&self, cursor: Vec2) -> Result<BlockTarget, WorldError> {
        self.nearest_block(self.cursor_to_world(cursor))
    }

    pub fn block_type(&self, target: BlockTarget) -> Result<BlockType, WorldError> {
        Ok(self.planet(target.planet)?.block_type(target.coords)?)
    }

    /// Change a block's type and return the previous one.
    pub fn set_block(
        &mut self,
        target: BlockTarget,
        block_type: BlockType,
    ) -> Result<BlockType, WorldError> {
        let planet = self
            .planets
            .get_mut(target.planet.0)
            .ok_or(WorldError::UnknownPlanet(target.planet))?;
        let old = planet.set_block(target.coords, block_type)?;
        if old != block_type {
            tracing::debug!(
                planet = %target.planet,
                coords = %target.coords,
                %old,
                new = %block_type,
                "block changed"
            );
            self.event_log.push(WorldEvent::BlockChanged {
                planet: target.planet,
                coords: target.coords,
                old,
                new: block_type,
            });
        }
        Ok(old)
    }

    pub fn regenerate_planet(&mut self, id: PlanetId) -> Result<(), WorldError> {
        let planet = self
            .planets
            .get_mut(id.0)
            .ok_or(WorldError::UnknownPlanet(id))?;
        planet.regenerate();
        self.event_log
            .push(WorldEvent::PlanetRegenerated { planet: id });
        Ok(())
    }
}
