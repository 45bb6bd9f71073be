use glam::Vec2;
use planetfall_common::{BlockType, GridCoord, PlanetId};
use planetfall_kernel::{BlockTarget, World};

/// World inspector for developer tooling.
///
/// Provides read-only queries against the world state for debugging,
/// profiling, and the diagnostics overlay.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &World) -> WorldSummary {
        WorldSummary {
            tick: world.tick(),
            planet_count: world.planets().len(),
            block_count: world.planets().iter().map(|p| p.block_count()).sum(),
            closest_planet: world.player().closest_planet(),
            pending_events: world.events().len(),
        }
    }

    /// One frame's diagnostics line.
    pub fn diagnostics(world: &World, fps: f32, blocks_rendered: usize) -> FrameDiagnostics {
        let position = world.player().position();
        FrameDiagnostics {
            fps,
            blocks_rendered,
            player_position: position,
            orientation_deg: world.orientation().angle(),
            nearest_block: world.nearest_block(position).ok().map(|t| t.coords),
        }
    }

    pub fn inspect_planet(world: &World, id: PlanetId) -> Option<PlanetInfo> {
        let planet = world.planet(id).ok()?;
        Some(PlanetInfo {
            id,
            name: planet.name().to_owned(),
            position: planet.position(),
            mass: planet.mass(),
            num_layers: planet.num_layers(),
            blocks_per_layer: planet.blocks_per_layer(),
            core_radius: planet.core_radius(),
            block_height: planet.block_height(),
            block_count: planet.block_count(),
        })
    }

    /// List every planet in generation order.
    pub fn list_planets(world: &World) -> Vec<PlanetInfo> {
        (0..world.planets().len())
            .filter_map(|i| Self::inspect_planet(world, PlanetId(i)))
            .collect()
    }

    pub fn inspect_block(world: &World, target: BlockTarget) -> Option<BlockInfo> {
        let block = world.planet(target.planet).ok()?.block(target.coords).ok()?;
        Some(BlockInfo {
            target,
            block_type: block.block_type,
            center: block.center(),
            longest_side: block.longest_side(),
        })
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSummary {
    pub tick: u64,
    pub planet_count: usize,
    pub block_count: usize,
    pub closest_planet: Option<PlanetId>,
    pub pending_events: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tick={} planets={} blocks={} pending_events={}",
            self.tick, self.planet_count, self.block_count, self.pending_events
        )?;
        match self.closest_planet {
            Some(id) => write!(f, " closest={id}"),
            None => f.write_str(" closest=none"),
        }
    }
}

/// Per-frame numbers shown to the developer.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDiagnostics {
    pub fps: f32,
    pub blocks_rendered: usize,
    pub player_position: Vec2,
    pub orientation_deg: f32,
    /// Grid coordinates of the closest planet's block nearest the player.
    pub nearest_block: Option<GridCoord>,
}

impl std::fmt::Display for FrameDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FPS: {:.0} | blocks rendered: {} | position: ({:.0}, {:.0}) | orientation: {:.0}°",
            self.fps,
            self.blocks_rendered,
            self.player_position.x,
            self.player_position.y,
            self.orientation_deg,
        )?;
        if let Some(coords) = self.nearest_block {
            write!(f, " | on planet: {coords}")?;
        }
        Ok(())
    }
}

/// Static facts about one planet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetInfo {
    pub id: PlanetId,
    pub name: String,
    pub position: Vec2,
    pub mass: f32,
    pub num_layers: u32,
    pub blocks_per_layer: u32,
    pub core_radius: u32,
    pub block_height: u32,
    pub block_count: usize,
}

impl std::fmt::Display for PlanetInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} \"{}\" at ({:.0}, {:.0}) mass={:e} layers={} blocks/layer={} core={} block_height={} blocks={}",
            self.id,
            self.name,
            self.position.x,
            self.position.y,
            self.mass,
            self.num_layers,
            self.blocks_per_layer,
            self.core_radius,
            self.block_height,
            self.block_count,
        )
    }
}

/// Detailed info about a single block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockInfo {
    pub target: BlockTarget,
    pub block_type: BlockType,
    pub center: Vec2,
    pub longest_side: f32,
}

impl std::fmt::Display for BlockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Block {} {} {} center=({:.1}, {:.1}) width={:.1}",
            self.target.planet,
            self.target.coords,
            self.block_type,
            self.center.x,
            self.center.y,
            self.longest_side,
        )
    }
}
