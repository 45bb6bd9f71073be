use glam::Vec2;
use planetfall_common::angle::{rotate_deg, UP};
use planetfall_common::{BlockType, GridCoord, PlanetConfig};

use crate::block::Block;
use crate::error::PlanetError;

/// Material of layer `y` on a planet with `num_layers` layers whose core
/// covers every layer up to and including `core_layer`.
///
/// Returns `None` inside the core: those slots are drawn as the core disc,
/// never as blocks. From the inside out the crust is stone, three layers of
/// dirt, one layer of grass, then ten layers of air up to the last layer.
pub fn layer_material(y: u32, core_layer: u32, num_layers: u32) -> Option<BlockType> {
    if y == 0 || y <= core_layer || y > num_layers {
        return None;
    }
    let (y, top) = (i64::from(y), i64::from(num_layers));
    let ty = if y < top - 14 {
        BlockType::Stone
    } else if y < top - 11 {
        BlockType::Dirt
    } else if y < top - 10 {
        BlockType::Grass
    } else {
        BlockType::Air
    };
    Some(ty)
}

/// A circular planet made of a radial grid of blocks around a solid core.
///
/// Slots are stored layer by layer, outward from layer 1, each layer
/// clockwise from up: slot `x + (y - 1) * blocks_per_layer` holds `(x, y)`.
/// Slots inside the core are `None`.
#[derive(Debug, Clone)]
pub struct Planet {
    name: String,
    position: Vec2,
    mass: f32,
    num_layers: u32,
    blocks_per_layer: u32,
    core_radius: u32,
    block_height: u32,
    slots: Vec<Option<Block>>,
}

impl Planet {
    /// Validate the configuration, derive unset parameters and generate the
    /// blocks.
    pub fn new(config: &PlanetConfig) -> Result<Self, PlanetError> {
        let invalid = |field| PlanetError::InvalidParameter {
            planet: config.name.clone(),
            field,
        };

        if config.num_layers == 0 {
            return Err(invalid("num_layers"));
        }
        if config.block_height == 0 {
            return Err(invalid("block_height"));
        }
        if !config.mass.is_finite() || config.mass < 0.0 {
            return Err(invalid("mass"));
        }
        let blocks_per_layer = match config.blocks_per_layer {
            None => config
                .num_layers
                .checked_mul(5)
                .ok_or_else(|| invalid("num_layers"))?,
            Some(0) => return Err(invalid("blocks_per_layer")),
            Some(n) => n,
        };
        let core_radius = match config.core_radius {
            None => (config.block_height as f32 * config.num_layers as f32 / 2.7).round() as u32,
            Some(0) => return Err(invalid("core_radius")),
            Some(r) => r,
        };

        let mut planet = Self {
            name: config.name.clone(),
            position: config.position,
            mass: config.mass,
            num_layers: config.num_layers,
            blocks_per_layer,
            core_radius,
            block_height: config.block_height,
            slots: Vec::new(),
        };
        planet.slots = planet.generate_blocks();

        tracing::info!(
            planet = %planet.name,
            layers = planet.num_layers,
            per_layer = planet.blocks_per_layer,
            core_radius = planet.core_radius,
            blocks = planet.block_count(),
            "generated planet"
        );
        Ok(planet)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn num_layers(&self) -> u32 {
        self.num_layers
    }

    pub fn blocks_per_layer(&self) -> u32 {
        self.blocks_per_layer
    }

    pub fn core_radius(&self) -> u32 {
        self.core_radius
    }

    pub fn block_height(&self) -> u32 {
        self.block_height
    }

    /// Highest layer that belongs to the core.
    pub fn core_layer(&self) -> u32 {
        self.core_radius / self.block_height
    }

    /// Distance from the center to the outer edge of the last layer.
    pub fn outer_radius(&self) -> f32 {
        self.num_layers as f32 * self.block_height as f32
    }

    /// Every slot, including the empty ones inside the core.
    pub fn slots(&self) -> &[Option<Block>] {
        &self.slots
    }

    /// Present blocks in generation order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.slots.iter().flatten()
    }

    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }

    /// Grid coordinate for a slot offset that may run past either end of a
    /// layer.
    pub fn wrap_coords(&self, x: i64, y: u32) -> GridCoord {
        let x = x.rem_euclid(i64::from(self.blocks_per_layer));
        GridCoord::new(x as u32, y)
    }

    /// Compute the geometry of the block at `(x, y)`.
    ///
    /// Use this to create blocks that do not exist yet. Existing blocks are
    /// changed with [`Planet::set_block`].
    pub fn generate_block(
        &self,
        x: u32,
        y: u32,
        block_type: BlockType,
    ) -> Result<Block, PlanetError> {
        if y == 0 {
            return Err(PlanetError::CoreLayer { x });
        }
        self.check_bounds(GridCoord::new(x, y))?;
        Ok(self.build_block(x, y, block_type))
    }

    /// Throw away every edit and generate the planet again.
    pub fn regenerate(&mut self) {
        self.slots = self.generate_blocks();
        tracing::debug!(planet = %self.name, "regenerated planet");
    }

    pub fn block(&self, coords: GridCoord) -> Result<&Block, PlanetError> {
        let index = self.slot_index(coords)?;
        self.slots[index]
            .as_ref()
            .ok_or(PlanetError::InsideCore(coords))
    }

    pub fn block_type(&self, coords: GridCoord) -> Result<BlockType, PlanetError> {
        self.block(coords).map(|b| b.block_type)
    }

    /// Change the type of an existing block. Returns the previous type.
    pub fn set_block(
        &mut self,
        coords: GridCoord,
        block_type: BlockType,
    ) -> Result<BlockType, PlanetError> {
        let index = self.slot_index(coords)?;
        let block = self.slots[index]
            .as_mut()
            .ok_or(PlanetError::InsideCore(coords))?;
        Ok(std::mem::replace(&mut block.block_type, block_type))
    }

    /// Replace the block with air. Breaking air is a no-op.
    pub fn break_block(&mut self, coords: GridCoord) -> Result<BlockType, PlanetError> {
        self.set_block(coords, BlockType::Air)
    }

    /// Block whose center is nearest to `point`. Ties go to the block
    /// generated first.
    pub fn closest_block(&self, point: Vec2) -> Option<&Block> {
        let mut best: Option<(&Block, f32)> = None;
        for block in self.blocks() {
            let d = block.center().distance_squared(point);
            if best.is_none_or(|(_, min)| d < min) {
                best = Some((block, d));
            }
        }
        best.map(|(block, _)| block)
    }

    fn slot_index(&self, coords: GridCoord) -> Result<usize, PlanetError> {
        if coords.y == 0 {
            return Err(PlanetError::InsideCore(coords));
        }
        self.check_bounds(coords)?;
        Ok(coords.x as usize + (coords.y as usize - 1) * self.blocks_per_layer as usize)
    }

    fn check_bounds(&self, coords: GridCoord) -> Result<(), PlanetError> {
        if coords.x >= self.blocks_per_layer || coords.y > self.num_layers {
            return Err(PlanetError::OutOfRange {
                coords,
                blocks_per_layer: self.blocks_per_layer,
                num_layers: self.num_layers,
            });
        }
        Ok(())
    }

    fn generate_blocks(&self) -> Vec<Option<Block>> {
        let core_layer = self.core_layer();
        let mut slots =
            Vec::with_capacity(self.num_layers as usize * self.blocks_per_layer as usize);
        for y in 1..=self.num_layers {
            for x in 0..self.blocks_per_layer {
                let slot = layer_material(y, core_layer, self.num_layers)
                    .map(|ty| self.build_block(x, y, ty));
                slots.push(slot);
            }
        }
        slots
    }

    fn build_block(&self, x: u32, y: u32, block_type: BlockType) -> Block {
        let step = 360.0 / self.blocks_per_layer as f32;
        let pointer = UP * self.block_height as f32;
        let left = rotate_deg(pointer, step * x as f32);
        let right = rotate_deg(pointer, step * (x + 1) as f32);
        let (outer, inner) = (y as f32, (y - 1) as f32);

        let a = left * outer + self.position;
        let b = right * outer + self.position;
        let c = right * inner + self.position;
        let d = left * inner + self.position;
        Block::new(GridCoord::new(x, y), [a, b, c, d], block_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(num_layers: u32) -> PlanetConfig {
        PlanetConfig {
            name: "test".into(),
            position: Vec2::new(100.0, -40.0),
            mass: 1e12,
            num_layers,
            ..PlanetConfig::default()
        }
    }

    fn small() -> Planet {
        Planet::new(&PlanetConfig {
            blocks_per_layer: Some(24),
            ..config(20)
        })
        .unwrap()
    }

    #[test]
    fn defaults_are_derived_from_layer_count() {
        let p = Planet::new(&config(50)).unwrap();
        assert_eq!(p.blocks_per_layer(), 250);
        assert_eq!(p.core_radius(), 1667);
        assert_eq!(p.core_layer(), 18);
    }

    #[test]
    fn slot_count_covers_every_layer() {
        let p = Planet::new(&config(50)).unwrap();
        assert_eq!(p.slots().len(), 250 * 50);
        assert!(p.blocks().all(|b| b.coords().y >= 1));
        // layers 1..=18 are inside the core
        assert_eq!(p.block_count(), 250 * (50 - 18));
    }

    #[test]
    fn slots_are_indexed_by_coordinates() {
        let p = small();
        for (i, slot) in p.slots().iter().enumerate() {
            if let Some(block) = slot {
                let c = block.coords();
                assert_eq!(c.x as usize + (c.y as usize - 1) * 24, i);
            }
        }
    }

    #[test]
    fn bounds_contain_center() {
        let p = small();
        for block in p.blocks() {
            assert!(block.bounds().contains(block.center()), "{}", block.coords());
        }
    }

    #[test]
    fn inner_edge_is_closer_than_outer_edge() {
        let p = small();
        for block in p.blocks() {
            let [a, b, c, d] = *block.corners();
            let center = p.position();
            assert!(d.distance(center) < a.distance(center));
            assert!(c.distance(center) < b.distance(center));
        }
    }

    #[test]
    fn blocks_wind_clockwise_on_screen() {
        let p = small();
        for block in p.blocks() {
            let pts = block.corners();
            let area: f32 = (0..4)
                .map(|i| pts[i].perp_dot(pts[(i + 1) % 4]))
                .sum();
            assert!(area > 0.0, "{} area={area}", block.coords());
        }
    }

    #[test]
    fn first_block_starts_straight_up() {
        let p = small();
        let block = p.block(GridCoord::new(0, 20)).unwrap();
        let a = block.corners()[0];
        let expected = p.position() + Vec2::new(0.0, -(20.0 * 90.0));
        assert!(a.distance(expected) < 1e-2);
        // the second corner lies clockwise, to the right of up
        assert!(block.corners()[1].x > a.x);
    }

    #[test]
    fn material_thresholds_for_fifty_layers() {
        let core = 18;
        assert_eq!(layer_material(0, core, 50), None);
        assert_eq!(layer_material(18, core, 50), None);
        assert_eq!(layer_material(19, core, 50), Some(BlockType::Stone));
        assert_eq!(layer_material(35, core, 50), Some(BlockType::Stone));
        for y in 36..39 {
            assert_eq!(layer_material(y, core, 50), Some(BlockType::Dirt));
        }
        assert_eq!(layer_material(39, core, 50), Some(BlockType::Grass));
        for y in 40..=50 {
            assert_eq!(layer_material(y, core, 50), Some(BlockType::Air));
        }
        assert_eq!(layer_material(51, core, 50), None);
    }

    #[test]
    fn material_rule_handles_thin_planets() {
        // fewer layers than the crust needs: no underflow, core still wins
        assert_eq!(layer_material(1, 3, 8), None);
        assert_eq!(layer_material(4, 3, 8), Some(BlockType::Air));
        assert_eq!(layer_material(1, 0, 12), Some(BlockType::Grass));
    }

    #[test]
    fn generated_types_follow_material_rule() {
        let p = small();
        for block in p.blocks() {
            let y = block.coords().y;
            assert_eq!(Some(block.block_type), layer_material(y, p.core_layer(), 20));
        }
    }

    #[test]
    fn generate_block_rejects_core_layer() {
        let p = small();
        assert_eq!(
            p.generate_block(3, 0, BlockType::Stone).unwrap_err(),
            PlanetError::CoreLayer { x: 3 }
        );
        assert!(p.generate_block(3, 21, BlockType::Stone).is_err());
        assert!(p.generate_block(3, 1, BlockType::Stone).is_ok());
    }

    #[test]
    fn non_positive_parameters_rejected() {
        let cases = [
            PlanetConfig { blocks_per_layer: Some(0), ..config(10) },
            PlanetConfig { core_radius: Some(0), ..config(10) },
            PlanetConfig { block_height: 0, ..config(10) },
            PlanetConfig { mass: -1.0, ..config(10) },
            config(0),
        ];
        for cfg in cases {
            let err = Planet::new(&cfg).unwrap_err();
            assert!(matches!(err, PlanetError::InvalidParameter { .. }), "{err}");
        }
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut p = small();
        let at = GridCoord::new(5, 12);
        let before = p.block_type(at).unwrap();
        let prev = p.set_block(at, BlockType::Grass).unwrap();
        assert_eq!(prev, before);
        assert_eq!(p.block_type(at).unwrap(), BlockType::Grass);
    }

    #[test]
    fn place_then_break_yields_air_and_break_is_idempotent() {
        let mut p = small();
        let at = GridCoord::new(7, 15);
        p.set_block(at, BlockType::Stone).unwrap();
        p.break_block(at).unwrap();
        assert_eq!(p.block_type(at).unwrap(), BlockType::Air);
        assert_eq!(p.break_block(at).unwrap(), BlockType::Air);
        assert_eq!(p.block_type(at).unwrap(), BlockType::Air);
    }

    #[test]
    fn edits_outside_grid_are_errors() {
        let mut p = small();
        assert!(matches!(
            p.set_block(GridCoord::new(24, 10), BlockType::Stone),
            Err(PlanetError::OutOfRange { .. })
        ));
        assert!(matches!(
            p.set_block(GridCoord::new(0, 21), BlockType::Stone),
            Err(PlanetError::OutOfRange { .. })
        ));
        assert_eq!(
            p.break_block(GridCoord::new(0, 0)),
            Err(PlanetError::InsideCore(GridCoord::new(0, 0)))
        );
        assert_eq!(
            p.break_block(GridCoord::new(0, 2)),
            Err(PlanetError::InsideCore(GridCoord::new(0, 2)))
        );
    }

    #[test]
    fn regenerate_discards_edits() {
        let mut p = small();
        let at = GridCoord::new(1, 20);
        p.set_block(at, BlockType::Stone).unwrap();
        p.regenerate();
        assert_eq!(p.block_type(at).unwrap(), BlockType::Air);
    }

    #[test]
    fn closest_block_finds_containing_cell() {
        let p = small();
        let target = p.block(GridCoord::new(6, 14)).unwrap();
        let found = p.closest_block(target.center() + Vec2::new(0.5, 0.5)).unwrap();
        assert_eq!(found.coords(), GridCoord::new(6, 14));
    }

    #[test]
    fn closest_block_to_center_is_in_first_crust_layer() {
        let p = small();
        let found = p.closest_block(p.position()).unwrap();
        assert_eq!(found.coords().y, p.core_layer() + 1);
        let best = p
            .blocks()
            .map(|b| b.center().distance_squared(p.position()))
            .fold(f32::INFINITY, f32::min);
        assert_eq!(found.center().distance_squared(p.position()), best);
    }

    #[test]
    fn wrap_coords_wraps_around_circumference() {
        let p = small();
        assert_eq!(p.wrap_coords(-1, 3), GridCoord::new(23, 3));
        assert_eq!(p.wrap_coords(24, 3), GridCoord::new(0, 3));
    }
}
