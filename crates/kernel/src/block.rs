use glam::Vec2;
use planetfall_common::{Aabb2, BlockType, GridCoord};
use serde::{Deserialize, Serialize};

/// One cell of a planet's radial grid.
///
/// ```text
///   d ----- a          a, b: outer edge (layer y)
///   | block |          c, d: inner edge (layer y - 1)
///   c ----- b          seen from the planet center looking up
/// ```
///
/// Geometry is fixed at generation; only the block type changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    coords: GridCoord,
    corners: [Vec2; 4],
    bounds: Aabb2,
    longest_side: f32,
    pub block_type: BlockType,
}

impl Block {
    /// Build a block from its corners in `[a, b, c, d]` order.
    pub fn new(coords: GridCoord, corners: [Vec2; 4], block_type: BlockType) -> Self {
        let bounds = Aabb2::from_points(&corners);
        let longest_side = (corners[1] - corners[0]).length();
        Self {
            coords,
            corners,
            bounds,
            longest_side,
            block_type,
        }
    }

    pub fn coords(&self) -> GridCoord {
        self.coords
    }

    pub fn corners(&self) -> &[Vec2; 4] {
        &self.corners
    }

    pub fn bounds(&self) -> Aabb2 {
        self.bounds
    }

    /// Center of the bounding box. Used for culling and nearest-block queries.
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Length of the outer edge; the texture is stretched to this width.
    pub fn longest_side(&self) -> f32 {
        self.longest_side
    }

    /// Clockwise angle of the block's middle, measured from up.
    pub fn facing_deg(&self, blocks_per_layer: u32) -> f32 {
        360.0 * (self.coords.x as f32 + 0.5) / blocks_per_layer as f32
    }
}
