use glam::Vec2;
use planetfall_common::angle::rotate_deg;
use planetfall_kernel::{Block, Planet};

use crate::material::{MaterialTable, Texture};
use crate::surface::{Surface, BLUE, RED, WHITE};
use crate::view::RenderView;

/// Radius of the marker at a planet's center.
pub const CENTER_MARKER_RADIUS: f32 = 10.0;

/// Draw the core and every visible, on-screen block of `planet` onto the
/// internal scene. Returns the number of blocks drawn.
pub fn draw_planet(
    scene: &mut Surface,
    planet: &Planet,
    view: &RenderView,
    materials: &MaterialTable,
) -> usize {
    let center = view.world_to_scene(planet.position());
    scene.fill_circle(center, planet.core_radius() as f32, BLUE);
    scene.fill_circle(center, CENTER_MARKER_RADIUS, RED);

    let window = view.window(planet.block_height());
    let mut drawn = 0;
    for block in planet.blocks() {
        if !block.block_type.is_visible() || !window.contains(block.center()) {
            continue;
        }
        let texture = materials.texture(block.block_type);
        draw_block(scene, planet, block, texture, view);
        drawn += 1;
    }
    tracing::trace!(planet = planet.name(), drawn, "planet drawn");
    drawn
}

/// Texture placement for one block.
///
/// The texture is stretched to `longest_side x block_height`, turned
/// clockwise by the block's facing, and its bounding box is anchored at the
/// block's bounds origin. The block quad acts as the mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockTexturing {
    origin: Vec2,
    size: Vec2,
    rotated_half: Vec2,
    facing: f32,
}

impl BlockTexturing {
    pub fn new(block: &Block, blocks_per_layer: u32, block_height: u32) -> Self {
        let size = Vec2::new(block.longest_side(), block_height as f32);
        let facing = block.facing_deg(blocks_per_layer);
        let (sin, cos) = facing.to_radians().sin_cos();
        let rotated = Vec2::new(
            (size.x * cos).abs() + (size.y * sin).abs(),
            (size.x * sin).abs() + (size.y * cos).abs(),
        );
        Self {
            origin: block.bounds().min,
            size,
            rotated_half: rotated * 0.5,
            facing,
        }
    }

    /// Normalized texture coordinates of a world point.
    pub fn uv(&self, world: Vec2) -> Vec2 {
        let local = world - self.origin - self.rotated_half;
        let texel = rotate_deg(local, -self.facing) + self.size * 0.5;
        texel / self.size
    }
}

fn draw_block(
    scene: &mut Surface,
    planet: &Planet,
    block: &Block,
    texture: Option<&Texture>,
    view: &RenderView,
) {
    let offset = view.world_to_scene(Vec2::ZERO);
    let corners = block.corners().map(|c| c + offset);
    match texture {
        Some(texture) => {
            let texturing =
                BlockTexturing::new(block, planet.blocks_per_layer(), planet.block_height());
            scene.fill_quad_with(&corners, |p| {
                let uv = texturing.uv(p - offset);
                WHITE.multiply(texture.sample_uv(uv.x, uv.y))
            });
        }
        None => {
            scene.fill_quad_with(&corners, |_| WHITE);
        }
    }
}
