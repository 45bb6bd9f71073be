use glam::Vec2;
use planetfall_common::angle::rotate_deg;
use planetfall_common::{Aabb2, ViewportConfig};
use planetfall_kernel::World;

/// Everything a frame needs to know about where the camera is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// World position drawn at the viewport center.
    pub player: Vec2,
    /// Screen rotation in degrees, clockwise.
    pub angle: f32,
    pub viewport: ViewportConfig,
}

impl RenderView {
    pub fn new(player: Vec2, angle: f32, viewport: ViewportConfig) -> Self {
        Self {
            player,
            angle,
            viewport,
        }
    }

    /// View at the world's current player position and smoothed orientation.
    pub fn from_world(world: &World) -> Self {
        Self::new(
            world.player().position(),
            world.orientation().angle(),
            *world.viewport(),
        )
    }

    /// Scene-space position of a world point on the internal surface.
    pub fn world_to_scene(&self, world: Vec2) -> Vec2 {
        world - self.player + self.viewport.calibration()
    }

    /// Visibility window for blocks `block_height` tall.
    pub fn window(&self, block_height: u32) -> RenderWindow {
        RenderWindow::new(self.player, self.viewport, block_height, self.angle)
    }
}

/// Player-centered rectangle, padded by one block on each side, turned with
/// the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderWindow {
    pivot: Vec2,
    angle: f32,
    bounds: Aabb2,
}

impl RenderWindow {
    pub fn new(player: Vec2, viewport: ViewportConfig, block_height: u32, angle: f32) -> Self {
        let half_extent = viewport.half() + Vec2::splat(block_height as f32);
        Self {
            pivot: player,
            angle,
            bounds: Aabb2::new(player - half_extent, player + half_extent),
        }
    }

    pub fn bounds(&self) -> Aabb2 {
        self.bounds
    }

    /// Whether a world point would land on screen (with padding).
    pub fn contains(&self, point: Vec2) -> bool {
        let unrotated = rotate_deg(point - self.pivot, 360.0 - self.angle) + self.pivot;
        self.bounds.contains(unrotated)
    }
}
