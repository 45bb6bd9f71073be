use glam::Vec2;
use planetfall_common::ViewportConfig;
use planetfall_kernel::World;

use crate::draw::draw_planet;
use crate::material::MaterialTable;
use crate::surface::{Rgb, Surface, BLACK, DARK_BLUE, WHITE};
use crate::view::RenderView;

/// Side of the square drawn at the viewport center for the player.
pub const DEFAULT_PLAYER_SIZE: f32 = 200.0;

/// What one frame cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub blocks_rendered: usize,
    pub planets: usize,
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads world state and a view, then produces output. It
/// never mutates the world; it may reuse its own buffers between frames.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given world state and view.
    fn render(&mut self, world: &World, view: &RenderView) -> Self::Output;
}

/// CPU renderer.
///
/// Planets are drawn unrotated into a square scene large enough to cover
/// the viewport at any angle, then the scene is turned by the view angle
/// onto the viewport-sized frame. The player is drawn last, fixed at the
/// frame center.
#[derive(Debug, Clone)]
pub struct SoftwareRenderer {
    materials: MaterialTable,
    background: Rgb,
    player_color: Rgb,
    player_size: f32,
    scene: Surface,
    frame: Surface,
}

impl SoftwareRenderer {
    pub fn new(viewport: &ViewportConfig) -> Self {
        let side = viewport.internal_side();
        Self {
            materials: MaterialTable::builtin(),
            background: DARK_BLUE,
            player_color: WHITE,
            player_size: DEFAULT_PLAYER_SIZE,
            scene: Surface::new(side, side, DARK_BLUE),
            frame: Surface::new(viewport.width, viewport.height, BLACK),
        }
    }

    pub fn with_materials(mut self, materials: MaterialTable) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_player_size(mut self, size: f32) -> Self {
        self.player_size = size;
        self
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut MaterialTable {
        &mut self.materials
    }

    /// Unrotated internal scene of the last frame.
    pub fn scene(&self) -> &Surface {
        &self.scene
    }

    /// Viewport-sized output of the last frame.
    pub fn frame(&self) -> &Surface {
        &self.frame
    }

    fn fit(&mut self, viewport: &ViewportConfig) {
        let side = viewport.internal_side();
        if self.scene.width() != side {
            tracing::debug!(side, "resizing internal scene");
            self.scene = Surface::new(side, side, self.background);
        }
        if self.frame.width() != viewport.width || self.frame.height() != viewport.height {
            self.frame = Surface::new(viewport.width, viewport.height, BLACK);
        }
    }
}

impl Renderer for SoftwareRenderer {
    type Output = FrameStats;

    fn render(&mut self, world: &World, view: &RenderView) -> FrameStats {
        let _span = tracing::info_span!("render_frame", tick = world.tick()).entered();
        self.fit(&view.viewport);

        self.scene.fill(self.background);
        let mut stats = FrameStats::default();
        for planet in world.planets() {
            stats.blocks_rendered += draw_planet(&mut self.scene, planet, view, &self.materials);
            stats.planets += 1;
        }

        self.scene
            .compose_rotated(&mut self.frame, view.viewport.calibration(), view.angle);

        let half = self.frame.size() * 0.5;
        let marker = Vec2::splat(self.player_size * 0.5);
        self.frame.fill_rect(half - marker, half + marker, self.player_color);

        tracing::trace!(blocks = stats.blocks_rendered, "frame rendered");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetfall_common::{PlanetConfig, WorldConfig};

    use crate::surface::{BLUE, RED};

    fn world(player_start: Vec2) -> World {
        World::new(&WorldConfig {
            viewport: ViewportConfig::new(120, 90),
            player_start,
            planets: vec![PlanetConfig {
                name: "tiny".into(),
                position: Vec2::ZERO,
                mass: 1e12,
                num_layers: 20,
                blocks_per_layer: Some(16),
                core_radius: Some(60),
                block_height: 20,
            }],
            ..WorldConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn buffers_match_viewport() {
        let w = world(Vec2::new(0.0, -185.0));
        let renderer = SoftwareRenderer::new(w.viewport());
        assert_eq!(renderer.frame().width(), 120);
        assert_eq!(renderer.frame().height(), 90);
        assert_eq!(renderer.scene().width(), 150);
        assert_eq!(renderer.scene().height(), 150);
    }

    #[test]
    fn player_marker_sits_at_frame_center() {
        let w = world(Vec2::new(0.0, -185.0));
        let mut renderer = SoftwareRenderer::new(w.viewport()).with_player_size(8.0);
        let stats = renderer.render(&w, &RenderView::from_world(&w));
        assert_eq!(stats.planets, 1);
        assert!(stats.blocks_rendered > 0);
        assert_eq!(renderer.frame().get(60, 45), Some(WHITE));
        assert_ne!(renderer.frame().get(0, 0), Some(WHITE));
    }

    #[test]
    fn planet_below_player_when_upright() {
        let w = world(Vec2::new(0.0, -185.0));
        let mut renderer = SoftwareRenderer::new(w.viewport()).with_player_size(0.0);
        renderer.render(&w, &RenderView::from_world(&w));
        // Sky above, ground below.
        assert_eq!(renderer.frame().get(60, 2), Some(DARK_BLUE));
        let below = renderer.frame().get(60, 80);
        assert!(below.is_some_and(|c| c != DARK_BLUE));
    }

    #[test]
    fn rotated_view_keeps_ground_below_player() {
        // On the right side of the planet the screen is turned a quarter,
        // so the planet still appears under the player.
        let w = world(Vec2::new(185.0, 0.0));
        let mut renderer = SoftwareRenderer::new(w.viewport()).with_player_size(0.0);
        let view = RenderView::new(w.player().position(), 90.0, *w.viewport());
        renderer.render(&w, &view);
        assert_eq!(renderer.frame().get(60, 2), Some(DARK_BLUE));
        assert!(renderer.frame().get(60, 80).is_some_and(|c| c != DARK_BLUE));
    }

    #[test]
    fn core_visible_from_close_range() {
        let w = world(Vec2::new(0.0, -40.0));
        let mut renderer = SoftwareRenderer::new(w.viewport()).with_player_size(0.0);
        renderer.render(&w, &RenderView::new(Vec2::new(0.0, -40.0), 0.0, *w.viewport()));
        let frame = renderer.frame();
        assert!(frame.pixels().contains(&BLUE));
        assert!(frame.pixels().contains(&RED));
    }

    #[test]
    fn render_does_not_touch_world() {
        let w = world(Vec2::new(0.0, -185.0));
        let before = w.tick();
        let mut renderer = SoftwareRenderer::new(w.viewport());
        renderer.render(&w, &RenderView::from_world(&w));
        assert_eq!(w.tick(), before);
        assert!(w.events().is_empty());
    }
}
