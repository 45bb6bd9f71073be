use std::time::Duration;

use planetfall_author::Editor;
use planetfall_common::{BlockType, PlanetId, WorldConfig};
use planetfall_input::{Action, InputFrame};
use planetfall_kernel::{World, WorldEvent};
use planetfall_render::{FrameStats, RenderView, Renderer, SoftwareRenderer};
use planetfall_tools::{FpsCounter, FrameDiagnostics, WorldInspector};

use crate::error::GameError;

/// Application state for one session.
///
/// Each frame: apply queued actions, step physics with the held movement
/// keys, ease the camera, render. The loop ends on [`Action::Quit`].
#[derive(Debug)]
pub struct Game {
    world: World,
    editor: Editor,
    renderer: SoftwareRenderer,
    fps: FpsCounter,
    place_material: BlockType,
    running: bool,
    last_stats: FrameStats,
}

impl Game {
    pub fn new(config: &WorldConfig) -> Result<Self, GameError> {
        Ok(Self::from_world(World::new(config)?))
    }

    pub fn from_world(world: World) -> Self {
        let renderer = SoftwareRenderer::new(world.viewport());
        Self {
            world,
            editor: Editor::new(),
            renderer,
            fps: FpsCounter::default(),
            place_material: BlockType::Stone,
            running: true,
            last_stats: FrameStats::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: SoftwareRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn renderer(&self) -> &SoftwareRenderer {
        &self.renderer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn place_material(&self) -> BlockType {
        self.place_material
    }

    /// Block type used by [`Action::PlaceBlock`].
    pub fn set_place_material(&mut self, block_type: BlockType) {
        self.place_material = block_type;
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Update phase: actions in arrival order, then one physics step.
    pub fn update(&mut self, input: &InputFrame, dt: f32) -> Result<(), GameError> {
        for action in &input.actions {
            self.apply(*action)?;
            if !self.running {
                return Ok(());
            }
        }
        self.world.step(input.held.axis(), dt);
        Ok(())
    }

    /// Draw phase: ease the camera toward the bearing, then render.
    pub fn draw(&mut self) -> FrameStats {
        self.world.update_camera();
        let view = RenderView::from_world(&self.world);
        self.last_stats = self.renderer.render(&self.world, &view);
        self.last_stats
    }

    /// One full frame. `frame_time` is the wall time since the previous
    /// frame and feeds both physics and the FPS counter.
    ///
    /// The world event log is drained at the end of every frame.
    pub fn frame(
        &mut self,
        input: &InputFrame,
        frame_time: Duration,
    ) -> Result<FrameDiagnostics, GameError> {
        self.fps.record(frame_time);
        self.update(input, frame_time.as_secs_f32())?;
        let stats = self.draw();
        let diagnostics =
            WorldInspector::diagnostics(&self.world, self.fps.fps(), stats.blocks_rendered);
        tracing::trace!(%diagnostics, "frame");
        for event in self.world.drain_events() {
            match event {
                WorldEvent::Stepped { .. } => {}
                event => tracing::debug!(?event, "world event"),
            }
        }
        Ok(diagnostics)
    }

    /// Run frames until a quit action or the input runs out. Returns the
    /// diagnostics of the last frame drawn.
    pub fn run<I>(
        &mut self,
        frames: I,
        frame_time: Duration,
    ) -> Result<Option<FrameDiagnostics>, GameError>
    where
        I: IntoIterator<Item = InputFrame>,
    {
        let mut last = None;
        for input in frames {
            if !self.running {
                break;
            }
            last = Some(self.frame(&input, frame_time)?);
        }
        tracing::info!(tick = self.world.tick(), running = self.running, "run finished");
        Ok(last)
    }

    /// Rebuild a planet from its material rule. Edit history refers to the
    /// old block types, so it is dropped.
    pub fn regenerate_planet(&mut self, id: PlanetId) -> Result<(), GameError> {
        self.world.regenerate_planet(id)?;
        self.editor.clear();
        Ok(())
    }

    fn apply(&mut self, action: Action) -> Result<(), GameError> {
        let result = match action {
            Action::Quit => {
                tracing::info!("quit requested");
                self.running = false;
                Ok(())
            }
            Action::Jump => self.world.jump().map_err(GameError::from),
            Action::PlaceBlock(cursor) => self
                .editor
                .place(&mut self.world, cursor, self.place_material)
                .map(drop)
                .map_err(GameError::from),
            Action::BreakBlock(cursor) => self
                .editor
                .break_block(&mut self.world, cursor)
                .map(drop)
                .map_err(GameError::from),
            Action::Undo => self.editor.undo(&mut self.world).map(drop).map_err(GameError::from),
            Action::Redo => self.editor.redo(&mut self.world).map(drop).map_err(GameError::from),
        };
        match result {
            Err(err) if err.is_not_applicable() => {
                tracing::warn!(?action, %err, "action dropped");
                Ok(())
            }
            other => other,
        }
    }
}
