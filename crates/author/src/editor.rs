use glam::Vec2;
use planetfall_common::BlockType;
use planetfall_kernel::{BlockTarget, World, WorldError};

/// A block edit that can be applied to the world and reversed.
///
/// Each command carries enough context to undo itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    /// Change a block's type. Undo = restore the old type.
    SetBlock {
        target: BlockTarget,
        old: BlockType,
        new: BlockType,
    },
}

impl EditCommand {
    /// Produce the inverse command (for undo).
    pub fn inverse(&self) -> Self {
        match *self {
            Self::SetBlock { target, old, new } => Self::SetBlock {
                target,
                old: new,
                new: old,
            },
        }
    }

    pub fn target(&self) -> BlockTarget {
        match *self {
            Self::SetBlock { target, .. } => target,
        }
    }
}

/// Errors from edit operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Editor with undo/redo support for block authoring.
///
/// Works against a borrowed `World` and tracks every effective edit in
/// undo/redo stacks. Any new edit clears the redo stack.
#[derive(Debug, Default)]
pub struct Editor {
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
}

impl Editor {
    /// Create a new editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a block's type and push to the undo stack. Returns the recorded
    /// command, or `None` when the block already had that type.
    pub fn set_block(
        &mut self,
        world: &mut World,
        target: BlockTarget,
        block_type: BlockType,
    ) -> Result<Option<EditCommand>, EditError> {
        let old = world.set_block(target, block_type)?;
        if old == block_type {
            return Ok(None);
        }
        let cmd = EditCommand::SetBlock {
            target,
            old,
            new: block_type,
        };
        self.undo_stack.push(cmd);
        self.redo_stack.clear();
        Ok(Some(cmd))
    }

    /// Fill the block under `cursor` (viewport pixels) with `block_type`.
    pub fn place(
        &mut self,
        world: &mut World,
        cursor: Vec2,
        block_type: BlockType,
    ) -> Result<Option<EditCommand>, EditError> {
        let target = world.block_at_cursor(cursor)?;
        self.set_block(world, target, block_type)
    }

    /// Replace the block under `cursor` with air.
    pub fn break_block(
        &mut self,
        world: &mut World,
        cursor: Vec2,
    ) -> Result<Option<EditCommand>, EditError> {
        let target = world.block_at_cursor(cursor)?;
        self.set_block(world, target, BlockType::Air)
    }

    /// Undo the last edit. Returns true if an operation was undone.
    pub fn undo(&mut self, world: &mut World) -> Result<bool, EditError> {
        let Some(cmd) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = apply_command(world, &cmd.inverse()) {
            self.undo_stack.push(cmd);
            return Err(err);
        }
        self.redo_stack.push(cmd);
        Ok(true)
    }

    /// Redo the last undone edit. Returns true if an operation was redone.
    pub fn redo(&mut self, world: &mut World) -> Result<bool, EditError> {
        let Some(cmd) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = apply_command(world, &cmd) {
            self.redo_stack.push(cmd);
            return Err(err);
        }
        self.undo_stack.push(cmd);
        Ok(true)
    }

    /// Forget all history, e.g. after a planet was regenerated.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Number of operations on the undo stack.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of operations on the redo stack.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Whether there are operations that can be undone.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there are operations that can be redone.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

fn apply_command(world: &mut World, cmd: &EditCommand) -> Result<(), EditError> {
    match *cmd {
        EditCommand::SetBlock { target, new, .. } => {
            world.set_block(target, new)?;
        }
    }
    tracing::debug!(?cmd, "edit applied");
    Ok(())
}
