//! In-world authoring: placing and breaking planet blocks, with undo/redo.
//!
//! # Invariants
//! - All authoring ops are reversible.
//! - Every applied op goes through `World::set_block` and so lands in the
//!   world event log.
//! - An edit that changes nothing is not recorded.

mod editor;

pub use editor::{EditCommand, EditError, Editor};
