//! Developer tooling: world inspector, frame diagnostics, FPS counter.
//!
//! # Invariants
//! - Tools only read world state.
//! - Tools are first-class and tested where possible.

mod fps;
mod inspector;

pub use fps::FpsCounter;
pub use inspector::{BlockInfo, FrameDiagnostics, PlanetInfo, WorldInspector, WorldSummary};
