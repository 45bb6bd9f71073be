use planetfall_common::{ConfigError, GridCoord, PlanetId};

/// Errors from planet construction and block access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanetError {
    #[error("planet `{planet}`: {field} must be positive")]
    InvalidParameter { planet: String, field: &'static str },
    #[error("cannot generate a block at the planet center (x={x}, y=0)")]
    CoreLayer { x: u32 },
    #[error("block {coords} is outside the {blocks_per_layer}x{num_layers} grid")]
    OutOfRange {
        coords: GridCoord,
        blocks_per_layer: u32,
        num_layers: u32,
    },
    #[error("block {0} lies inside the planet core")]
    InsideCore(GridCoord),
}

/// Errors from world-level operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("no closest planet has been evaluated")]
    NoClosestPlanet,
    #[error("{0} does not exist")]
    UnknownPlanet(PlanetId),
    #[error("{0} has no blocks")]
    NoBlockNearby(PlanetId),
    #[error(transparent)]
    Planet(#[from] PlanetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
