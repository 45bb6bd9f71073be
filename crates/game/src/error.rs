use planetfall_author::EditError;
use planetfall_kernel::WorldError;

/// Errors that stop the frame loop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    World(#[from] WorldError),
    #[error(transparent)]
    Edit(#[from] EditError),
}

impl GameError {
    /// The player asked for something the world cannot act on right now:
    /// no closest planet yet, or no block left to target on it.
    pub fn is_not_applicable(&self) -> bool {
        let world = match self {
            GameError::World(err) | GameError::Edit(EditError::World(err)) => err,
        };
        matches!(world, WorldError::NoClosestPlanet | WorldError::NoBlockNearby(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetfall_common::PlanetId;
    use planetfall_kernel::PlanetError;

    #[test]
    fn player_facing_errors_are_not_applicable() {
        assert!(GameError::from(WorldError::NoClosestPlanet).is_not_applicable());
        assert!(GameError::from(EditError::World(WorldError::NoBlockNearby(PlanetId(0))))
            .is_not_applicable());
        assert!(!GameError::from(WorldError::UnknownPlanet(PlanetId(3))).is_not_applicable());
        assert!(!GameError::from(WorldError::Planet(PlanetError::CoreLayer { x: 0 }))
            .is_not_applicable());
    }
}
