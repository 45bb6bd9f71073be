use planetfall_common::angle::{lerp, wrap_deg};
use serde::{Deserialize, Serialize};

/// Pick the representation of `target` (target, target ± 360) closest to
/// `current`, so interpolation never spins the long way around.
pub fn shortest_target(current: f32, target: f32) -> f32 {
    let mut target = target;
    if (target - current).abs() > (target - current - 360.0).abs() {
        target -= 360.0;
    }
    if (target - current).abs() > (target - current + 360.0).abs() {
        target += 360.0;
    }
    target
}

/// Interpolation factor for an angular gap: 0.5 when aligned, shrinking as
/// the gap grows toward a full turn.
pub fn smoothing_factor(current: f32, target: f32) -> f32 {
    let diff = (current - target).abs().rem_euclid(360.0) / 360.0;
    1.0 / (diff + 1.0) - 0.5
}

/// Screen rotation that keeps the closest planet "down".
///
/// The angle eases toward the player's bearing every frame instead of
/// snapping to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenOrientation {
    current: f32,
    target: f32,
}

impl ScreenOrientation {
    pub fn new(angle: f32) -> Self {
        Self {
            current: angle,
            target: angle,
        }
    }

    /// Current screen angle in degrees.
    pub fn angle(&self) -> f32 {
        self.current
    }

    /// Target used by the last update, after wrap adjustment.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Move one frame toward `bearing` and return the new angle.
    pub fn advance(&mut self, bearing: f32) -> f32 {
        self.target = shortest_target(self.current, bearing);
        let t = smoothing_factor(self.current, self.target);
        self.current = wrap_deg(lerp(self.current, self.target, t));
        self.current
    }
}
