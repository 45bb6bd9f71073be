//! Screen-space angle helpers.
//!
//! All angles are in degrees. The y axis points down, so a positive rotation
//! turns clockwise on screen and 0° means "up".

use glam::Vec2;

/// Unit vector pointing up on screen.
pub const UP: Vec2 = Vec2::new(0.0, -1.0);

/// Rotate `v` by `degrees`, clockwise on screen.
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Clockwise angle from "up" to `v`, in (-90, 270], the range of `atan2`
/// shifted by 90. [`wrap_deg`] maps 270 onto -90, the same direction.
///
/// A zero vector yields 90, matching `atan2(0, 0) == 0`.
#[inline]
pub fn bearing_deg(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees() + 90.0
}

/// Fold an angle into the [-90, 270) band the camera works in.
#[inline]
pub fn wrap_deg(angle: f32) -> f32 {
    (angle + 90.0).rem_euclid(360.0) - 90.0
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn rotate_quarter_turn_is_clockwise_on_screen() {
        // Up rotated a quarter turn clockwise points right.
        assert!(approx(rotate_deg(UP, 90.0), Vec2::new(1.0, 0.0)));
        assert!(approx(rotate_deg(UP, 180.0), Vec2::new(0.0, 1.0)));
        assert!(approx(rotate_deg(UP, -90.0), Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn bearing_of_cardinal_directions() {
        assert!((bearing_deg(UP)).abs() < 1e-4);
        assert!((bearing_deg(Vec2::X) - 90.0).abs() < 1e-4);
        assert!((bearing_deg(Vec2::Y) - 180.0).abs() < 1e-4);
        assert!((bearing_deg(Vec2::new(-1.0, 0.0)) - 270.0).abs() < 1e-4);
        assert!((wrap_deg(bearing_deg(Vec2::new(-1.0, 0.0))) + 90.0).abs() < 1e-4);
    }

    #[test]
    fn bearing_inverts_rotation_of_up() {
        for deg in [-80.0_f32, 0.0, 33.0, 120.0, 250.0] {
            let v = rotate_deg(UP, deg) * 17.0;
            assert!((bearing_deg(v) - deg).abs() < 1e-3, "deg={deg}");
        }
    }

    #[test]
    fn wrap_keeps_band() {
        assert!((wrap_deg(356.9) - (-3.1)).abs() < 1e-4);
        assert!((wrap_deg(-100.0) - 260.0).abs() < 1e-4);
        assert_eq!(wrap_deg(45.0), 45.0);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    }
}
