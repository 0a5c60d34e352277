//! Flat-world math helpers.
//!
//! Everything moves on the XZ plane. Yaw 0 faces -Z, positive yaw turns
//! counter-clockwise seen from above (right-handed Y-up).

use bevy::prelude::*;

/// Unit forward vector for a yaw angle.
#[inline]
pub fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Unit right vector for a yaw angle (perpendicular to forward).
#[inline]
pub fn yaw_right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Yaw that faces along a flat direction (inverse of [`yaw_forward`]).
#[inline]
pub fn yaw_facing(dir: Vec3) -> f32 {
    f32::atan2(-dir.x, -dir.z)
}

/// Distance between two points ignoring Y.
#[inline]
pub fn flat_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Cubic ease-out: fast start, settles gently into the target.
#[inline]
pub fn ease_out_cubic(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Cubic ease-in-out: slow at both ends.
#[inline]
pub fn ease_in_out_cubic(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_matches_yaw_convention() {
        // Yaw 0 faces -Z.
        assert!(yaw_forward(0.0).abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
        // Quarter turn counter-clockwise faces -X.
        assert!(
            yaw_forward(std::f32::consts::FRAC_PI_2).abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-6)
        );
    }

    #[test]
    fn right_is_perpendicular_to_forward() {
        for yaw in [0.0, 0.7, -1.3, 2.9] {
            let f = yaw_forward(yaw);
            let r = yaw_right(yaw);
            assert!(f.dot(r).abs() < 1e-6);
        }
    }

    #[test]
    fn facing_inverts_forward() {
        for yaw in [0.0, 0.4, -0.9, 2.0, -2.7] {
            let recovered = yaw_facing(yaw_forward(yaw));
            let diff = (recovered - yaw).rem_euclid(std::f32::consts::TAU);
            assert!(diff < 1e-5 || (std::f32::consts::TAU - diff) < 1e-5);
        }
    }

    #[test]
    fn ease_out_cubic_hits_the_documented_midpoint() {
        // p = 0.5 -> 1 - 0.5^3 = 0.875, the value the steering sweep is
        // checked against.
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
        assert!((ease_out_cubic(0.0) - 0.0).abs() < 1e-6);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ease_in_out_cubic_endpoints_and_symmetry() {
        assert!((ease_in_out_cubic(0.0) - 0.0).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_cubic(1.0) - 1.0).abs() < 1e-6);

        let mut prev = 0.0;
        for i in 0..=100 {
            let y = ease_in_out_cubic(i as f32 / 100.0);
            assert!(y + 1e-6 >= prev);
            prev = y;
        }
    }
}
