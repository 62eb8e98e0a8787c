pub use glam::{DMat3 as Mat3, DVec3 as Vec3};

/// Drawing surface size in pixels. Doubles as the screen-space resolution
/// hint ribbon materials use for width attenuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Floored modulo into [0, 1): `wrap_unit(-0.25) == 0.75`.
pub fn wrap_unit(u: f64) -> f64 {
    let w = u.rem_euclid(1.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if w >= 1.0 { 0.0 } else { w }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_unit_is_floored_not_truncated() {
        assert_eq!(wrap_unit(0.25), 0.25);
        assert_eq!(wrap_unit(-0.25), 0.75);
        assert_eq!(wrap_unit(3.5), 0.5);
        assert_eq!(wrap_unit(-3.0), 0.0);
    }

    #[test]
    fn wrap_unit_stays_below_one() {
        for u in [-1e-17, -1e-300, 7.0 - 1e-16] {
            assert!(wrap_unit(u) < 1.0);
            assert!(wrap_unit(u) >= 0.0);
        }
    }
}
