use std::f64::consts::TAU;

use crate::core::Vec3;

/// Closed analytic space curves selectable at ensemble construction.
///
/// Callers reduce the parameter into [0, 1) with a floored modulo before
/// evaluation; implementations are pure, so the same `u` always yields the
/// same point. Every variant satisfies `point(0) == point(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CurveKind {
    TrefoilKnot,
    GrannyKnot,
    /// (p, q) = (3, 4) torus knot.
    TorusKnot,
}

impl CurveKind {
    pub const ALL: [Self; 3] = [Self::TrefoilKnot, Self::GrannyKnot, Self::TorusKnot];

    /// Point on the curve at normalized parameter `u`, scaled to roughly
    /// unit radius.
    pub fn point(self, u: f64) -> Vec3 {
        let t = u * TAU;
        match self {
            Self::TrefoilKnot => {
                let x = (2.0 + (3.0 * t).cos()) * (2.0 * t).cos();
                let y = (2.0 + (3.0 * t).cos()) * (2.0 * t).sin();
                let z = (3.0 * t).sin();
                Vec3::new(x, y, z) / 3.0
            }
            Self::GrannyKnot => {
                let x = -0.22 * t.cos() - 1.28 * t.sin()
                    - 0.44 * (3.0 * t).cos()
                    - 0.78 * (3.0 * t).sin();
                let y = -0.1 * (2.0 * t).cos() - 0.27 * (2.0 * t).sin()
                    + 0.38 * (4.0 * t).cos()
                    + 0.46 * (4.0 * t).sin();
                let z = 0.7 * (3.0 * t).cos() - 0.4 * (3.0 * t).sin();
                Vec3::new(x, y, z) * 0.5
            }
            Self::TorusKnot => {
                let x = (2.0 + (4.0 * t).cos()) * (3.0 * t).cos();
                let y = (2.0 + (4.0 * t).cos()) * (3.0 * t).sin();
                let z = (4.0 * t).sin();
                Vec3::new(x, y, z) / 3.0
            }
        }
    }
}
