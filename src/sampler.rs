use std::f64::consts::TAU;

use crate::{
    core::{Vec3, wrap_unit},
    curve::CurveKind,
    error::{KnotloopError, KnotloopResult},
};

/// Winding of the animated sweep. The shipped presets animate opposite
/// directions, so both must be supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn signum(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }
}

/// Samples one stroke's arc of curve points for a given loop progress.
///
/// Parameters are fixed at construction; the only mutation `resample`
/// performs is overwriting the caller-owned point buffer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeSampler {
    radius: f64,
    angular_offset: f64,
    angular_range: f64,
    point_count: usize,
    direction: Direction,
}

impl StrokeSampler {
    pub fn new(
        radius: f64,
        angular_offset: f64,
        angular_range: f64,
        point_count: usize,
        direction: Direction,
    ) -> KnotloopResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(KnotloopError::configuration(
                "stroke radius must be finite and > 0",
            ));
        }
        if !angular_offset.is_finite() {
            return Err(KnotloopError::configuration(
                "stroke angular_offset must be finite",
            ));
        }
        if !angular_range.is_finite() || angular_range <= 0.0 {
            return Err(KnotloopError::configuration(
                "stroke angular_range must be finite and > 0",
            ));
        }
        if point_count < 2 {
            return Err(KnotloopError::configuration(
                "stroke point_count must be >= 2",
            ));
        }
        Ok(Self {
            radius,
            angular_offset,
            angular_range,
            point_count,
            direction,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angular_offset(&self) -> f64 {
        self.angular_offset
    }

    pub fn angular_range(&self) -> f64 {
        self.angular_range
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Fills `buffer` with one continuous arc of curve points for this loop
    /// progress. Progress is consumed modulo 1, so `p` and `p + 1` produce
    /// the same arc. The curve is traversed opposite to phase increase
    /// (the `1 -` below) so growing progress advances the pattern forward
    /// along the curve.
    ///
    /// Returns how many non-finite curve samples were replaced with the
    /// previous finite point (the origin at index 0).
    pub fn resample(
        &self,
        curve: CurveKind,
        progress: f64,
        buffer: &mut [Vec3],
    ) -> KnotloopResult<usize> {
        if buffer.len() != self.point_count {
            return Err(KnotloopError::configuration(format!(
                "stroke buffer holds {} points, sampler expects {}",
                buffer.len(),
                self.point_count
            )));
        }

        let step = self.angular_range / self.point_count as f64;
        let mut last = Vec3::ZERO;
        let mut degenerate = 0usize;
        for (j, slot) in buffer.iter_mut().enumerate() {
            let t2 = self.direction.signum()
                * (progress * TAU + j as f64 * step + self.angular_offset);
            let p = curve.point(1.0 - wrap_unit(t2 / TAU)) * self.radius;
            if p.is_finite() {
                *slot = p;
                last = p;
            } else {
                *slot = last;
                degenerate += 1;
            }
        }
        Ok(degenerate)
    }
}
