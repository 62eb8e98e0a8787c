use crate::error::{KnotloopError, KnotloopResult};

/// Maps wall-clock milliseconds onto normalized loop progress in [0, 1).
///
/// Progress is exactly 0 at `start_millis + k * period_secs * 1000` for any
/// integer k >= 0, which is what makes the loop visually seamless.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoopClock {
    period_secs: f64,
}

impl LoopClock {
    pub fn new(period_secs: f64) -> KnotloopResult<Self> {
        if !period_secs.is_finite() || period_secs <= 0.0 {
            return Err(KnotloopError::configuration(
                "LoopClock period_secs must be finite and > 0",
            ));
        }
        Ok(Self { period_secs })
    }

    pub fn period_secs(self) -> f64 {
        self.period_secs
    }

    /// No side effects, no allocation; callable every rendered frame.
    /// Non-negative for any input ordering (floored modulo).
    pub fn progress(self, now_millis: f64, start_millis: f64) -> f64 {
        let elapsed_secs = (now_millis - start_millis) * 0.001;
        let wrapped = elapsed_secs.rem_euclid(self.period_secs);
        let p = wrapped / self.period_secs;
        if p >= 1.0 { 0.0 } else { p }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_zero_at_whole_periods() {
        let clock = LoopClock::new(4.0).unwrap();
        let start = 1_234.5;
        for k in 0..6u32 {
            let now = start + f64::from(k) * 4.0 * 1000.0;
            assert!(clock.progress(now, start).abs() < 1e-9);
        }
    }

    #[test]
    fn progress_is_linear_within_a_period() {
        let clock = LoopClock::new(4.0).unwrap();
        assert!((clock.progress(2_000.0, 0.0) - 0.5).abs() < 1e-12);
        assert!((clock.progress(7_000.0, 0.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn progress_before_start_stays_in_range() {
        let clock = LoopClock::new(4.0).unwrap();
        let p = clock.progress(0.0, 3_000.0);
        assert!((0.0..1.0).contains(&p));
        assert!((p - 0.25).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_period() {
        assert!(LoopClock::new(0.0).is_err());
        assert!(LoopClock::new(-1.0).is_err());
        assert!(LoopClock::new(f64::NAN).is_err());
    }
}
