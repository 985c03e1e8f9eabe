//! Wind model
//!
//! A single signed scalar pushing arrows horizontally. It is re-rolled on a
//! fixed wall-clock interval, never per tick, so frame rate does not change
//! how often it shifts.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Source of wind values
pub trait WindSource {
    /// A value uniformly drawn from [-ceiling, +ceiling]
    fn sample(&mut self, ceiling: f32) -> f32;
}

impl<R: Rng> WindSource for R {
    fn sample(&mut self, ceiling: f32) -> f32 {
        if !ceiling.is_finite() || ceiling <= 0.0 {
            return 0.0;
        }
        self.random_range(-ceiling..=ceiling)
    }
}

/// Current wind and when it last shifted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindState {
    /// Signed wind value (positive blows toward the target)
    pub value: f32,
    /// Clock time (ms) of the last re-roll or reset
    pub last_change_ms: f64,
}

impl WindState {
    /// Calm wind starting its interval at `now_ms`
    pub fn calm(now_ms: f64) -> Self {
        Self {
            value: 0.0,
            last_change_ms: now_ms,
        }
    }

    /// Reset to calm (start of every level)
    pub fn reset(&mut self, now_ms: f64) {
        *self = Self::calm(now_ms);
    }

    /// Re-roll if a full interval has elapsed since the last change.
    ///
    /// Returns the new value when the wind shifted.
    pub fn update(
        &mut self,
        now_ms: f64,
        ceiling: f32,
        interval_ms: f64,
        source: &mut impl WindSource,
    ) -> Option<f32> {
        if now_ms - self.last_change_ms < interval_ms {
            return None;
        }
        let ceiling = ceiling.max(0.0);
        self.value = source.sample(ceiling).clamp(-ceiling, ceiling);
        self.last_change_ms = now_ms;
        Some(self.value)
    }

    /// Wind relative to the ceiling, in [-1, 1] (for the wind gauge)
    pub fn needle(&self, ceiling: f32) -> f32 {
        let ceiling = if ceiling > 0.0 { ceiling } else { 1.0 };
        (self.value / ceiling).clamp(-1.0, 1.0)
    }
}

impl Default for WindState {
    fn default() -> Self {
        Self::calm(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::WIND_CHANGE_INTERVAL_MS;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Always returns the same fraction of the ceiling
    struct FixedWind(f32);

    impl WindSource for FixedWind {
        fn sample(&mut self, ceiling: f32) -> f32 {
            self.0 * ceiling
        }
    }

    #[test]
    fn test_no_change_before_interval() {
        let mut wind = WindState::calm(1000.0);
        let mut src = FixedWind(0.5);
        assert_eq!(wind.update(4999.0, 2.0, WIND_CHANGE_INTERVAL_MS, &mut src), None);
        assert_eq!(wind.value, 0.0);
        assert_eq!(wind.last_change_ms, 1000.0);
    }

    #[test]
    fn test_rerolls_at_interval() {
        let mut wind = WindState::calm(1000.0);
        let mut src = FixedWind(0.5);
        assert_eq!(wind.update(5000.0, 2.0, WIND_CHANGE_INTERVAL_MS, &mut src), Some(1.0));
        assert_eq!(wind.last_change_ms, 5000.0);
        // Next shift needs another full interval
        assert_eq!(wind.update(8999.0, 2.0, WIND_CHANGE_INTERVAL_MS, &mut src), None);
    }

    #[test]
    fn test_zero_ceiling_is_calm() {
        let mut wind = WindState::calm(0.0);
        let mut rng = Pcg32::seed_from_u64(7);
        for i in 1..20 {
            wind.update(i as f64 * 5000.0, 0.0, WIND_CHANGE_INTERVAL_MS, &mut rng);
            assert_eq!(wind.value, 0.0);
        }
    }

    #[test]
    fn test_unbounded_ceiling_is_calm() {
        let mut wind = WindState::calm(0.0);
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(wind.update(4000.0, f32::INFINITY, WIND_CHANGE_INTERVAL_MS, &mut rng), Some(0.0));
        assert_eq!(wind.update(8000.0, f32::NAN, WIND_CHANGE_INTERVAL_MS, &mut rng), Some(0.0));
    }

    #[test]
    fn test_source_output_is_clamped() {
        let mut wind = WindState::calm(0.0);
        let mut src = FixedWind(3.0);
        wind.update(4000.0, 1.5, WIND_CHANGE_INTERVAL_MS, &mut src);
        assert_eq!(wind.value, 1.5);
    }

    #[test]
    fn test_rng_stays_within_ceiling() {
        let mut wind = WindState::calm(0.0);
        let mut rng = Pcg32::seed_from_u64(42);
        for i in 1..200 {
            wind.update(i as f64 * 4000.0, 4.2, WIND_CHANGE_INTERVAL_MS, &mut rng);
            assert!(wind.value.abs() <= 4.2);
        }
    }

    #[test]
    fn test_needle() {
        let wind = WindState {
            value: -2.5,
            last_change_ms: 0.0,
        };
        assert_eq!(wind.needle(5.0), -0.5);
        assert_eq!(wind.needle(0.0), -1.0);
    }
}
