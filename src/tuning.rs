//! Data-driven physics and timing values
//!
//! `Tuning::default()` matches `consts`. A host can override any subset
//! from JSON; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected tuning input
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f64 },
    #[error("ring score table is empty")]
    EmptyRingTable,
}

/// Physics, timing and field values used by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub out_right_margin: f32,
    pub out_bottom_margin: f32,
    pub out_top_margin: f32,

    pub bow_x: f32,
    pub bow_y: f32,
    pub bow_tracking: f32,

    pub gravity: f32,
    pub gravity_scale: f32,
    pub wind_coefficient: f32,
    pub wind_change_interval_ms: f64,

    pub base_arrow_speed: f32,
    pub min_power_share: f32,
    pub max_power_hold_ms: f64,

    pub penetration_depth: f32,
    pub ring_scores: Vec<u32>,
    pub target_speed_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            out_right_margin: OUT_RIGHT_MARGIN,
            out_bottom_margin: OUT_BOTTOM_MARGIN,
            out_top_margin: OUT_TOP_MARGIN,

            bow_x: BOW_X,
            bow_y: BOW_Y,
            bow_tracking: BOW_TRACKING,

            gravity: GRAVITY,
            gravity_scale: GRAVITY_SCALE,
            wind_coefficient: WIND_COEFFICIENT,
            wind_change_interval_ms: WIND_CHANGE_INTERVAL_MS,

            base_arrow_speed: BASE_ARROW_SPEED,
            min_power_share: MIN_POWER_SHARE,
            max_power_hold_ms: MAX_POWER_HOLD_MS,

            penetration_depth: PENETRATION_DEPTH,
            ring_scores: RING_SCORES.to_vec(),
            target_speed_scale: TARGET_SPEED_SCALE,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("field_width", self.field_width as f64),
            ("field_height", self.field_height as f64),
            ("wind_change_interval_ms", self.wind_change_interval_ms),
            ("base_arrow_speed", self.base_arrow_speed as f64),
            ("max_power_hold_ms", self.max_power_hold_ms),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        let finite = [
            ("out_right_margin", self.out_right_margin),
            ("out_bottom_margin", self.out_bottom_margin),
            ("out_top_margin", self.out_top_margin),
            ("bow_x", self.bow_x),
            ("bow_y", self.bow_y),
            ("bow_tracking", self.bow_tracking),
            ("gravity", self.gravity),
            ("gravity_scale", self.gravity_scale),
            ("wind_coefficient", self.wind_coefficient),
            ("min_power_share", self.min_power_share),
            ("penetration_depth", self.penetration_depth),
            ("target_speed_scale", self.target_speed_scale),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::NotFinite {
                    field,
                    value: value as f64,
                });
            }
        }
        if self.ring_scores.is_empty() {
            return Err(TuningError::EmptyRingTable);
        }
        Ok(())
    }

    /// Number of scoring rings on every target
    #[inline]
    pub fn ring_count(&self) -> usize {
        self.ring_scores.len()
    }

    /// Vertical acceleration applied per unit of `dt`
    #[inline]
    pub fn effective_gravity(&self) -> f32 {
        self.gravity * self.gravity_scale
    }

    /// Launch speed for a power fraction in [0, 1]
    #[inline]
    pub fn launch_speed(&self, power: f32) -> f32 {
        let power = crate::clamp01(power);
        self.base_arrow_speed * (self.min_power_share + (1.0 - self.min_power_share) * power)
    }

    /// Power fraction for a charge held `held_ms` milliseconds (saturates at 1)
    #[inline]
    pub fn power_for_hold(&self, held_ms: f64) -> f32 {
        crate::clamp01((held_ms / self.max_power_hold_ms) as f32)
    }
}
