//! The ring target
//!
//! Horizontal placement is fixed per level. Moving levels bob the target
//! vertically on a sine wave driven by simulated time, not wall time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::levels::{LevelConfig, Motion};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Center at rest
    pub base: Vec2,
    /// Hit radius (outer edge of the last ring)
    pub radius: f32,
    /// Oscillation, if the level moves the target
    pub motion: Option<Motion>,
    /// Phase advance per unit of simulated time
    pub speed_scale: f32,
    /// Accumulated simulated time
    pub time: f32,
}

impl Target {
    /// Fresh target for a level, resting at `center_y`
    pub fn for_level(level: &LevelConfig, center_y: f32, speed_scale: f32) -> Self {
        Self {
            base: Vec2::new(level.target_distance, center_y),
            radius: level.target_radius,
            motion: level.motion,
            speed_scale,
            time: 0.0,
        }
    }

    /// Advance motion time (negative steps are ignored)
    pub fn update(&mut self, dt: f32) {
        if dt > 0.0 {
            self.time += dt;
        }
    }

    /// Center at an arbitrary motion time
    pub fn position_at(&self, time: f32) -> Vec2 {
        match self.motion {
            Some(Motion { amplitude, speed }) => {
                let offset = amplitude * (time * self.speed_scale * speed).sin();
                Vec2::new(self.base.x, self.base.y + offset)
            }
            None => self.base,
        }
    }

    /// Current center, recomputed from elapsed time
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position_at(self.time)
    }

    /// Distance from a point to the current center
    #[inline]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        point.distance(self.position())
    }
}
