//! Archery Trial - A wind-swept target shooting game
//!
//! Core modules:
//! - `sim`: Simulation (arrow physics, wind, moving target, scoring, level flow)
//! - `session`: Driver that owns the state, the clock and the wind source
//! - `hud`: Read-only snapshots for rendering and HUD collaborators
//! - `tuning`: Data-driven physics and timing constants
//! - `clock`: Time source abstraction for charge and wind timing

pub mod clock;
pub mod hud;
pub mod session;
pub mod sim;
pub mod tuning;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use hud::{Overlay, Snapshot};
pub use session::Session;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Arrows may leave the field by this much before they count as lost
    pub const OUT_RIGHT_MARGIN: f32 = 150.0;
    pub const OUT_BOTTOM_MARGIN: f32 = 50.0;
    pub const OUT_TOP_MARGIN: f32 = 50.0;

    /// Bow anchor (x is fixed, y eases toward the aim point)
    pub const BOW_X: f32 = 120.0;
    pub const BOW_Y: f32 = FIELD_HEIGHT / 2.0;
    /// Fraction of the remaining distance the bow closes per tick
    pub const BOW_TRACKING: f32 = 0.08;

    /// Fixed physics step per tick (not derived from frame time)
    pub const SIM_DT: f32 = 0.9;

    /// Downward acceleration and its scale factor
    pub const GRAVITY: f32 = 0.35;
    pub const GRAVITY_SCALE: f32 = 0.6;
    /// Horizontal acceleration per unit of wind
    pub const WIND_COEFFICIENT: f32 = 0.015;
    /// Wind re-roll period (ms)
    pub const WIND_CHANGE_INTERVAL_MS: f64 = 4000.0;

    /// Launch speed at full draw
    pub const BASE_ARROW_SPEED: f32 = 18.0;
    /// Share of the base speed an uncharged shot still gets
    pub const MIN_POWER_SHARE: f32 = 0.4;
    /// Hold time (ms) to reach 100% power
    pub const MAX_POWER_HOLD_MS: f64 = 2000.0;

    /// Distance an arrow sinks into the target after a hit
    pub const PENETRATION_DEPTH: f32 = 10.0;

    /// Target rings, innermost first
    pub const TARGET_RINGS: usize = 5;
    pub const RING_SCORES: [u32; TARGET_RINGS] = [50, 30, 20, 10, 5];

    /// Target phase advance per unit of `dt` (16 ms frames at 0.001/ms over a 0.9 step)
    pub const TARGET_SPEED_SCALE: f32 = 0.016 / SIM_DT;

    /// Bow string pull while charging: rest + range * power
    pub const STRING_PULL_REST: f32 = 10.0;
    pub const STRING_PULL_RANGE: f32 = 25.0;
}

/// Clamp a value to [0, 1]
#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Heading angle (radians) of a velocity vector
#[inline]
pub fn heading_of(vel: Vec2) -> f32 {
    vel.y.atan2(vel.x)
}

/// Unit vector for a heading angle
#[inline]
pub fn unit_from_heading(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
