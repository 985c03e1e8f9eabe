//! Arrow/target collision and ring scoring
//!
//! A hit is any arrow tip within the target radius. The face is split into
//! equal-width rings, ring 0 in the middle, each worth a fixed score.

use glam::Vec2;

use super::target::Target;

/// Result of testing an arrow tip against the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Whether the tip is on the target face
    pub hit: bool,
    /// Distance from the target center
    pub distance: f32,
}

impl HitResult {
    pub fn miss(distance: f32) -> Self {
        Self {
            hit: false,
            distance,
        }
    }
}

/// Test a point against the target's current position
pub fn arrow_target_collision(tip: Vec2, target: &Target) -> HitResult {
    let distance = target.distance_to(tip);
    if distance <= target.radius {
        HitResult {
            hit: true,
            distance,
        }
    } else {
        HitResult::miss(distance)
    }
}

/// Ring band for a distance from center, clamped to the outermost ring
pub fn ring_index(distance: f32, radius: f32, ring_count: usize) -> usize {
    if ring_count == 0 || radius <= 0.0 {
        return 0;
    }
    let thickness = radius / ring_count as f32;
    let ring = (distance.max(0.0) / thickness).floor();
    (ring as usize).min(ring_count - 1)
}

/// Score for a ring index (0 outside the table)
#[inline]
pub fn ring_score(ring: usize, scores: &[u32]) -> u32 {
    scores.get(ring).copied().unwrap_or(0)
}

/// Ring and score for an impact at `distance` from center
pub fn score_impact(distance: f32, radius: f32, scores: &[u32]) -> (usize, u32) {
    let ring = ring_index(distance, radius, scores.len());
    (ring, ring_score(ring, scores))
}
