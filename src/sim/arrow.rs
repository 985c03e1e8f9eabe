//! Arrow projectile
//!
//! Explicit Euler integration under gravity and wind with a caller-chosen
//! fixed step. An arrow ends its flight exactly once: stuck in the target
//! with a ring score, or lost off the field with none.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{arrow_target_collision, score_impact};
use super::target::Target;
use crate::tuning::Tuning;
use crate::{heading_of, unit_from_heading};

/// Outcome of one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowStep {
    /// Still flying
    InFlight,
    /// Struck the target this step
    Hit { ring: usize, score: u32 },
    /// Left the play field this step
    Lost,
    /// Already stuck; nothing happened
    Settled,
}

/// An arrow in flight or at rest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading (radians), derived from velocity for drawing
    pub rotation: f32,
    /// Terminal: position and velocity are frozen once set
    pub stuck: bool,
    /// Ring score, assigned at most once on a hit
    pub score: u32,
}

impl Arrow {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            rotation: heading_of(vel),
            stuck: false,
            score: 0,
        }
    }

    /// Launch from `origin` along `aim` at `speed`
    pub fn launch(id: u32, origin: Vec2, aim: Vec2, speed: f32) -> Self {
        let angle = heading_of(aim);
        Self::new(id, origin, unit_from_heading(angle) * speed)
    }

    /// True for arrows that stuck in the target (as opposed to lost ones)
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.stuck && self.score > 0
    }

    /// Advance one step against the current target.
    ///
    /// The target must already be moved for this tick.
    pub fn integrate(&mut self, dt: f32, wind: f32, target: &Target, tuning: &Tuning) -> ArrowStep {
        if self.stuck {
            return ArrowStep::Settled;
        }

        self.vel.x += wind * tuning.wind_coefficient * dt;
        self.vel.y += tuning.effective_gravity() * dt;
        self.pos += self.vel * dt;
        self.rotation = heading_of(self.vel);

        if arrow_target_collision(self.pos, target).hit {
            self.stuck = true;
            // Sink the tip into the face before scoring
            self.pos += unit_from_heading(self.rotation) * tuning.penetration_depth;
            let (ring, score) = score_impact(
                target.distance_to(self.pos),
                target.radius,
                &tuning.ring_scores,
            );
            self.score = score;
            return ArrowStep::Hit { ring, score };
        }

        if self.out_of_bounds(tuning) {
            self.stuck = true;
            return ArrowStep::Lost;
        }

        ArrowStep::InFlight
    }

    fn out_of_bounds(&self, tuning: &Tuning) -> bool {
        self.pos.x > tuning.field_width + tuning.out_right_margin
            || self.pos.y > tuning.field_height + tuning.out_bottom_margin
            || self.pos.y < -tuning.out_top_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::LevelCatalog;

    fn training_target() -> Target {
        Target::for_level(LevelCatalog::default().level(0), 250.0, 0.01)
    }

    #[test]
    fn test_gravity_increases_vertical_velocity() {
        let tuning = Tuning::default();
        let target = training_target();
        let mut arrow = Arrow::new(1, Vec2::new(120.0, 100.0), Vec2::new(2.0, -3.0));
        let mut last_vy = arrow.vel.y;
        for _ in 0..40 {
            assert_eq!(arrow.integrate(SIM_DT, 0.0, &target, &tuning), ArrowStep::InFlight);
            assert!(arrow.vel.y > last_vy);
            last_vy = arrow.vel.y;
        }
    }

    #[test]
    fn test_wind_pushes_horizontally() {
        let tuning = Tuning::default();
        let target = training_target();
        let mut calm = Arrow::new(1, Vec2::new(120.0, 100.0), Vec2::new(5.0, 0.0));
        let mut windy = calm;
        calm.integrate(SIM_DT, 0.0, &target, &tuning);
        windy.integrate(SIM_DT, 3.0, &target, &tuning);
        let expected = 5.0 + 3.0 * 0.015 * SIM_DT;
        assert!((windy.vel.x - expected).abs() < 1e-5);
        assert!(windy.vel.x > calm.vel.x);
        assert_eq!(windy.vel.y, calm.vel.y);
    }

    #[test]
    fn test_hit_sticks_scores_and_nudges() {
        let tuning = Tuning::default();
        let target = training_target();
        // Resting at the center: falls a hair, hits, sinks 10 px straight down
        let mut arrow = Arrow::new(1, Vec2::new(520.0, 250.0), Vec2::ZERO);
        let step = arrow.integrate(SIM_DT, 0.0, &target, &tuning);
        assert_eq!(step, ArrowStep::Hit { ring: 0, score: 50 });
        assert!(arrow.stuck);
        assert!(arrow.is_hit());
        assert_eq!(arrow.score, 50);
        assert!((arrow.pos.y - (250.0 + 0.189 * SIM_DT + 10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_stuck_arrow_is_frozen() {
        let tuning = Tuning::default();
        let target = training_target();
        let mut arrow = Arrow::new(1, Vec2::new(520.0, 250.0), Vec2::ZERO);
        arrow.integrate(SIM_DT, 0.0, &target, &tuning);
        let frozen = arrow;
        for _ in 0..10 {
            assert_eq!(arrow.integrate(SIM_DT, 5.0, &target, &tuning), ArrowStep::Settled);
        }
        assert_eq!(arrow, frozen);
    }

    #[test]
    fn test_lost_off_the_top() {
        let tuning = Tuning::default();
        let target = training_target();
        let mut arrow = Arrow::launch(1, Vec2::new(120.0, 250.0), Vec2::new(0.0, -1.0), 18.0);
        let mut outcome = ArrowStep::InFlight;
        for _ in 0..200 {
            outcome = arrow.integrate(SIM_DT, 0.0, &target, &tuning);
            if outcome != ArrowStep::InFlight {
                break;
            }
        }
        assert_eq!(outcome, ArrowStep::Lost);
        assert!(arrow.stuck);
        assert_eq!(arrow.score, 0);
        assert!(!arrow.is_hit());
        assert!(arrow.pos.y < -50.0);
    }

    #[test]
    fn test_lost_off_the_right() {
        let tuning = Tuning::default();
        let target = training_target();
        // Fired high over the target
        let mut arrow = Arrow::new(1, Vec2::new(1000.0, 40.0), Vec2::new(60.0, 0.0));
        assert_eq!(arrow.integrate(SIM_DT, 0.0, &target, &tuning), ArrowStep::Lost);
    }

    #[test]
    fn test_launch_follows_aim() {
        let arrow = Arrow::launch(3, Vec2::new(120.0, 250.0), Vec2::new(3.0, 4.0), 10.0);
        assert!((arrow.vel.x - 6.0).abs() < 1e-5);
        assert!((arrow.vel.y - 8.0).abs() < 1e-5);
        assert!(!arrow.stuck);
        assert_eq!(arrow.score, 0);
    }
}
