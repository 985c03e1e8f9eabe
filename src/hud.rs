//! Read-only views for rendering and HUD collaborators
//!
//! A `Snapshot` is everything a frame needs to draw; `overlay` gives the
//! title and message for the between-level screens.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{STRING_PULL_RANGE, STRING_PULL_REST};
use crate::sim::{GamePhase, SessionState};

/// One arrow as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrowView {
    pub id: u32,
    pub pos: Vec2,
    pub rotation: f32,
    pub stuck: bool,
    /// Ring score for "+N" feedback (0 for misses and arrows in flight)
    pub score: u32,
}

/// Per-frame state for the renderer and HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level_index: usize,
    pub level_count: usize,
    pub level_name: String,
    /// Cumulative score needed to pass the current level
    pub goal: u32,
    pub arrows_remaining: u32,
    pub score: u64,
    pub shots_fired: u32,
    pub hits: u32,
    pub accuracy: String,
    pub wind: f32,
    /// Wind relative to the level ceiling, in [-1, 1]
    pub wind_needle: f32,
    pub target_pos: Vec2,
    pub target_radius: f32,
    pub bow_pos: Vec2,
    pub bow_angle: f32,
    /// Power fraction while charging
    pub charge_power: Option<f32>,
    /// Bow string pull-back while charging
    pub string_pull: f32,
    pub arrows: Vec<ArrowView>,
}

impl Snapshot {
    /// Capture the state at clock time `now_ms`
    pub fn capture(state: &SessionState, now_ms: f64) -> Self {
        let level = state.level();
        let charge_power = state.charge_power(now_ms);
        Self {
            phase: state.phase,
            level_index: state.level_index,
            level_count: state.level_count(),
            level_name: level.name.clone(),
            goal: level.min_score_to_advance,
            arrows_remaining: state.arrows_remaining,
            score: state.score,
            shots_fired: state.shots_fired,
            hits: state.hits,
            accuracy: state.accuracy_label(),
            wind: state.wind.value,
            wind_needle: state.wind.needle(level.wind_max),
            target_pos: state.target.position(),
            target_radius: state.target.radius,
            bow_pos: state.bow.pos,
            bow_angle: state.bow.angle,
            charge_power,
            string_pull: charge_power
                .map(|p| STRING_PULL_REST + STRING_PULL_RANGE * p)
                .unwrap_or(0.0),
            arrows: state
                .arrows
                .iter()
                .map(|a| ArrowView {
                    id: a.id,
                    pos: a.pos,
                    rotation: a.rotation,
                    stuck: a.stuck,
                    score: a.score,
                })
                .collect(),
        }
    }

    /// "3 / 6" style level counter
    pub fn level_label(&self) -> String {
        format!("{} / {}", self.level_index + 1, self.level_count)
    }

    /// Wind formatted for the HUD
    pub fn wind_label(&self) -> String {
        format!("{:.2}", self.wind)
    }
}

/// Between-level screen text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub title: String,
    pub message: String,
}

/// Overlay for the snapshot's phase (`None` while playing).
///
/// `next_level_name` is shown after a pass when another level follows.
pub fn overlay(snapshot: &Snapshot, next_level_name: Option<&str>) -> Option<Overlay> {
    let (title, message) = match snapshot.phase {
        GamePhase::Playing => return None,
        GamePhase::AwaitingStart if snapshot.shots_fired == 0 && snapshot.score == 0 => (
            "Game Reset".to_string(),
            "Click Start to begin a new challenge.".to_string(),
        ),
        GamePhase::AwaitingStart => (
            "Ready".to_string(),
            format!("Next: {}\nPress Start to begin.", snapshot.level_name),
        ),
        GamePhase::LevelPassed => match next_level_name {
            Some(next) => (
                "Level Complete!".to_string(),
                format!(
                    "Next: {}\nCurrent Score: {}\nAccuracy: {}\nPress Continue to proceed.",
                    next, snapshot.score, snapshot.accuracy
                ),
            ),
            None => (
                "You Finished the Trial!".to_string(),
                format!(
                    "Grand Total Score: {}\nFinal Accuracy: {}\nPress Continue to see your results.",
                    snapshot.score, snapshot.accuracy
                ),
            ),
        },
        GamePhase::LevelFailed => (
            "Level Failed".to_string(),
            format!(
                "You did not reach the required score.\nTotal Score: {}\nAccuracy: {}\nPress Continue to retry this level.",
                snapshot.score, snapshot.accuracy
            ),
        ),
        GamePhase::AllLevelsComplete => (
            "All Levels Complete!".to_string(),
            format!(
                "Final Score: {}\nAccuracy: {}\nPress Reset to play again.",
                snapshot.score, snapshot.accuracy
            ),
        ),
    };
    Some(Overlay { title, message })
}
