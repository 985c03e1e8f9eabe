//! Session state and core simulation types
//!
//! Everything a run needs lives here. Target and arrows are owned by the
//! session and replaced wholesale at level boundaries.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arrow::Arrow;
use super::levels::{LevelCatalog, LevelConfig};
use super::target::Target;
use super::wind::WindState;
use crate::tuning::Tuning;

/// Level progression phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start the current level
    #[default]
    AwaitingStart,
    /// Arrows are being fired and simulated
    Playing,
    /// Level cleared, waiting for acknowledgement
    LevelPassed,
    /// Level missed its goal, waiting for acknowledgement to retry
    LevelFailed,
    /// Final level cleared (terminal until reset)
    AllLevelsComplete,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::AwaitingStart => "Awaiting Start",
            GamePhase::Playing => "Playing",
            GamePhase::LevelPassed => "Level Passed",
            GamePhase::LevelFailed => "Level Failed",
            GamePhase::AllLevelsComplete => "All Levels Complete",
        }
    }
}

/// Something collaborators may want to react to (sound, "+N" popups, overlays)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: usize },
    ArrowLoosed { id: u32, power: f32 },
    ArrowHit { id: u32, ring: usize, score: u32 },
    ArrowLost { id: u32 },
    WindShift { wind: f32 },
    LevelPassed { level: usize },
    LevelFailed { level: usize },
    RunComplete { score: u64 },
    RunReset,
}

/// The bow: fixed x, y eases toward the aim point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bow {
    pub pos: Vec2,
    /// Angle toward the aim point (radians)
    pub angle: f32,
    /// Last known aim point (pointer position)
    pub aim_point: Vec2,
}

impl Bow {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            angle: 0.0,
            aim_point: pos + Vec2::X,
        }
    }

    /// Ease toward the aim point by `tracking` of the remaining distance
    pub fn track(&mut self, tracking: f32) {
        self.pos.y += (self.aim_point.y - self.pos.y) * tracking;
        let to_aim = self.aim_point - self.pos;
        self.angle = to_aim.y.atan2(to_aim.x);
    }
}

/// Bow-string hold in progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    /// Clock time (ms) the hold started
    pub started_ms: f64,
}

/// Complete run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub catalog: LevelCatalog,
    pub tuning: Tuning,
    /// Current level (0-based)
    pub level_index: usize,
    pub phase: GamePhase,
    /// Arrows left to fire this attempt
    pub arrows_remaining: u32,
    /// Cumulative run score (only reset by a full reset)
    pub score: u64,
    pub shots_fired: u32,
    /// Shots that scored
    pub hits: u32,
    pub wind: WindState,
    /// Active hold, if charging
    pub charge: Option<Charge>,
    pub bow: Bow,
    pub target: Target,
    /// Arrows fired this attempt, in firing order
    pub arrows: Vec<Arrow>,
    /// Pending events for collaborators
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl SessionState {
    pub fn new(catalog: LevelCatalog, tuning: Tuning) -> Self {
        let bow = Bow::new(Vec2::new(tuning.bow_x, tuning.bow_y));
        let target = Target::for_level(catalog.level(0), tuning.field_height / 2.0, tuning.target_speed_scale);
        Self {
            catalog,
            tuning,
            level_index: 0,
            phase: GamePhase::AwaitingStart,
            arrows_remaining: 0,
            score: 0,
            shots_fired: 0,
            hits: 0,
            wind: WindState::default(),
            charge: None,
            bow,
            target,
            arrows: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new arrow ID
    pub fn next_arrow_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Configuration of the current level
    #[inline]
    pub fn level(&self) -> &LevelConfig {
        self.catalog.level(self.level_index)
    }

    #[inline]
    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    #[inline]
    pub fn is_charging(&self) -> bool {
        self.charge.is_some()
    }

    /// Every arrow fired this attempt has come to rest
    pub fn all_settled(&self) -> bool {
        self.arrows.iter().all(|a| a.stuck)
    }

    /// Power fraction of the active hold at `now_ms`
    pub fn charge_power(&self, now_ms: f64) -> Option<f32> {
        self.charge
            .map(|c| self.tuning.power_for_hold(now_ms - c.started_ms))
    }

    /// Hit rate in percent, rounded to one decimal (0 with no shots)
    pub fn accuracy(&self) -> f32 {
        if self.shots_fired == 0 {
            return 0.0;
        }
        let pct = self.hits as f64 / self.shots_fired as f64 * 100.0;
        ((pct * 10.0).round() / 10.0) as f32
    }

    /// Accuracy as shown on the HUD ("0%" or e.g. "66.7%")
    pub fn accuracy_label(&self) -> String {
        if self.shots_fired == 0 {
            return "0%".to_string();
        }
        format!("{:.1}%", self.accuracy())
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fresh target for the current level
    pub(crate) fn spawn_target(&mut self) {
        self.target = Target::for_level(
            self.catalog.level(self.level_index),
            self.tuning.field_height / 2.0,
            self.tuning.target_speed_scale,
        );
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(LevelCatalog::default(), Tuning::default())
    }
}
