//! Simulation module
//!
//! All gameplay logic lives here. It stays free of rendering and input:
//! - Physics advances by a caller-supplied fixed step only
//! - Wall-clock time enters only as explicit `now_ms` arguments
//! - Randomness enters only through a `WindSource`
//! - Arrows are processed in firing order

pub mod arrow;
pub mod collision;
pub mod levels;
pub mod state;
pub mod target;
pub mod tick;
pub mod wind;

pub use arrow::{Arrow, ArrowStep};
pub use collision::{HitResult, arrow_target_collision, ring_index, ring_score, score_impact};
pub use levels::{CatalogError, LevelCatalog, LevelConfig, Motion};
pub use state::{Bow, Charge, GameEvent, GamePhase, SessionState};
pub use target::Target;
pub use tick::{acknowledge_transition, aim_at, begin_charge, reset_run, resolve_shot, start_level, tick};
pub use wind::{WindSource, WindState};
