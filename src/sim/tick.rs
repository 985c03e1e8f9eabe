//! Per-tick simulation and player commands
//!
//! Tick order is fixed: wind, bow, target motion, arrows (in firing order),
//! then a single end-of-level check. Commands are the only other way the
//! state changes; each one is a silent no-op in phases where it makes no
//! sense.

use glam::Vec2;

use super::arrow::{Arrow, ArrowStep};
use super::state::{Charge, GameEvent, GamePhase, SessionState};
use super::wind::WindSource;

/// Advance the simulation by one fixed step.
///
/// `now_ms` gates the wind re-roll; `dt` drives target motion and arrow
/// physics. Nothing moves outside `Playing`.
pub fn tick(state: &mut SessionState, dt: f32, now_ms: f64, wind_source: &mut impl WindSource) {
    if !state.is_playing() {
        return;
    }

    // 1. Wind
    let ceiling = state.level().wind_max;
    let interval = state.tuning.wind_change_interval_ms;
    if let Some(wind) = state.wind.update(now_ms, ceiling, interval, wind_source) {
        log::debug!("Wind shifted to {:.2}", wind);
        state.events.push(GameEvent::WindShift { wind });
    }

    // Bow follows the pointer (cosmetic, no effect on this tick's physics)
    state.bow.track(state.tuning.bow_tracking);

    // 2. Target motion
    state.target.update(dt);

    // 3. Arrows, oldest first, against the moved target
    let wind = state.wind.value;
    for arrow in &mut state.arrows {
        match arrow.integrate(dt, wind, &state.target, &state.tuning) {
            ArrowStep::Hit { ring, score } => {
                state.score += score as u64;
                if score > 0 {
                    state.hits += 1;
                }
                log::debug!("Arrow {} hit ring {} for {}", arrow.id, ring, score);
                state.events.push(GameEvent::ArrowHit {
                    id: arrow.id,
                    ring,
                    score,
                });
            }
            ArrowStep::Lost => {
                log::debug!("Arrow {} lost at {:?}", arrow.id, arrow.pos);
                state.events.push(GameEvent::ArrowLost { id: arrow.id });
            }
            ArrowStep::InFlight | ArrowStep::Settled => {}
        }
    }

    // 4. End of level, once per tick
    check_level_end(state);
}

/// Decide pass/fail once the quiver is empty and every arrow has landed
fn check_level_end(state: &mut SessionState) {
    if !state.is_playing() || state.arrows_remaining > 0 || !state.all_settled() {
        return;
    }

    let level = state.level_index;
    let goal = state.level().min_score_to_advance as u64;
    if state.score >= goal {
        log::info!(
            "Level {} ({}) passed: score {} / goal {}, accuracy {}",
            level + 1,
            state.level().name,
            state.score,
            goal,
            state.accuracy_label()
        );
        state.phase = GamePhase::LevelPassed;
        state.events.push(GameEvent::LevelPassed { level });
    } else {
        log::info!(
            "Level {} ({}) failed: score {} / goal {}",
            level + 1,
            state.level().name,
            state.score,
            goal
        );
        state.phase = GamePhase::LevelFailed;
        state.events.push(GameEvent::LevelFailed { level });
    }
}

/// Set up the current level and begin play
fn enter_level(state: &mut SessionState, now_ms: f64) {
    let arrows = state.level().arrows;
    state.arrows_remaining = arrows;
    state.arrows.clear();
    state.spawn_target();
    state.wind.reset(now_ms);
    state.charge = None;
    state.phase = GamePhase::Playing;

    log::info!(
        "Level {}/{} ({}) started: {} arrows, goal {}",
        state.level_index + 1,
        state.level_count(),
        state.level().name,
        arrows,
        state.level().min_score_to_advance
    );
    state.events.push(GameEvent::LevelStarted {
        level: state.level_index,
    });
}

/// Start button: begin the current level.
///
/// Behaves like [`acknowledge_transition`] while a pass/fail result is pending.
pub fn start_level(state: &mut SessionState, now_ms: f64) {
    match state.phase {
        GamePhase::AwaitingStart => enter_level(state, now_ms),
        GamePhase::LevelPassed | GamePhase::LevelFailed => acknowledge_transition(state, now_ms),
        GamePhase::Playing | GamePhase::AllLevelsComplete => {}
    }
}

/// Continue button: move past a pass/fail result.
///
/// Passing moves to the next level, or completes the run after the last one.
/// Failing retries the same level; the run score is kept.
pub fn acknowledge_transition(state: &mut SessionState, now_ms: f64) {
    match state.phase {
        GamePhase::LevelPassed => {
            if state.level_index + 1 < state.level_count() {
                state.level_index += 1;
                enter_level(state, now_ms);
            } else {
                log::info!(
                    "Trial complete: score {}, accuracy {}",
                    state.score,
                    state.accuracy_label()
                );
                state.phase = GamePhase::AllLevelsComplete;
                state.events.push(GameEvent::RunComplete { score: state.score });
            }
        }
        GamePhase::LevelFailed => enter_level(state, now_ms),
        GamePhase::AwaitingStart => enter_level(state, now_ms),
        GamePhase::Playing | GamePhase::AllLevelsComplete => {}
    }
}

/// Reset button: back to level 1 with every counter zeroed
pub fn reset_run(state: &mut SessionState, now_ms: f64) {
    state.level_index = 0;
    state.score = 0;
    state.shots_fired = 0;
    state.hits = 0;
    state.arrows_remaining = 0;
    state.arrows.clear();
    state.charge = None;
    state.wind.reset(now_ms);
    state.spawn_target();
    state.phase = GamePhase::AwaitingStart;

    log::info!("Run reset");
    state.events.push(GameEvent::RunReset);
}

/// Pointer moved: the bow eases toward this point on later ticks
pub fn aim_at(state: &mut SessionState, point: Vec2) {
    state.bow.aim_point = point;
}

/// Press: start drawing the bow.
///
/// Ignored unless playing, idle, and holding arrows.
pub fn begin_charge(state: &mut SessionState, now_ms: f64) {
    if !state.is_playing() || state.is_charging() || state.arrows_remaining == 0 {
        return;
    }
    state.charge = Some(Charge { started_ms: now_ms });
}

/// Release: loose an arrow along `aim` with power from the hold time.
///
/// Without an active hold this does nothing. Outside `Playing` (or with an
/// empty quiver) the hold is dropped and no arrow is created.
pub fn resolve_shot(state: &mut SessionState, now_ms: f64, aim: Vec2) -> Option<Arrow> {
    let charge = state.charge.take()?;
    if !state.is_playing() || state.arrows_remaining == 0 {
        return None;
    }

    let power = state.tuning.power_for_hold(now_ms - charge.started_ms);
    let speed = state.tuning.launch_speed(power);
    let id = state.next_arrow_id();
    let arrow = Arrow::launch(id, state.bow.pos, aim, speed);

    state.arrows.push(arrow);
    state.arrows_remaining -= 1;
    state.shots_fired += 1;
    state.events.push(GameEvent::ArrowLoosed { id, power });

    Some(arrow)
}
