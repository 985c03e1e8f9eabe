//! Top-level driver
//!
//! Owns the run state together with its clock and wind source, and exposes
//! the commands and tick entry point an input/render loop calls.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::clock::{Clock, MonotonicClock};
use crate::hud::{Overlay, Snapshot, overlay};
use crate::sim::{self, Arrow, GameEvent, LevelCatalog, SessionState, WindSource};
use crate::tuning::Tuning;

/// A playable run
pub struct Session<C: Clock = MonotonicClock, W: WindSource = Pcg32> {
    state: SessionState,
    clock: C,
    wind: W,
}

impl Session {
    /// Default six-level run on the wall clock with freshly seeded wind
    pub fn new() -> Self {
        let seed: u64 = rand::random();
        log::info!("New session (wind seed {})", seed);
        Self::with_parts(
            SessionState::default(),
            MonotonicClock::new(),
            Pcg32::seed_from_u64(seed),
        )
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, W: WindSource> Session<C, W> {
    /// Assemble a session from its parts
    pub fn with_parts(state: SessionState, clock: C, wind: W) -> Self {
        Self { state, clock, wind }
    }

    /// Custom level table and tuning
    pub fn with_config(catalog: LevelCatalog, tuning: Tuning, clock: C, wind: W) -> Self {
        Self::with_parts(SessionState::new(catalog, tuning), clock, wind)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run one simulation tick with physics step `dt`
    pub fn advance(&mut self, dt: f32) {
        let now = self.clock.now_ms();
        sim::tick(&mut self.state, dt, now, &mut self.wind);
    }

    pub fn start_level(&mut self) {
        let now = self.clock.now_ms();
        sim::start_level(&mut self.state, now);
    }

    pub fn acknowledge_transition(&mut self) {
        let now = self.clock.now_ms();
        sim::acknowledge_transition(&mut self.state, now);
    }

    pub fn reset_run(&mut self) {
        let now = self.clock.now_ms();
        sim::reset_run(&mut self.state, now);
    }

    pub fn aim_at(&mut self, point: Vec2) {
        sim::aim_at(&mut self.state, point);
    }

    /// Press, timestamped by the input event
    pub fn begin_charge(&mut self, now_ms: f64) {
        sim::begin_charge(&mut self.state, now_ms);
    }

    /// Release, timestamped by the input event
    pub fn resolve_shot(&mut self, now_ms: f64, aim: Vec2) -> Option<Arrow> {
        sim::resolve_shot(&mut self.state, now_ms, aim)
    }

    /// Power fraction of the current hold, if any
    pub fn charge_power(&self) -> Option<f32> {
        self.state.charge_power(self.clock.now_ms())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.clock.now_ms())
    }

    /// Between-level screen text for the current phase
    pub fn overlay(&self) -> Option<Overlay> {
        let next = self
            .state
            .catalog
            .get(self.state.level_index + 1)
            .map(|l| l.name.as_str());
        overlay(&self.snapshot(), next)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
