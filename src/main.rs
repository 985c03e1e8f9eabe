//! Archery Trial headless runner
//!
//! Plays a full run with a simple aiming bot and logs the outcome. Rendering
//! and raw input belong to a front end; this binary only drives the core.
//!
//! Usage: `archery-trial [wind-seed]` (set `RUST_LOG=debug` for every shot)

mod bot {
    use archery_trial::consts::SIM_DT;
    use archery_trial::sim::{Arrow, ArrowStep, GameEvent, GamePhase, SessionState};
    use archery_trial::{Clock, ManualClock, Session};
    use glam::Vec2;
    use rand_pcg::Pcg32;

    /// Milliseconds per simulated frame
    const FRAME_MS: f64 = 16.0;
    /// Give up on a level after this many failed attempts
    const MAX_ATTEMPTS: u32 = 5;
    /// Safety stop for the whole run
    const MAX_FRAMES: u64 = 2_000_000;

    /// Try launch angles at full power and keep the best-scoring one
    fn plan_shot(state: &SessionState) -> Vec2 {
        let speed = state.tuning.launch_speed(1.0);
        let wind = state.wind.value;
        let mut best = (0u32, Vec2::X);

        let mut angle = -0.6f32;
        while angle <= 0.3 {
            let aim = Vec2::new(angle.cos(), angle.sin());
            let mut target = state.target.clone();
            let mut arrow = Arrow::launch(0, state.bow.pos, aim, speed);
            for _ in 0..400 {
                target.update(SIM_DT);
                match arrow.integrate(SIM_DT, wind, &target, &state.tuning) {
                    ArrowStep::Hit { score, .. } => {
                        if score > best.0 {
                            best = (score, aim);
                        }
                        break;
                    }
                    ArrowStep::Lost | ArrowStep::Settled => break,
                    ArrowStep::InFlight => {}
                }
            }
            angle += 0.002;
        }
        best.1
    }

    fn log_events(events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::ArrowHit { id, ring, score } => {
                    log::debug!("  arrow {}: ring {} (+{})", id, ring + 1, score)
                }
                GameEvent::ArrowLost { id } => log::debug!("  arrow {}: lost", id),
                _ => {}
            }
        }
    }

    pub fn run(seed: u64) {
        let mut session: Session<ManualClock, Pcg32> = Session::with_parts(
            SessionState::default(),
            ManualClock::new(0.0),
            rand::SeedableRng::seed_from_u64(seed),
        );
        log::info!("Headless run with wind seed {}", seed);

        let mut attempts = 0;
        let mut frames = 0u64;
        session.start_level();

        while frames < MAX_FRAMES {
            match session.state().phase {
                GamePhase::AllLevelsComplete => break,
                GamePhase::LevelFailed => {
                    attempts += 1;
                    if attempts >= MAX_ATTEMPTS {
                        log::warn!("Giving up after {} attempts", attempts);
                        break;
                    }
                    session.acknowledge_transition();
                }
                GamePhase::LevelPassed => {
                    if let Some(shown) = session.overlay() {
                        log::info!("{}", shown.title);
                    }
                    attempts = 0;
                    session.acknowledge_transition();
                }
                GamePhase::AwaitingStart => session.start_level(),
                GamePhase::Playing => {
                    let now = session.clock().now_ms();
                    let state = session.state();
                    let ready = state.arrows_remaining > 0 && state.all_settled();
                    let charging = state.is_charging();
                    let target_pos = state.target.position();
                    if ready && !charging {
                        session.aim_at(target_pos);
                        session.begin_charge(now);
                    } else if session.charge_power() == Some(1.0) {
                        let aim = plan_shot(session.state());
                        session.resolve_shot(now, aim);
                    }
                }
            }

            session.clock().advance(FRAME_MS);
            session.advance(SIM_DT);
            log_events(session.drain_events());
            frames += 1;
        }

        let snap = session.snapshot();
        println!(
            "Reached level {} ({}) - phase: {}, score: {}, accuracy: {}",
            snap.level_label(),
            snap.level_name,
            snap.phase.as_str(),
            snap.score,
            snap.accuracy
        );
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    bot::run(seed);
}

