//! Cross Road entry point
//!
//! Native builds run a headless demo: an autopilot plays a number of runs
//! through the same session loop a UI would use, and the high score is
//! persisted next to the working directory.
//!
//! Usage: `cross-road [runs] [seed] [--realtime]`
//! Set `CROSS_ROAD_TUNING=<file.json>` to override gameplay tuning.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use cross_road::sim::{GameEvent, GameState, RunPhase, TickInput, step};
    use cross_road::{Direction, FileStore, Session, Tuning};

    const HIGH_SCORE_FILE: &str = "cross_road_high_score.json";
    /// Ticks the autopilot simulates before committing to a move
    const LOOKAHEAD_TICKS: usize = 2;
    /// Safety net for runs the autopilot never loses
    const MAX_RUN_TICKS: u64 = 20_000;

    struct Options {
        runs: u32,
        seed: u64,
        realtime: bool,
    }

    fn parse_args() -> Options {
        let mut positional = Vec::new();
        let mut realtime = false;
        for arg in std::env::args().skip(1) {
            if arg == "--realtime" {
                realtime = true;
            } else {
                positional.push(arg);
            }
        }

        let runs = positional
            .first()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3);
        let seed = positional.get(1).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Options {
            runs,
            seed,
            realtime,
        }
    }

    fn load_tuning() -> Tuning {
        match std::env::var("CROSS_ROAD_TUNING") {
            Ok(path) => match Tuning::load(&path) {
                Ok(tuning) => tuning,
                Err(err) => {
                    log::warn!("Ignoring tuning file {}: {}", path, err);
                    Tuning::default()
                }
            },
            Err(_) => Tuning::default(),
        }
    }

    /// True if the player survives the next few ticks after `movement`
    fn survives(state: &GameState, movement: Option<Direction>) -> bool {
        let (mut next, _) = step(
            state,
            &TickInput {
                movement,
                ..Default::default()
            },
        );
        for _ in 1..LOOKAHEAD_TICKS {
            if next.phase != RunPhase::Running {
                return false;
            }
            next = step(&next, &TickInput::default()).0;
        }
        next.phase == RunPhase::Running
    }

    /// Prefer progress, then waiting, then sidestepping, then retreating
    fn choose_move(state: &GameState) -> Option<Direction> {
        let at_goal = state.player.y <= state.tuning.player_bounds().min.y;
        let candidates: [Option<Direction>; 5] = if at_goal {
            // Nothing left to gain up here; step back down to go again
            [
                Some(Direction::Down),
                None,
                Some(Direction::Left),
                Some(Direction::Right),
                Some(Direction::Up),
            ]
        } else {
            [
                Some(Direction::Up),
                None,
                Some(Direction::Left),
                Some(Direction::Right),
                Some(Direction::Down),
            ]
        };

        candidates
            .into_iter()
            .find(|&m| survives(state, m))
            .flatten()
    }

    pub fn run() {
        let options = parse_args();
        let tuning = load_tuning();
        let interval = tuning.tick_interval();

        let mut session = match Session::new(options.seed, tuning, FileStore::new(HIGH_SCORE_FILE)) {
            Ok(session) => session,
            Err(err) => {
                log::error!("Cannot start session: {}", err);
                std::process::exit(1);
            }
        };

        for run in 1..=options.runs {
            log::info!("Run {}/{}", run, options.runs);

            while session.phase() == RunPhase::Running {
                if let Some(direction) = choose_move(session.state()) {
                    log::trace!("Autopilot steps {}", direction.as_str());
                    session.move_player(direction);
                }

                for event in session.update(interval) {
                    if let GameEvent::GameOver {
                        score,
                        high_score,
                        new_high_score,
                    } = event
                    {
                        println!(
                            "Run {}: score {} (high score {}{})",
                            run,
                            score,
                            high_score,
                            if new_high_score { ", new!" } else { "" }
                        );
                    }
                }

                if session.state().time_ticks >= MAX_RUN_TICKS {
                    println!(
                        "Run {}: autopilot still alive after {} ticks with score {}",
                        run,
                        MAX_RUN_TICKS,
                        session.state().score
                    );
                    return;
                }

                if options.realtime {
                    std::thread::sleep(interval);
                }
            }

            match session.snapshot_json() {
                Ok(json) => log::debug!("Final state: {}", json),
                Err(err) => log::warn!("Could not serialize final state: {}", err),
            }

            if run < options.runs {
                session.restart();
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cross Road (native) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build embeds the library; there is no native entry point
}
