//! Fixed timestep session driver
//!
//! Owns one `GameState` and the high score store. The host calls `update`
//! with elapsed wall-clock time from its timer and forwards input in between;
//! both take `&mut self`, so a move can never land in the middle of a tick.

use std::time::Duration;

use crate::consts::MAX_SUBSTEPS;
use crate::error::Result;
use crate::highscore::HighScoreStore;
use crate::input::Direction;
use crate::sim::{GameEvent, GameState, RunPhase, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<S: HighScoreStore> {
    state: GameState,
    store: S,
    accumulator: Duration,
}

impl<S: HighScoreStore> Session<S> {
    /// Start a run, reading the high score from the store once
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Result<Self> {
        let high_score = store.load();
        let state = GameState::new(seed, tuning, high_score)?;
        log::info!("Starting run with seed {} (high score {})", seed, high_score);
        Ok(Self {
            state,
            store,
            accumulator: Duration::ZERO,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    /// Apply one movement command immediately. Returns true if it scored.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        self.state.move_player(direction)
    }

    /// Begin a new run after game over. Returns false if the run is still going.
    pub fn restart(&mut self) -> bool {
        let restarted = self.state.restart();
        if restarted {
            self.accumulator = Duration::ZERO;
        }
        restarted
    }

    /// Run exactly one tick and handle its side effects
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let events = tick(&mut self.state, &TickInput::default());
        self.handle_events(&events);
        events
    }

    /// Run as many whole ticks as `elapsed` covers, capped at `MAX_SUBSTEPS`.
    ///
    /// Leftover time carries over to the next call; time beyond the cap is dropped.
    pub fn update(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let interval = self.state.tuning.tick_interval();
        self.accumulator += elapsed;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= interval && substeps < MAX_SUBSTEPS {
            self.accumulator -= interval;
            substeps += 1;
            events.extend(self.tick());
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= interval {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        // The loop stops with the run
        if self.state.phase == RunPhase::GameOver {
            self.accumulator = Duration::ZERO;
        }

        events
    }

    /// JSON snapshot for a presentation layer
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.state)?)
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::GameOver {
                high_score,
                new_high_score: true,
                ..
            } = event
            {
                if let Err(err) = self.store.save(*high_score) {
                    log::warn!("Failed to persist high score {}: {}", high_score, err);
                }
            }
        }
    }
}
