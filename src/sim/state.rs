//! Game state and core simulation types
//!
//! Everything a presentation layer needs to draw a frame lives on `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use crate::error::Result;
use crate::input::Direction;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Traffic moving, input accepted
    Running,
    /// Player was hit; waiting for restart
    GameOver,
}

/// Travel direction of a vehicle, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Increasing x
    Right,
    /// Decreasing x
    Left,
}

impl Heading {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Right => 1.0,
            Heading::Left => -1.0,
        }
    }
}

/// A vehicle entity travelling along one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    /// Top-left corner; `pos.y` is the lane and never changes
    pub pos: Vec2,
    /// Distance per tick
    pub speed: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub heading: Heading,
}

impl Vehicle {
    /// Horizontal displacement applied every tick
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.speed * self.heading.sign()
    }
}

/// Things that happened during a tick, for audio/UI/persistence hooks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Player stepped toward the goal
    Scored { score: u64 },
    VehicleSpawned { id: u32 },
    /// Run ended on a collision
    GameOver {
        score: u64,
        high_score: u64,
        new_high_score: bool,
    },
    Restarted,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance numbers this state runs with
    pub tuning: Tuning,
    pub phase: RunPhase,
    /// Player top-left corner
    pub player: Vec2,
    /// Live vehicles (order not significant)
    pub vehicles: Vec<Vehicle>,
    pub score: u64,
    /// Best score across runs; never decreases
    pub high_score: u64,
    /// Set when the last run beat the previous high score
    pub new_high_score: bool,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    #[serde(skip)]
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a running game with the initial vehicles already on the road.
    ///
    /// Fails with `Error::InvalidTuning` if `tuning` does not validate.
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Result<Self> {
        tuning.validate()?;

        let mut state = Self {
            seed,
            phase: RunPhase::Running,
            player: tuning.player_start(),
            vehicles: Vec::new(),
            score: 0,
            high_score,
            new_high_score: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        };

        state.seed_initial_vehicles();
        Ok(state)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Spawn one vehicle using the state's RNG and current score
    pub fn spawn_vehicle(&mut self) -> u32 {
        let id = self.next_entity_id();
        let vehicle = spawn::spawn_vehicle(&mut self.rng, &self.tuning, self.score, id);
        log::debug!(
            "Spawned vehicle {} at lane {} heading {:?} speed {:.2}",
            id,
            vehicle.pos.y,
            vehicle.heading,
            vehicle.speed
        );
        self.vehicles.push(vehicle);
        id
    }

    /// Roll the per-tick spawn chance; returns the new vehicle's id if one appeared
    pub fn maybe_spawn_vehicle(&mut self) -> Option<u32> {
        if spawn::should_spawn(&mut self.rng, &self.tuning) {
            Some(self.spawn_vehicle())
        } else {
            None
        }
    }

    fn seed_initial_vehicles(&mut self) {
        for _ in 0..self.tuning.initial_vehicles {
            self.spawn_vehicle();
        }
    }

    /// Move the player one grid step, clamped to the board.
    ///
    /// Returns true if the move scored (strictly decreased y). No-op unless running.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }

        let step = self.tuning.grid_step;
        let delta = match direction {
            Direction::Up => Vec2::new(0.0, -step),
            Direction::Down => Vec2::new(0.0, step),
            Direction::Left => Vec2::new(-step, 0.0),
            Direction::Right => Vec2::new(step, 0.0),
        };

        let prev = self.player;
        self.player = self.tuning.player_bounds().clamp(prev + delta);

        if self.player.y < prev.y {
            self.score += self.tuning.score_per_step;
            true
        } else {
            false
        }
    }

    /// Transition Running -> GameOver, folding the score into the high score
    pub fn end_run(&mut self) -> GameEvent {
        self.phase = RunPhase::GameOver;
        self.new_high_score = self.score > self.high_score;
        if self.new_high_score {
            self.high_score = self.score;
            log::info!("New high score: {}", self.high_score);
        }
        log::info!(
            "Game over after {} ticks: score {}, high score {}",
            self.time_ticks,
            self.score,
            self.high_score
        );

        GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score,
            new_high_score: self.new_high_score,
        }
    }

    /// Start a fresh run from GameOver. Returns false (and changes nothing) otherwise.
    pub fn restart(&mut self) -> bool {
        if self.phase != RunPhase::GameOver {
            return false;
        }

        self.player = self.tuning.player_start();
        self.vehicles.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.new_high_score = false;
        self.phase = RunPhase::Running;
        self.seed_initial_vehicles();

        log::info!("Run restarted (high score {})", self.high_score);
        true
    }
}
