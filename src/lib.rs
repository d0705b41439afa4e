//! Cross Road - a lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, game state)
//! - `input`: Keyboard/swipe/button normalization to movement commands
//! - `highscore`: Persisted high score storage
//! - `session`: Fixed timestep driver that ties the simulation to a store
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod highscore;
pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use highscore::{HighScoreStore, MemoryStore};
pub use input::Direction;
pub use session::Session;
pub use tuning::Tuning;

#[cfg(not(target_arch = "wasm32"))]
pub use highscore::FileStore;
#[cfg(target_arch = "wasm32")]
pub use highscore::LocalStorageStore;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick interval in milliseconds
    pub const TICK_INTERVAL_MS: u64 = 60;
    /// Maximum ticks per update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 400.0;
    pub const BOARD_HEIGHT: f32 = 600.0;

    /// Player moves exactly one grid step per command
    pub const GRID_STEP: f32 = 30.0;
    pub const PLAYER_SIZE: f32 = 25.0;
    /// Minimum distance from the top/left edge
    pub const NEAR_INSET: f32 = 20.0;
    /// Minimum distance from the bottom/right edge
    pub const FAR_INSET: f32 = 40.0;
    /// Gap between the start row and the bottom edge, on top of one grid step
    pub const START_BOTTOM_GAP: f32 = 20.0;

    /// Vehicle footprint
    pub const CAR_WIDTH: f32 = 40.0;
    pub const CAR_HEIGHT: f32 = 20.0;
    /// Vehicles are culled once they are this far past either board edge
    pub const CULL_MARGIN: f32 = 100.0;
    /// Vehicles spawn this far outside the board
    pub const SPAWN_OFFSET: f32 = 60.0;
    /// Lane y coordinates, top to bottom
    pub const LANES: [f32; 4] = [120.0, 200.0, 280.0, 360.0];
    /// Vehicle colours (0xRRGGBB)
    pub const PALETTE: [u32; 5] = [0xEF4444, 0x3B82F6, 0xF59E0B, 0x8B5CF6, 0x10B981];

    /// Traffic speed: base + floor(score / SPEED_STEP_POINTS) * SPEED_STEP + jitter
    pub const BASE_SPEED: f32 = 1.5;
    pub const SPEED_STEP: f32 = 0.3;
    pub const SPEED_STEP_POINTS: u64 = 50;
    pub const SPEED_JITTER: f32 = 1.5;

    /// Per-tick probability of spawning one vehicle
    pub const SPAWN_CHANCE: f64 = 0.015;
    /// Vehicles seeded at the start of every run
    pub const INITIAL_VEHICLES: usize = 2;
    /// Points for every step toward the goal
    pub const SCORE_PER_STEP: u64 = 10;
}
