//! Data-driven game balance
//!
//! Every gameplay number lives here so a run can be reconfigured from JSON
//! without touching the simulation. Defaults match `crate::consts`.

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Inclusive rectangle the player's top-left corner may occupy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl PlayerBounds {
    #[inline]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        pos.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Board ===
    pub board_width: f32,
    pub board_height: f32,
    pub grid_step: f32,
    pub near_inset: f32,
    pub far_inset: f32,
    pub start_bottom_gap: f32,

    // === Entities ===
    pub player_size: f32,
    pub car_width: f32,
    pub car_height: f32,
    pub lanes: Vec<f32>,
    pub palette: Vec<u32>,

    // === Traffic ===
    pub cull_margin: f32,
    pub spawn_offset: f32,
    pub base_speed: f32,
    pub speed_step: f32,
    pub speed_step_points: u64,
    pub speed_jitter: f32,
    pub spawn_chance: f64,
    pub initial_vehicles: usize,

    // === Scoring / timing ===
    pub score_per_step: u64,
    pub tick_interval_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            grid_step: GRID_STEP,
            near_inset: NEAR_INSET,
            far_inset: FAR_INSET,
            start_bottom_gap: START_BOTTOM_GAP,

            player_size: PLAYER_SIZE,
            car_width: CAR_WIDTH,
            car_height: CAR_HEIGHT,
            lanes: LANES.to_vec(),
            palette: PALETTE.to_vec(),

            cull_margin: CULL_MARGIN,
            spawn_offset: SPAWN_OFFSET,
            base_speed: BASE_SPEED,
            speed_step: SPEED_STEP,
            speed_step_points: SPEED_STEP_POINTS,
            speed_jitter: SPEED_JITTER,
            spawn_chance: SPAWN_CHANCE,
            initial_vehicles: INITIAL_VEHICLES,

            score_per_step: SCORE_PER_STEP,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Shrink the board to fit a viewport, keeping the default board as the cap.
    ///
    /// Fails if the shrunken board no longer validates (lanes fall off the
    /// board or the player bounds collapse).
    pub fn fit_viewport(mut self, viewport_width: f32, viewport_height: f32) -> Result<Self> {
        self.board_width = BOARD_WIDTH.min(viewport_width - 40.0);
        self.board_height = BOARD_HEIGHT.min(viewport_height - 200.0);
        self.validate()?;
        Ok(self)
    }

    /// Reject configurations the simulation cannot run sensibly
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidTuning(msg));

        if !(self.board_width > 0.0 && self.board_height > 0.0) {
            return invalid(format!(
                "board must be positive, got {}x{}",
                self.board_width, self.board_height
            ));
        }
        if !(self.grid_step > 0.0 && self.player_size > 0.0) {
            return invalid("grid_step and player_size must be positive".into());
        }
        if !(self.car_width > 0.0 && self.car_height > 0.0) {
            return invalid("car dimensions must be positive".into());
        }
        if self.lanes.is_empty() {
            return invalid("at least one lane is required".into());
        }
        if let Some(lane) = self
            .lanes
            .iter()
            .find(|&&y| !(0.0..self.board_height).contains(&y))
        {
            return invalid(format!("lane {lane} lies outside the board"));
        }
        if self.palette.is_empty() {
            return invalid("palette must not be empty".into());
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return invalid(format!("spawn_chance {} not in [0, 1]", self.spawn_chance));
        }
        if self.spawn_offset >= self.cull_margin {
            return invalid(format!(
                "spawn_offset {} must be smaller than cull_margin {}",
                self.spawn_offset, self.cull_margin
            ));
        }
        if self.base_speed <= 0.0 || self.speed_jitter < 0.0 || self.speed_step < 0.0 {
            return invalid("speeds must be positive".into());
        }
        if self.speed_step_points == 0 {
            return invalid("speed_step_points must be non-zero".into());
        }
        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms must be non-zero".into());
        }
        if self.player_bounds().min.cmpgt(self.player_bounds().max).any() {
            return invalid("board too small for the player insets".into());
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Where the player stands at the start of a run
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            self.board_width / 2.0,
            self.board_height - self.grid_step - self.start_bottom_gap,
        )
    }

    pub fn player_bounds(&self) -> PlayerBounds {
        PlayerBounds {
            min: Vec2::splat(self.near_inset),
            max: Vec2::new(
                self.board_width - self.far_inset,
                self.board_height - self.far_inset,
            ),
        }
    }

    /// Vehicles outside this open interval are culled
    #[inline]
    pub fn live_x_range(&self) -> (f32, f32) {
        (-self.cull_margin, self.board_width + self.cull_margin)
    }
}
