//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - No rendering, timer or storage dependencies

pub mod collision;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, collides, first_collision};
pub use motion::advance_vehicles;
pub use spawn::{base_speed_for_score, should_spawn, spawn_vehicle};
pub use state::{GameEvent, GameState, Heading, RunPhase, Vehicle};
pub use tick::{TickInput, step, tick};
