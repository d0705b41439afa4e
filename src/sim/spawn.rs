//! Vehicle spawning
//!
//! Pure functions over an explicit random source, so seeded tests can pin
//! down exactly what traffic appears.

use glam::Vec2;
use rand::Rng;

use super::state::{Heading, Vehicle};
use crate::tuning::Tuning;

/// Traffic base speed for a score. Grows in discrete steps.
pub fn base_speed_for_score(tuning: &Tuning, score: u64) -> f32 {
    let steps = score / tuning.speed_step_points;
    tuning.base_speed + steps as f32 * tuning.speed_step
}

/// Build a vehicle just off-screen on the side it will enter from
pub fn spawn_vehicle<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, score: u64, id: u32) -> Vehicle {
    let lane = tuning.lanes[rng.random_range(0..tuning.lanes.len())];
    let heading = if rng.random_bool(0.5) {
        Heading::Right
    } else {
        Heading::Left
    };
    let start_x = match heading {
        Heading::Right => -tuning.spawn_offset,
        Heading::Left => tuning.board_width + tuning.spawn_offset,
    };
    let speed = base_speed_for_score(tuning, score) + rng.random::<f32>() * tuning.speed_jitter;
    let color = tuning.palette[rng.random_range(0..tuning.palette.len())];

    Vehicle {
        id,
        pos: Vec2::new(start_x, lane),
        speed,
        color,
        heading,
    }
}

/// Per-tick spawn roll
#[inline]
pub fn should_spawn<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> bool {
    rng.random_bool(tuning.spawn_chance)
}
