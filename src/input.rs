//! Input normalization
//!
//! Keyboard keys, swipe gestures and on-screen buttons all reduce to a
//! single four-way `Direction` before reaching the simulation.

use serde::{Deserialize, Serialize};

/// Minimum swipe length (pixels) before a gesture counts as a move
pub const MIN_SWIPE_DISTANCE: f32 = 30.0;

/// A one-grid-step movement command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward the goal (decreasing y)
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// On-screen button order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a key name (`KeyboardEvent.key` style) to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Direction::Up),
            "s" | "arrowdown" => Some(Direction::Down),
            "a" | "arrowleft" => Some(Direction::Left),
            "d" | "arrowright" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Map a swipe delta (screen space, y down) to a direction.
    ///
    /// The dominant axis wins; short swipes are ignored.
    pub fn from_swipe(dx: f32, dy: f32, min_distance: f32) -> Option<Self> {
        if dx.abs() > dy.abs() {
            if dx.abs() > min_distance {
                return Some(if dx > 0.0 {
                    Direction::Right
                } else {
                    Direction::Left
                });
            }
        } else if dy.abs() > min_distance {
            return Some(if dy > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            });
        }
        None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}
