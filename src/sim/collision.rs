//! Collision detection between the player and traffic
//!
//! Both the player and vehicles are axis-aligned boxes anchored at their
//! top-left corner, the same convention motion and rendering use.

use glam::Vec2;

use super::state::Vehicle;
use crate::tuning::Tuning;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; boxes that only touch along an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max().x
            && self.max().x > other.min.x
            && self.min.y < other.max().y
            && self.max().y > other.min.y
    }

    pub fn player(pos: Vec2, tuning: &Tuning) -> Self {
        Self::new(pos, Vec2::splat(tuning.player_size))
    }

    pub fn vehicle(vehicle: &Vehicle, tuning: &Tuning) -> Self {
        Self::new(vehicle.pos, Vec2::new(tuning.car_width, tuning.car_height))
    }
}

/// First vehicle overlapping the player, if any
pub fn first_collision<'a>(player: Vec2, vehicles: &'a [Vehicle], tuning: &Tuning) -> Option<&'a Vehicle> {
    let player_box = Aabb::player(player, tuning);
    vehicles
        .iter()
        .find(|v| player_box.overlaps(&Aabb::vehicle(v, tuning)))
}

/// True if any vehicle overlaps the player
#[inline]
pub fn collides(player: Vec2, vehicles: &[Vehicle], tuning: &Tuning) -> bool {
    first_collision(player, vehicles, tuning).is_some()
}
