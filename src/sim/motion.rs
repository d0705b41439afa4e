//! Vehicle motion and off-screen culling

use super::state::Vehicle;
use crate::tuning::Tuning;

/// Move every vehicle one tick along its lane and drop the ones that left
/// the board (plus margin). Returns how many were culled.
pub fn advance_vehicles(vehicles: &mut Vec<Vehicle>, tuning: &Tuning) -> usize {
    let (min_x, max_x) = tuning.live_x_range();
    let before = vehicles.len();

    for vehicle in vehicles.iter_mut() {
        vehicle.pos.x += vehicle.velocity();
    }
    vehicles.retain(|v| v.pos.x > min_x && v.pos.x < max_x);

    before - vehicles.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Heading;
    use glam::Vec2;

    fn vehicle(x: f32, speed: f32, heading: Heading) -> Vehicle {
        Vehicle {
            id: 1,
            pos: Vec2::new(x, 120.0),
            speed,
            color: 0xEF4444,
            heading,
        }
    }

    #[test]
    fn test_heading_sets_travel_sign() {
        let tuning = Tuning::default();
        let mut vehicles = vec![vehicle(100.0, 2.0, Heading::Right), vehicle(100.0, 2.0, Heading::Left)];
        advance_vehicles(&mut vehicles, &tuning);
        assert_eq!(vehicles[0].pos, Vec2::new(102.0, 120.0));
        assert_eq!(vehicles[1].pos, Vec2::new(98.0, 120.0));
    }

    #[test]
    fn test_right_bound_vehicle_culled_on_schedule() {
        let tuning = Tuning::default();
        let exit_tick = ((tuning.board_width + 160.0) / 5.0) as usize;
        let mut vehicles = vec![vehicle(-60.0, 5.0, Heading::Right)];

        for _ in 0..exit_tick - 1 {
            assert_eq!(advance_vehicles(&mut vehicles, &tuning), 0);
        }
        assert_eq!(vehicles.len(), 1);
        assert_eq!(advance_vehicles(&mut vehicles, &tuning), 1);
        assert!(vehicles.is_empty());
    }

    #[test]
    fn test_left_bound_vehicle_culled() {
        let tuning = Tuning::default();
        let mut vehicles = vec![vehicle(tuning.board_width + 60.0, 5.0, Heading::Left)];
        let mut ticks = 0;
        while !vehicles.is_empty() {
            advance_vehicles(&mut vehicles, &tuning);
            ticks += 1;
        }
        assert_eq!(ticks, ((tuning.board_width + 160.0) / 5.0) as usize);
    }
}
