//! Fixed interval simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::first_collision;
use super::motion::advance_vehicles;
use super::state::{GameEvent, GameState, RunPhase};
use crate::input::Direction;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Step queued since the last tick (key/swipe/button)
    pub movement: Option<Direction>,
    /// Start a new run (only honoured after game over)
    pub restart: bool,
}

/// Advance the game state by one tick.
///
/// Input is applied first, so a move always lands between two simulation
/// steps. Then vehicles move and are culled, the player is tested against the
/// moved traffic, and finally a new vehicle may spawn.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart && state.restart() {
        events.push(GameEvent::Restarted);
    }

    // Nothing moves once the run is over
    if state.phase == RunPhase::GameOver {
        return events;
    }

    if let Some(direction) = input.movement {
        if state.move_player(direction) {
            events.push(GameEvent::Scored { score: state.score });
        }
    }

    state.time_ticks += 1;

    advance_vehicles(&mut state.vehicles, &state.tuning);

    if let Some(vehicle) = first_collision(state.player, &state.vehicles, &state.tuning) {
        log::debug!("Player hit by vehicle {} at {}", vehicle.id, vehicle.pos);
        events.push(state.end_run());
        return events;
    }

    if let Some(id) = state.maybe_spawn_vehicle() {
        events.push(GameEvent::VehicleSpawned { id });
    }

    events
}

/// Pure form of [`tick`]: returns the next snapshot, leaving `state` untouched
pub fn step(state: &GameState, input: &TickInput) -> (GameState, Vec<GameEvent>) {
    let mut next = state.clone();
    let events = tick(&mut next, input);
    (next, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Heading, Vehicle};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn quiet_road() -> GameState {
        let mut state = GameState::new(12345, quiet_tuning(), 0).expect("valid tuning");
        state.vehicles.clear();
        state
    }

    fn parked_car(state: &mut GameState, pos: Vec2, speed: f32) {
        let id = state.next_entity_id();
        state.vehicles.push(Vehicle {
            id,
            pos,
            speed,
            color: 0xF59E0B,
            heading: Heading::Right,
        });
    }

    fn up() -> TickInput {
        TickInput {
            movement: Some(Direction::Up),
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_moves_traffic() {
        let mut state = quiet_road();
        parked_car(&mut state, Vec2::new(0.0, 120.0), 2.0);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.vehicles[0].pos.x, 2.0);
    }

    #[test]
    fn test_collision_checked_after_motion() {
        let mut state = quiet_road();
        let player = state.player;
        // Car ends one unit short of the player; it overlaps only after moving
        parked_car(&mut state, Vec2::new(player.x - 40.0, player.y), 3.0);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, RunPhase::GameOver);
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_game_over_freezes_everything() {
        let mut state = quiet_road();
        state.tuning.spawn_chance = 1.0;
        let player = state.player;
        parked_car(&mut state, player, 1.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, RunPhase::GameOver);
        // No spawn on the tick that ended the run
        assert_eq!(state.vehicles.len(), 1);

        let frozen_x = state.vehicles[0].pos.x;
        let frozen_ticks = state.time_ticks;
        for _ in 0..10 {
            assert!(tick(&mut state, &up()).is_empty());
        }
        assert_eq!(state.vehicles.len(), 1);
        assert_eq!(state.vehicles[0].pos.x, frozen_x);
        assert_eq!(state.time_ticks, frozen_ticks);
        assert_eq!(state.player, player);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_restart_input() {
        let mut state = quiet_road();
        let player = state.player;
        parked_car(&mut state, player, 1.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, RunPhase::GameOver);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let events = tick(&mut state, &restart);
        assert_eq!(events.first(), Some(&GameEvent::Restarted));
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.player, state.tuning.player_start());

        // Restart while running is ignored
        let events = tick(&mut state, &restart);
        assert!(!events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_restart_is_idempotent_across_runs() {
        let mut state = GameState::new(77, Tuning::default(), 0).expect("valid tuning");
        for run in 0..5 {
            for _ in 0..run * 3 {
                tick(&mut state, &up());
            }
            let player = state.player;
            parked_car(&mut state, player, 0.5);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.phase, RunPhase::GameOver);

            assert!(state.restart());
            assert_eq!(state.player, state.tuning.player_start());
            assert_eq!(state.score, 0);
            assert_eq!(state.vehicles.len(), state.tuning.initial_vehicles);
            assert_eq!(state.phase, RunPhase::Running);
        }
    }

    #[test]
    fn test_five_steps_then_crash() {
        let mut state = quiet_road();
        assert_eq!((state.score, state.high_score), (0, 0));

        for _ in 0..5 {
            let events = tick(&mut state, &up());
            assert!(matches!(events.as_slice(), [GameEvent::Scored { .. }]));
        }
        assert_eq!(state.score, 50);
        assert_eq!(state.phase, RunPhase::Running);

        let player = state.player;
        parked_car(&mut state, player, 1.0);
        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, RunPhase::GameOver);
        assert_eq!(state.high_score, 50);
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                score: 50,
                high_score: 50,
                new_high_score: true
            }]
        );
    }

    #[test]
    fn test_step_leaves_input_state_untouched() {
        let state = quiet_road();
        let (next, events) = step(&state, &up());
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(next.score, 10);
        assert_eq!(next.time_ticks, 1);
        assert_eq!(events, vec![GameEvent::Scored { score: 10 }]);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Tuning::default(), 0).expect("valid tuning");
        let mut state2 = GameState::new(99999, Tuning::default(), 0).expect("valid tuning");

        let inputs = [
            TickInput::default(),
            TickInput {
                movement: Some(Direction::Left),
                ..Default::default()
            },
            up(),
            TickInput::default(),
        ];

        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            let events1 = tick(&mut state1, input);
            let events2 = tick(&mut state2, input);
            assert_eq!(events1, events2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.vehicles, state2.vehicles);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.phase, state2.phase);
    }

    #[test]
    fn test_traffic_stays_bounded() {
        // Player parked in the corner above every lane, so the run never ends
        let mut state = GameState::new(2024, Tuning::default(), 0).expect("valid tuning");
        state.player = Vec2::new(20.0, 20.0);

        let mut spawned = 0;
        let mut peak = 0;
        for _ in 0..20_000 {
            for event in tick(&mut state, &TickInput::default()) {
                if matches!(event, GameEvent::VehicleSpawned { .. }) {
                    spawned += 1;
                }
            }
            peak = peak.max(state.vehicles.len());
        }

        assert_eq!(state.phase, RunPhase::Running);
        assert!(spawned > 100);
        // Slowest vehicle needs (400 + 160) / 1.5 ≈ 374 ticks to cross
        assert!(peak < 40, "peak traffic {peak}");
    }
}
