//! Fixed timestep simulation tick
//!
//! One call advances a round by one frame. Every `delay` ticks the automaton
//! steps; the ticks in between only move the actors, which makes motion look
//! continuous between generations.
//!
//! Order within a tick is fixed:
//! 1. snapshot the projectile's grid index
//! 2. step the automaton (generation ticks only)
//! 3. player vs walls (revert on contact)
//! 4. player vs live cells (death)
//! 5. advance projectile and player
//! 6. projectile vs walls and live cells
//! 7. birth at the snapshot index and reset the projectile on impact

use super::collision::{hits_wall, player_hits_enemy, projectile_impact, resolve_impact};
use super::state::{RoundEvent, RoundPhase, RoundState};
use crate::world_to_grid;

/// What a tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The automaton advanced a generation this tick
    pub stepped: bool,
    /// Terminal event, reported once
    pub event: Option<RoundEvent>,
}

/// Advance the round by one tick
pub fn tick(state: &mut RoundState) -> TickOutcome {
    if !state.is_playing() {
        return TickOutcome::default();
    }

    // Birth location if the projectile hits something this tick
    let prev_index = world_to_grid(state.projectile.position());

    let stepped = state.time_ticks % state.delay == 0;
    if stepped {
        state.time_ticks = 0;
        state.generation += 1;
        let alive = state.automaton.step();
        if alive == 0 {
            log::debug!("generation {} cleared the grid", state.generation);
            state.phase = RoundPhase::Cleared;
            return TickOutcome {
                stepped,
                event: Some(RoundEvent::Cleared),
            };
        }
        state.automaton.commit();
    }
    state.time_ticks += 1;

    let size = state.grid().size();
    if hits_wall(state.player.position(), size) {
        state.player.revert();
    }

    let mut event = None;
    if player_hits_enemy(state.grid(), state.player.position()) {
        log::debug!("player hit a live cell at {:?}", world_to_grid(state.player.position()));
        state.player.kill();
        state.phase = RoundPhase::PlayerDead;
        event = Some(RoundEvent::PlayerDied);
    }

    state
        .projectile
        .advance(state.player.position(), state.player.direction());
    state.player.update();

    if let Some(impact) = projectile_impact(state.grid(), &state.projectile) {
        log::trace!("projectile {:?} impact, birth at {:?}", impact, prev_index);
        resolve_impact(state.automaton.grid_mut(), &mut state.projectile, prev_index);
    }

    TickOutcome { stepped, event }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_to_world;
    use crate::sim::cell::{Control, Direction};
    use crate::sim::grid::Grid;
    use glam::Vec3;

    fn round_with(size: usize, alive: &[(usize, usize)], delay: u32) -> RoundState {
        let mut grid = Grid::dead(size);
        for &(x, y) in alive {
            grid.set_alive(x, y);
        }
        RoundState::new(grid, delay)
    }

    #[test]
    fn test_interpolation_tick_keeps_grid() {
        let mut state = round_with(9, &[(6, 5), (6, 6), (6, 7)], 60);
        let before = state.grid().clone();
        let outcome = tick(&mut state);
        assert!(!outcome.stepped);
        assert_eq!(outcome.event, None);
        assert_eq!(state.grid(), &before);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_generation_every_delay_ticks() {
        let mut state = round_with(9, &[(6, 5), (6, 6), (6, 7)], 60);
        let mut stepped_at = Vec::new();
        for t in 1..=180 {
            if tick(&mut state).stepped {
                stepped_at.push(t);
            }
        }
        assert_eq!(stepped_at, vec![60, 120, 180]);
        assert_eq!(state.generation, 3);
        // blinker: odd number of generations leaves it horizontal
        assert!(state.grid().is_alive(5, 6));
        assert!(state.grid().is_alive(7, 6));
        assert!(!state.grid().is_alive(6, 5));
    }

    #[test]
    fn test_round_cleared_exactly_once() {
        let mut state = round_with(7, &[(5, 5)], 60);
        let mut cleared = 0;
        for _ in 0..300 {
            if tick(&mut state).event == Some(RoundEvent::Cleared) {
                cleared += 1;
            }
        }
        assert_eq!(cleared, 1);
        assert_eq!(state.phase, RoundPhase::Cleared);
        assert_eq!(tick(&mut state), TickOutcome::default());
    }

    #[test]
    fn test_player_dies_on_live_cell() {
        // still-life block two rows above the spawn at (3,1)
        let mut state = round_with(7, &[(3, 3), (3, 4), (4, 3), (4, 4)], 60);
        state.apply_control(Control::Forward);
        assert_eq!(tick(&mut state).event, None);

        state.apply_control(Control::Forward);
        let outcome = tick(&mut state);
        assert_eq!(outcome.event, Some(RoundEvent::PlayerDied));
        assert!(!state.is_player_alive());
        assert_eq!(state.phase, RoundPhase::PlayerDead);

        // terminal: nothing more is reported
        assert_eq!(tick(&mut state).event, None);
    }

    #[test]
    fn test_player_reverts_on_wall() {
        let mut state = round_with(5, &[(4, 4)], 60);
        // spawn (2,1) facing up; left turn faces -x
        state.apply_control(Control::TurnLeft);
        tick(&mut state);
        state.apply_control(Control::Forward);
        tick(&mut state);
        assert_eq!(state.player.position(), grid_to_world(0, 1));

        state.apply_control(Control::Forward);
        assert_eq!(state.player.position(), Vec3::new(-2.0, 2.0, 1.0));
        tick(&mut state);
        assert_eq!(state.player.position(), grid_to_world(0, 1));
        assert!(state.is_player_alive());
        // the glued projectile followed the reverted player
        assert_eq!(state.projectile.position(), grid_to_world(0, 1));
    }

    #[test]
    fn test_projectile_wall_birth_at_pre_advance_index() {
        let mut state = round_with(5, &[(0, 0)], 60);
        state.apply_control(Control::Fire);

        // (2,1) -> (2,2) -> (2,3) -> (2,4): (2,4) sits exactly on the extent
        for _ in 0..3 {
            tick(&mut state);
            assert!(state.projectile.is_firing());
        }
        assert_eq!(state.projectile.position(), grid_to_world(2, 4));

        // next step leaves the grid
        tick(&mut state);
        assert!(state.grid().is_alive(2, 4));
        assert!(!state.projectile.is_alive());
        assert!(!state.projectile.is_firing());
        assert_eq!(state.projectile.position(), grid_to_world(2, 1));
        assert_eq!(state.count_alive(), 2);
    }

    #[test]
    fn test_projectile_enemy_hit_along_travel_axis() {
        let mut state = round_with(7, &[(3, 5)], 60);
        state.apply_control(Control::Fire);

        tick(&mut state); // (3,2)
        tick(&mut state); // (3,3)
        assert!(state.projectile.is_firing());

        tick(&mut state); // (3,4) touches (3,5) along y
        assert!(state.grid().is_alive(3, 3));
        assert!(!state.grid().is_alive(3, 4));
        assert!(state.grid().is_alive(3, 5));
        assert!(!state.projectile.is_firing());
        assert_eq!(state.projectile.position(), grid_to_world(3, 1));
    }

    #[test]
    fn test_projectile_diagonal_graze_passes() {
        let mut state = round_with(7, &[(5, 2)], 60);
        state.apply_control(Control::TurnRight);
        tick(&mut state);
        assert_eq!(state.player.position(), grid_to_world(4, 1));
        assert_eq!(state.projectile.direction(), Direction::RIGHT);

        state.apply_control(Control::Fire);
        tick(&mut state); // (5,1): (5,2) is above, off the x axis
        assert!(state.projectile.is_firing());
        tick(&mut state); // (6,1)
        assert!(state.projectile.is_firing());
        tick(&mut state); // (7,1) is outside
        assert!(!state.projectile.is_firing());
        assert!(state.grid().is_alive(6, 1));
        assert!(!state.grid().is_alive(5, 1));
    }

    #[test]
    fn test_refire_after_impact_starts_from_origin() {
        let mut state = round_with(5, &[(0, 0)], 60);
        state.apply_control(Control::Fire);
        for _ in 0..4 {
            tick(&mut state);
        }
        assert!(!state.projectile.is_firing());

        state.apply_control(Control::Fire);
        assert!(state.projectile.is_firing());
        tick(&mut state);
        assert_eq!(state.projectile.position(), grid_to_world(2, 2));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = round_with(9, &[(1, 6), (2, 6), (3, 6), (7, 7)], 60);
        let mut state2 = state1.clone();

        let script = [
            Some(Control::TurnRight),
            None,
            Some(Control::Fire),
            None,
            Some(Control::TurnLeft),
            None,
            None,
        ];

        for _ in 0..20 {
            for control in script {
                if let Some(c) = control {
                    state1.apply_control(c);
                    state2.apply_control(c);
                }
                assert_eq!(tick(&mut state1), tick(&mut state2));
            }
        }

        assert_eq!(state1.grid(), state2.grid());
        assert_eq!(state1.player.position(), state2.player.position());
        assert_eq!(state1.phase, state2.phase);
    }
}
