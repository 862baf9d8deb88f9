//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Automaton steps read a stable snapshot, never a half-written grid
//! - Control events are applied between ticks, never during one
//! - No rendering, audio or platform dependencies

pub mod automaton;
pub mod cell;
pub mod collision;
pub mod grid;
pub mod state;
pub mod tick;

pub use automaton::{Automaton, next_state, step, step_into};
pub use cell::{Cell, CellKind, Control, Direction, Player, Projectile};
pub use collision::{Impact, hits_wall, player_hits_enemy, projectile_impact};
pub use grid::{Grid, NeighborAxis};
pub use state::{RenderCell, RoundEvent, RoundPhase, RoundState};
pub use tick::{TickOutcome, tick};
