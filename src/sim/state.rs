//! Round state and core simulation types
//!
//! A round owns the grid, the player and the projectile for one attempt at a
//! level. Renderers and audio only ever see derived copies.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::automaton::Automaton;
use super::cell::{CellKind, Control, Player, Projectile};
use super::grid::Grid;
use crate::consts::{CELL_SIZE, MIN_DELAY};
use crate::grid_to_world;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Ticks advance the simulation
    Playing,
    /// The automaton died out
    Cleared,
    /// The player ran into a live cell
    PlayerDead,
}

/// Terminal events reported by a tick, each at most once per round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A generation step left zero live cells
    Cleared,
    /// The player collided with a live cell
    PlayerDied,
}

/// One cell as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCell {
    pub kind: CellKind,
    pub position: Vec3,
    pub alive: bool,
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub(crate) automaton: Automaton,
    pub player: Player,
    pub projectile: Projectile,
    /// Ticks between automaton generations
    pub delay: u32,
    /// Tick counter; a generation runs when it reaches a multiple of `delay`
    pub time_ticks: u32,
    /// Generations run so far
    pub generation: u64,
    pub phase: RoundPhase,
}

impl RoundState {
    /// Start a round on `grid`, stepping every `delay` ticks
    pub fn new(grid: Grid, delay: u32) -> Self {
        let size = grid.size();
        // Row 1 when there is room, so a 1x1 grid still spawns in bounds
        let spawn = grid_to_world(size / 2, 1usize.min(size - 1));
        let player = Player::new(spawn, CELL_SIZE);
        let projectile = Projectile::new(player.position(), CELL_SIZE);

        Self {
            automaton: Automaton::new(grid),
            player,
            projectile,
            delay: delay.max(MIN_DELAY),
            // 1 so the first generation waits a full interval
            time_ticks: 1,
            generation: 0,
            phase: RoundPhase::Playing,
        }
    }

    /// Start a round from a column-major boolean matrix
    pub fn from_matrix(matrix: &[Vec<bool>], delay: u32) -> Self {
        Self::new(Grid::from_matrix(matrix), delay)
    }

    pub fn grid(&self) -> &Grid {
        self.automaton.grid()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == RoundPhase::Playing
    }

    pub fn is_player_alive(&self) -> bool {
        self.player.is_alive()
    }

    pub fn count_alive(&self) -> usize {
        self.grid().count_alive()
    }

    /// Apply a control event between ticks
    pub fn apply_control(&mut self, control: Control) {
        if !self.is_playing() {
            return;
        }
        match control {
            Control::Fire => self.projectile.fire(self.player.direction()),
            turn => self.player.apply_control(turn),
        }
    }

    /// Copy of the grid as `matrix[x][y]`, for the audio layer
    pub fn audio_snapshot(&self) -> Vec<Vec<bool>> {
        self.grid().to_bool_matrix()
    }

    /// Every drawable cell: the grid, then the player and the projectile
    pub fn render_cells(&self) -> impl Iterator<Item = RenderCell> + '_ {
        let grid = self.grid().iter().map(|(_, cell)| RenderCell {
            kind: CellKind::Grid,
            position: cell.position(),
            alive: cell.is_alive(),
        });
        let actors = [
            RenderCell {
                kind: CellKind::Player,
                position: self.player.position(),
                alive: self.player.is_alive(),
            },
            RenderCell {
                kind: CellKind::Projectile,
                position: self.projectile.position(),
                alive: self.projectile.is_alive(),
            },
        ];
        grid.chain(actors)
    }
}
