//! Life rule and the double-buffered generation step
//!
//! Every cell's next state is computed from the pre-step grid only. The step
//! reads one arena and writes the other; committing swaps them, so no pass
//! ever observes a partially updated neighbourhood.

use serde::{Deserialize, Serialize};

use super::grid::{Grid, NeighborAxis};

/// Next state of a cell under the life rule
#[inline]
pub fn next_state(alive: bool, live_neighbors: usize) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Write the next generation of `src` into `dst`. Returns the live count of `dst`.
///
/// `dst` must have the same size as `src`; only alive flags are written.
pub fn step_into(src: &Grid, dst: &mut Grid) -> usize {
    assert_eq!(src.size(), dst.size(), "step buffers differ in size");
    let size = src.size();
    let mut alive_count = 0;
    for x in 0..size {
        for y in 0..size {
            let neighbors = src.count_neighbors(x, y, NeighborAxis::All);
            let alive = next_state(src.is_alive(x, y), neighbors);
            dst.set_state(x, y, alive);
            alive_count += alive as usize;
        }
    }
    alive_count
}

/// Pure single step returning a fresh grid
pub fn step(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    step_into(grid, &mut next);
    next
}

/// Two grid arenas: the committed generation and a scratch buffer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Automaton {
    current: Grid,
    scratch: Grid,
}

impl Automaton {
    pub fn new(grid: Grid) -> Self {
        let scratch = grid.clone();
        Self {
            current: grid,
            scratch,
        }
    }

    /// The committed generation
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    /// Mutable access to the committed generation (projectile births)
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.current
    }

    /// Compute the next generation into the scratch arena without committing.
    /// Returns the live cell count of the pending generation.
    pub fn step(&mut self) -> usize {
        step_into(&self.current, &mut self.scratch)
    }

    /// The generation computed by the last `step`
    pub fn pending(&self) -> &Grid {
        &self.scratch
    }

    /// Make the pending generation current
    pub fn commit(&mut self) {
        std::mem::swap(&mut self.current, &mut self.scratch);
    }
}
