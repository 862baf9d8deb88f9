//! The automaton's universe: an N×N toroidal grid of cells
//!
//! Storage is a flat column-major array (`x * size + y`) so that the boolean
//! export matches the `matrix[x][y]` layout the rest of the game uses.
//! Neighbour lookups wrap at the edges: index -1 is N-1 and index N is 0.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use crate::consts::CELL_SIZE;
use crate::grid_to_world;

/// Which neighbours to count around a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborAxis {
    /// Full eight-connected (Moore) neighbourhood
    All,
    /// Only (x-1, y) and (x+1, y)
    X,
    /// Only (x, y-1) and (x, y+1)
    Y,
}

impl NeighborAxis {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            NeighborAxis::All => &[
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1),
            ],
            NeighborAxis::X => &[(-1, 0), (1, 0)],
            NeighborAxis::Y => &[(0, -1), (0, 1)],
        }
    }
}

/// Square grid of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-dead grid. `size` must be at least 1.
    pub fn dead(size: usize) -> Self {
        let size = size.max(1);
        let mut cells = Vec::with_capacity(size * size);
        for x in 0..size {
            for y in 0..size {
                cells.push(Cell::new(grid_to_world(x, y), CELL_SIZE));
            }
        }
        Self { size, cells }
    }

    /// Build from a column-major boolean matrix; cells are born where true.
    /// Panics if the matrix is not square (levels are validated upstream).
    pub fn from_matrix(matrix: &[Vec<bool>]) -> Self {
        let mut grid = Self::dead(matrix.len());
        for (x, column) in matrix.iter().enumerate() {
            assert!(
                column.len() == matrix.len(),
                "column {} has {} cells, expected {}",
                x,
                column.len(),
                matrix.len()
            );
            for (y, &alive) in column.iter().enumerate() {
                if alive {
                    grid.set_alive(x, y);
                }
            }
        }
        grid
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.size && y < self.size, "grid index out of range");
        x * self.size + y
    }

    /// Cell at (x, y). Panics if out of range.
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    /// Cell at a signed index, or None if outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if x < 0 || y < 0 || x as usize >= self.size || y as usize >= self.size {
            return None;
        }
        Some(self.cell(x as usize, y as usize))
    }

    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)].is_alive()
    }

    pub fn set_alive(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.cells[idx].set_alive();
    }

    pub fn set_dead(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.cells[idx].set_dead();
    }

    #[inline]
    pub(crate) fn set_state(&mut self, x: usize, y: usize, alive: bool) {
        let idx = self.index(x, y);
        self.cells[idx].set_state(alive);
    }

    /// Wrap a signed coordinate onto the torus
    #[inline]
    pub fn wrap(&self, v: i32) -> usize {
        v.rem_euclid(self.size as i32) as usize
    }

    /// Wrapped coordinates of the neighbours of (x, y) along `axis`
    pub fn neighbors(
        &self,
        x: usize,
        y: usize,
        axis: NeighborAxis,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        axis.offsets()
            .iter()
            .map(move |&(dx, dy)| (self.wrap(x as i32 + dx), self.wrap(y as i32 + dy)))
    }

    /// Live neighbours of (x, y) along `axis`, with wraparound
    pub fn count_neighbors(&self, x: usize, y: usize, axis: NeighborAxis) -> usize {
        self.neighbors(x, y, axis)
            .filter(|&(nx, ny)| self.is_alive(nx, ny))
            .count()
    }

    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Iterate every cell with its grid index
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / size, i % size), cell))
    }

    /// Column-major alive/dead copy (`matrix[x][y]`)
    pub fn to_bool_matrix(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.size)
            .map(|column| column.iter().map(Cell::is_alive).collect())
            .collect()
    }
}
