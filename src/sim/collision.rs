//! Collision detection between actors, walls and the automaton grid
//!
//! Actors move in continuous world units; the grid is indexed by integer
//! (column, row). Walls only exist for the player and the projectile: the
//! automaton itself wraps around and never leaves the grid.

use glam::{IVec2, Vec3};

use super::cell::{Direction, Projectile};
use super::grid::{Grid, NeighborAxis};
use crate::consts::CELL_SPACING;
use crate::world_to_grid;

/// Result of a projectile collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Projectile left the grid
    Wall,
    /// Projectile is axis-adjacent to a live cell
    Enemy,
}

/// Largest in-bounds coordinate on a grid of `size` cells
#[inline]
pub fn world_extent(size: usize) -> f32 {
    size.saturating_sub(1) as f32 * CELL_SPACING
}

/// True if `pos` lies outside the grid on either axis
pub fn hits_wall(pos: Vec3, size: usize) -> bool {
    let max = world_extent(size);
    pos.x < 0.0 || pos.y < 0.0 || pos.x > max || pos.y > max
}

/// True if the grid cell under `pos` is alive. `pos` must be in bounds.
pub fn player_hits_enemy(grid: &Grid, pos: Vec3) -> bool {
    let idx = world_to_grid(pos);
    grid.is_alive(idx.x as usize, idx.y as usize)
}

/// Neighbour axis to search around a projectile travelling in `dir`
#[inline]
pub fn travel_axis(dir: Direction) -> NeighborAxis {
    if dir.is_horizontal() {
        NeighborAxis::X
    } else {
        NeighborAxis::Y
    }
}

/// Check a live projectile against walls and the grid.
///
/// Enemy contact only looks along the travel axis so that grazing a live cell
/// diagonally does not count as a hit.
pub fn projectile_impact(grid: &Grid, projectile: &Projectile) -> Option<Impact> {
    if !projectile.is_alive() {
        return None;
    }
    let pos = projectile.position();
    if hits_wall(pos, grid.size()) {
        return Some(Impact::Wall);
    }
    let idx = world_to_grid(pos);
    let axis = travel_axis(projectile.direction());
    if grid.count_neighbors(idx.x as usize, idx.y as usize, axis) > 0 {
        return Some(Impact::Enemy);
    }
    None
}

/// Apply an impact: give birth at the projectile's last valid index and reset it.
///
/// `birth` is the grid index captured before this tick's movement.
pub fn resolve_impact(grid: &mut Grid, projectile: &mut Projectile, birth: IVec2) {
    grid.set_alive(birth.x as usize, birth.y as usize);
    projectile.reset_to_origin();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_to_world;

    fn grid_with(size: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::dead(size);
        for &(x, y) in alive {
            grid.set_alive(x, y);
        }
        grid
    }

    fn flying(at: (usize, usize), dir: Direction) -> Projectile {
        let mut rocket = Projectile::new(grid_to_world(at.0, at.1), 1);
        rocket.advance(grid_to_world(at.0, at.1), dir);
        rocket.fire(dir);
        rocket
    }

    #[test]
    fn test_wall_boundary_is_inclusive() {
        // N = 5 -> max coordinate is 4 * 2 = 8
        assert!(!hits_wall(Vec3::new(8.0, 8.0, 1.0), 5));
        assert!(!hits_wall(Vec3::new(0.0, 0.0, 1.0), 5));
        assert!(hits_wall(Vec3::new(9.0, 0.0, 1.0), 5));
        assert!(hits_wall(Vec3::new(0.0, 10.0, 1.0), 5));
        assert!(hits_wall(Vec3::new(-2.0, 4.0, 1.0), 5));
        assert!(hits_wall(Vec3::new(4.0, -0.5, 1.0), 5));
    }

    #[test]
    fn test_single_cell_grid_extent() {
        assert!(!hits_wall(Vec3::new(0.0, 0.0, 1.0), 1));
        assert!(hits_wall(Vec3::new(0.0, 2.0, 1.0), 1));
    }

    #[test]
    fn test_player_hits_enemy() {
        let grid = grid_with(5, &[(2, 3)]);
        assert!(player_hits_enemy(&grid, Vec3::new(4.0, 6.0, 1.0)));
        assert!(!player_hits_enemy(&grid, Vec3::new(4.0, 4.0, 1.0)));
    }

    #[test]
    fn test_diagonal_graze_is_not_a_hit() {
        // live cell at (3,3), projectile at (2,2) moving along x
        let grid = grid_with(6, &[(3, 3)]);
        let rocket = flying((2, 2), Direction::RIGHT);
        assert_eq!(projectile_impact(&grid, &rocket), None);
    }

    #[test]
    fn test_axis_contact_is_a_hit() {
        // live cell at (2,4), projectile right below at (2,3) moving up
        let grid = grid_with(6, &[(2, 4)]);
        let rocket = flying((2, 3), Direction::UP);
        assert_eq!(projectile_impact(&grid, &rocket), Some(Impact::Enemy));

        // the same cell is not on the x axis of travel
        let rocket = flying((2, 3), Direction::RIGHT);
        assert_eq!(projectile_impact(&grid, &rocket), None);
    }

    #[test]
    fn test_wall_beats_enemy() {
        let grid = grid_with(3, &[(0, 0)]);
        let mut rocket = flying((2, 0), Direction::RIGHT);
        rocket.advance(Vec3::ZERO, Direction::UP);
        assert_eq!(projectile_impact(&grid, &rocket), Some(Impact::Wall));
    }

    #[test]
    fn test_dead_projectile_never_collides() {
        let grid = grid_with(3, &[(1, 2)]);
        let rocket = Projectile::new(grid_to_world(1, 1), 1);
        assert_eq!(projectile_impact(&grid, &rocket), None);
    }

    #[test]
    fn test_resolve_impact_births_and_resets() {
        let mut grid = Grid::dead(5);
        let mut rocket = flying((1, 1), Direction::UP);
        rocket.advance(Vec3::ZERO, Direction::UP);
        resolve_impact(&mut grid, &mut rocket, IVec2::new(1, 1));
        assert!(grid.is_alive(1, 1));
        assert!(!rocket.is_alive());
        assert!(!rocket.is_firing());
        assert_eq!(rocket.position(), grid_to_world(1, 1));
    }
}
