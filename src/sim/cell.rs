//! Cells and the two actor cells that ride on top of the grid
//!
//! Every entity in the game is a cell: the automaton's grid cells, the player
//! and the projectile. Actors share the plain [`Cell`] state and add a
//! direction plus their own response to [`Control`] events.

use std::str::FromStr;

use glam::{IVec2, Vec3};
use serde::{Deserialize, Serialize};

/// What a cell is, for renderers that draw them differently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// A cell of the automaton grid (an enemy when alive)
    Grid,
    /// The player-controlled cell
    Player,
    /// The projectile fired by the player
    Projectile,
}

/// Discrete player commands, applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    /// Quarter turn counterclockwise, then step
    TurnLeft,
    /// Step without turning
    Forward,
    /// Quarter turn clockwise, then step
    TurnRight,
    /// Launch the projectile
    Fire,
}

impl FromStr for Control {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Control::TurnLeft),
            "forward" | "up" => Ok(Control::Forward),
            "right" => Ok(Control::TurnRight),
            "fire" | "space" => Ok(Control::Fire),
            _ => Err(()),
        }
    }
}

/// Axis-aligned unit direction with integer components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direction(IVec2);

impl Direction {
    pub const UP: Self = Self(IVec2::new(0, 1));
    pub const DOWN: Self = Self(IVec2::new(0, -1));
    pub const LEFT: Self = Self(IVec2::new(-1, 0));
    pub const RIGHT: Self = Self(IVec2::new(1, 0));

    /// 90° counterclockwise
    pub fn turned_left(self) -> Self {
        Self(IVec2::new(-self.0.y, self.0.x))
    }

    /// 90° clockwise
    pub fn turned_right(self) -> Self {
        Self(IVec2::new(self.0.y, -self.0.x))
    }

    /// Apply a steering control; `Fire` leaves the direction alone
    pub fn steer(self, control: Control) -> Self {
        match control {
            Control::TurnLeft => self.turned_left(),
            Control::TurnRight => self.turned_right(),
            Control::Forward | Control::Fire => self,
        }
    }

    /// True if travel is along the x axis
    #[inline]
    pub fn is_horizontal(self) -> bool {
        self.0.x.abs() == 1
    }

    #[inline]
    pub fn as_ivec2(self) -> IVec2 {
        self.0
    }

    /// World-space displacement for one step of `spacing` units
    #[inline]
    pub fn step(self, spacing: f32) -> Vec3 {
        Vec3::new(self.0.x as f32 * spacing, self.0.y as f32 * spacing, 0.0)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::UP
    }
}

/// A single cell: a position and a binary alive/dead state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pos: Vec3,
    alive: bool,
    size: u32,
}

impl Cell {
    /// New cells are always dead
    pub fn new(pos: Vec3, size: u32) -> Self {
        Self {
            pos,
            alive: false,
            size,
        }
    }

    pub fn set_alive(&mut self) {
        self.alive = true;
    }

    pub fn set_dead(&mut self) {
        self.alive = false;
    }

    /// Write the alive flag directly (used by the automaton pass)
    #[inline]
    pub fn set_state(&mut self, alive: bool) {
        self.alive = alive;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.pos
    }

    pub fn set_position(&mut self, pos: Vec3) {
        self.pos = pos;
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Distance between neighbouring cell origins: the cell plus an equal gap
    #[inline]
    pub fn spacing(&self) -> f32 {
        (self.size * 2) as f32
    }
}

/// The player: a live cell steered by relative turns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub cell: Cell,
    dir: Direction,
    /// Position held after the last tick's update (wall collisions revert here)
    settled_pos: Vec3,
}

impl Player {
    /// Player spawns alive, facing up
    pub fn new(pos: Vec3, size: u32) -> Self {
        let mut cell = Cell::new(pos, size);
        cell.set_alive();
        Self {
            cell,
            dir: Direction::UP,
            settled_pos: pos,
        }
    }

    /// Turn relative to the current heading, then jump one cell
    pub fn apply_control(&mut self, control: Control) {
        self.dir = self.dir.steer(control);
        let step = self.dir.step(self.cell.spacing());
        self.cell.set_position(self.cell.position() + step);
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn position(&self) -> Vec3 {
        self.cell.position()
    }

    pub fn is_alive(&self) -> bool {
        self.cell.is_alive()
    }

    pub fn kill(&mut self) {
        self.cell.set_dead();
    }

    /// Undo any movement since the last update
    pub fn revert(&mut self) {
        self.cell.set_position(self.settled_pos);
    }

    /// Commit the current position as the new revert target
    pub fn update(&mut self) {
        self.settled_pos = self.cell.position();
    }
}

/// The projectile: glued to the player until fired, then ballistic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub cell: Cell,
    dir: Direction,
    firing: bool,
    origin: Vec3,
}

impl Projectile {
    /// Starts hidden (dead) at the given position
    pub fn new(pos: Vec3, size: u32) -> Self {
        Self {
            cell: Cell::new(pos, size),
            dir: Direction::UP,
            firing: false,
            origin: pos,
        }
    }

    /// Launch in the parent's current heading. Ignored while already in flight.
    pub fn fire(&mut self, parent_dir: Direction) {
        if self.firing {
            return;
        }
        self.dir = parent_dir;
        self.firing = true;
        self.cell.set_alive();
    }

    /// Fly one step if firing, otherwise track the parent and adopt its heading
    pub fn advance(&mut self, parent_pos: Vec3, parent_dir: Direction) {
        if self.firing {
            let step = self.dir.step(self.cell.spacing());
            self.cell.set_position(self.cell.position() + step);
        } else {
            self.dir = parent_dir;
            self.origin = parent_pos;
            self.cell.set_position(parent_pos);
        }
    }

    /// Die, stop flying and snap back to the origin
    pub fn reset_to_origin(&mut self) {
        self.cell.set_dead();
        self.firing = false;
        self.cell.set_position(self.origin);
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }

    pub fn is_alive(&self) -> bool {
        self.cell.is_alive()
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn position(&self) -> Vec3 {
        self.cell.position()
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }
}
