//! Life Rocket - an arcade game on a toroidal Game of Life grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (automaton, collisions, round state)
//! - `level`: Level file parsing and validation
//! - `game`: Level rotation, pause/music flags, round restarts
//! - `input`: Key code boundary
//! - `audio`: Grid sequencer fed from the automaton
//! - `settings`: Persisted preferences

pub mod audio;
pub mod game;
pub mod input;
pub mod level;
pub mod settings;
pub mod sim;

pub use audio::Sequencer;
pub use game::{Game, GameEvent, GameInput};
pub use level::{Level, LevelError, LevelSet, RejectedLevel};
pub use settings::Settings;

use glam::{IVec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Edge length of a cell in world units
    pub const CELL_SIZE: u32 = 1;
    /// Distance between adjacent cell origins (a cell plus one cell-sized gap)
    pub const CELL_SPACING: f32 = (CELL_SIZE * 2) as f32;

    /// Ticks between automaton generations when a level doesn't say
    pub const DEFAULT_DELAY: u32 = 240;
    /// Fastest allowed step interval
    pub const MIN_DELAY: u32 = 60;

    /// Simulation ticks per second
    pub const FRAME_RATE: u32 = 60;
    /// Fixed frame duration
    pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;

    /// Sequencer defaults
    pub const BEATS_PER_SECOND: u32 = 8;
    pub const BASE_FREQUENCY: f32 = 100.0;
    pub const HARMONICS: u32 = 5;
}

/// World position of the cell at grid index (x, y)
#[inline]
pub fn grid_to_world(x: usize, y: usize) -> Vec3 {
    Vec3::new(
        x as f32 * consts::CELL_SPACING,
        y as f32 * consts::CELL_SPACING,
        consts::CELL_SIZE as f32,
    )
}

/// Grid index of a world position (divide by spacing, truncate toward zero)
#[inline]
pub fn world_to_grid(pos: Vec3) -> IVec2 {
    IVec2::new(
        (pos.x / consts::CELL_SPACING) as i32,
        (pos.y / consts::CELL_SPACING) as i32,
    )
}
