//! Grid sequencer
//!
//! The automaton doubles as a step sequencer: x is time, y is a keyboard of
//! harmonics. Each beat plays one column, pressing the keys whose cells are
//! alive. Harmonics are used because any subset of them sounds consonant.
//!
//! ```text
//!      ^
//!      | 0,0,0,1
//!      | 0,1,0,0
//! FREQ | 0,0,0,0
//!      | 0,0,1,0
//!      |----TIME---->
//! ```
//!
//! This module only decides which frequencies sound when; turning them into
//! samples is the audio backend's job. The sequencer keeps its own copy of the
//! grid and runs on its own clock, independent of the simulation tick rate.

use crate::settings::Settings;

/// One key of the harmonic keyboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Key {
    pub frequency: f32,
    pub pressed: bool,
}

/// A column played on a beat
#[derive(Debug, Clone, PartialEq)]
pub struct Beat {
    pub column: usize,
    /// Frequencies of the pressed keys, lowest row first
    pub frequencies: Vec<f32>,
}

/// Column-stepping sequencer over a copy of the grid
#[derive(Debug, Clone)]
pub struct Sequencer {
    matrix: Vec<Vec<bool>>,
    keyboard: Vec<Key>,
    column: usize,
    /// Seconds accumulated toward the next beat
    clock: f32,
    beats_per_second: u32,
    base_frequency: f32,
    harmonics: u32,
}

impl Sequencer {
    pub fn new(beats_per_second: u32, base_frequency: f32, harmonics: u32) -> Self {
        Self {
            matrix: Vec::new(),
            keyboard: Vec::new(),
            column: 0,
            clock: 0.0,
            beats_per_second: beats_per_second.max(1),
            base_frequency,
            harmonics: harmonics.max(1),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.beats_per_second,
            settings.base_frequency,
            settings.harmonics,
        )
    }

    /// Frequency of the key on row `y`: the harmonic series, repeating
    pub fn key_frequency(&self, y: usize) -> f32 {
        self.base_frequency * ((y % self.harmonics as usize) + 1) as f32
    }

    /// Replace the grid copy (`matrix[x][y]`). Rebuilds the keyboard when the
    /// number of rows changes.
    pub fn set_matrix(&mut self, matrix: Vec<Vec<bool>>) {
        let rows = matrix.first().map_or(0, Vec::len);
        self.matrix = matrix;
        if self.keyboard.len() != rows {
            self.keyboard = (0..rows)
                .map(|y| Key {
                    frequency: self.key_frequency(y),
                    pressed: false,
                })
                .collect();
        }
        if self.column >= self.matrix.len() {
            self.column = 0;
        }
    }

    pub fn keyboard(&self) -> &[Key] {
        &self.keyboard
    }

    /// Column that plays on the next beat
    pub fn column(&self) -> usize {
        self.column
    }

    /// Seconds between beats
    pub fn beat_interval(&self) -> f32 {
        1.0 / self.beats_per_second as f32
    }

    /// Press the keys for the current column, then move to the next one
    fn play_column(&mut self) -> Beat {
        let column = self.column;
        let cells = &self.matrix[column];
        for (key, &alive) in self.keyboard.iter_mut().zip(cells) {
            key.pressed = alive;
        }
        let frequencies = self
            .keyboard
            .iter()
            .filter(|k| k.pressed)
            .map(|k| k.frequency)
            .collect();

        self.column = (self.column + 1) % self.matrix.len();
        Beat {
            column,
            frequencies,
        }
    }

    /// Run the sequencer clock forward. Returns every beat that fired.
    ///
    /// A long gap (the host slept, the audio device stalled) plays at most
    /// one second of beats or one pass over the grid, whichever is longer.
    /// The rest of the backlog is dropped.
    /// Non-finite deltas are ignored.
    pub fn advance(&mut self, seconds: f32) -> Vec<Beat> {
        if self.matrix.is_empty() || !seconds.is_finite() {
            return Vec::new();
        }
        let interval = self.beat_interval();
        self.clock += seconds.max(0.0);
        let due = (self.clock / interval).floor();
        let max_beats = (self.beats_per_second as usize).max(self.matrix.len());
        let count = if due >= max_beats as f32 {
            max_beats
        } else {
            due as usize
        };
        self.clock = self.clock.rem_euclid(interval);
        (0..count).map(|_| self.play_column()).collect()
    }

    /// Frequencies currently held down
    pub fn sounding(&self) -> impl Iterator<Item = f32> + '_ {
        self.keyboard
            .iter()
            .filter(|k| k.pressed)
            .map(|k| k.frequency)
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
