//! Game flow above a single round
//!
//! Owns the level list and the current round, decides what a round's terminal
//! event means (next level, end of game, restart) and carries the session
//! flags the GUI toggles: pause and music.

use crate::audio::Sequencer;
use crate::input::InputAction;
use crate::level::{Level, LevelSet};
use crate::settings::Settings;
use crate::sim::{Control, RoundEvent, RoundState, tick};

pub const MSG_ROUND_WON: &str = "You win!";
pub const MSG_GAME_WON: &str = "Game finished!";
pub const MSG_PLAYER_DEAD: &str = "You are dead!";

/// Input gathered since the last update (applied atomically before the tick)
#[derive(Debug, Clone, Default)]
pub struct GameInput {
    /// Controls in the order they arrived
    pub controls: Vec<Control>,
    /// Pause toggle
    pub pause: bool,
}

impl GameInput {
    pub fn from_actions(actions: impl IntoIterator<Item = InputAction>) -> Self {
        let mut input = Self::default();
        for action in actions {
            match action {
                InputAction::Control(control) => input.controls.push(control),
                InputAction::Pause => input.pause = !input.pause,
            }
        }
        input
    }
}

/// Outcomes the presentation layer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Level cleared and another one is loaded
    RoundWon { next_level: usize },
    /// Final level cleared
    GameWon,
    /// Player died; the level restarted
    PlayerDead,
}

/// The whole game session
#[derive(Debug)]
pub struct Game {
    levels: LevelSet,
    level_index: usize,
    round: RoundState,
    paused: bool,
    music_on: bool,
    finished: bool,
    message: String,
    sequencer: Sequencer,
}

impl Game {
    /// Start on the first level
    pub fn new(levels: LevelSet, settings: &Settings) -> Self {
        let round = load_round(&levels, 0);
        let mut sequencer = Sequencer::from_settings(settings);
        if settings.music_on {
            sequencer.set_matrix(round.audio_snapshot());
        }
        Self {
            levels,
            level_index: 0,
            round,
            paused: settings.start_paused,
            music_on: settings.music_on,
            finished: false,
            message: String::new(),
            sequencer,
        }
    }

    /// Load level `index` from its initial grid
    fn start_level(&mut self, index: usize) {
        self.level_index = index;
        self.round = load_round(&self.levels, index);
        if self.music_on {
            self.sequencer.set_matrix(self.round.audio_snapshot());
        }
    }

    /// Advance one frame
    pub fn update(&mut self, input: &GameInput) -> Option<GameEvent> {
        if input.pause {
            self.toggle_pause();
        }
        if self.paused || self.finished {
            return None;
        }

        for &control in &input.controls {
            self.round.apply_control(control);
        }
        let outcome = tick(&mut self.round);

        match outcome.event {
            Some(RoundEvent::Cleared) => Some(self.round_cleared()),
            Some(RoundEvent::PlayerDied) => {
                log::info!("Player died on level {}", self.level_index);
                self.message = MSG_PLAYER_DEAD.to_string();
                self.paused = true;
                self.start_level(self.level_index);
                Some(GameEvent::PlayerDead)
            }
            None => {
                if outcome.stepped {
                    self.message.clear();
                    if self.music_on {
                        self.sequencer.set_matrix(self.round.audio_snapshot());
                    }
                }
                None
            }
        }
    }

    fn round_cleared(&mut self) -> GameEvent {
        self.paused = true;
        let next = self.level_index + 1;
        if next < self.levels.len() {
            log::info!("Level {} cleared", self.level_index);
            self.message = MSG_ROUND_WON.to_string();
            self.start_level(next);
            GameEvent::RoundWon { next_level: next }
        } else {
            log::info!("Final level cleared, game finished");
            self.message = MSG_GAME_WON.to_string();
            self.finished = true;
            GameEvent::GameWon
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Turning music on hands the sequencer the current grid right away
    pub fn set_music_on(&mut self, on: bool) {
        self.music_on = on;
        if on {
            self.sequencer.set_matrix(self.round.audio_snapshot());
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_music_on(&self) -> bool {
        self.music_on
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Full copy of the grid for the audio layer
    pub fn audio_snapshot(&self) -> Vec<Vec<bool>> {
        self.round.audio_snapshot()
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// The audio callback drives the sequencer on its own schedule
    pub fn sequencer_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencer
    }

    /// Whether the audio layer should be producing sound
    pub fn audio_active(&self) -> bool {
        self.music_on && !self.paused
    }
}

/// Fresh round for level `index`, or the fallback level if it doesn't exist
fn load_round(levels: &LevelSet, index: usize) -> RoundState {
    let level = levels.get(index).cloned().unwrap_or_else(Level::fallback);
    let round = RoundState::from_matrix(&level.matrix, level.delay);
    log::info!(
        "Level {} started ({}x{}, delay {})",
        index,
        level.size(),
        level.size(),
        round.delay
    );
    round
}
