//! Life Rocket entry point
//!
//! Headless native runner: loads settings and levels, then plays the game
//! with a scripted pilot at a fixed frame rate and logs what happens.
//! Run with `RUST_LOG=info` (or `debug` for per-tick detail).

use life_rocket::consts::{FRAME_DT, FRAME_RATE};
use life_rocket::input::InputAction;
use life_rocket::sim::Control;
use life_rocket::{Game, GameEvent, GameInput, LevelSet, Settings};

/// Give up after this many simulated minutes
const MAX_MINUTES: u32 = 10;

/// Pilot fires every this many frames
const FIRE_EVERY: u64 = 45;
/// Pilot turns every this many frames, alternating sides
const TURN_EVERY: u64 = 110;

/// Actions for frame `frame` of the scripted pilot
fn pilot(frame: u64) -> Vec<InputAction> {
    let mut actions = Vec::new();
    if frame % TURN_EVERY == 0 {
        let turn = if (frame / TURN_EVERY) % 2 == 0 {
            Control::TurnLeft
        } else {
            Control::TurnRight
        };
        actions.push(InputAction::Control(turn));
    }
    if frame % FIRE_EVERY == 0 {
        actions.push(InputAction::Control(Control::Fire));
    }
    actions
}

fn main() {
    env_logger::init();
    log::info!("Life Rocket (headless) starting...");

    let settings = Settings::load(Settings::FILE_NAME);
    let levels_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| settings.levels_path.clone());
    let levels = LevelSet::from_file(&levels_path, settings.default_delay);
    for rejected in levels.rejected() {
        match rejected.index {
            Some(index) => log::warn!("Skipping level {}: {}", index, rejected.error),
            None => log::warn!("Skipping rows: {}", rejected.error),
        }
    }

    let mut game = Game::new(levels, &settings);
    game.set_paused(false);
    log::info!("Playing {} level(s) from {}", game.level_count(), levels_path);

    let max_frames = (MAX_MINUTES * 60 * FRAME_RATE) as u64;
    let mut beats = 0usize;
    for frame in 1..=max_frames {
        let input = GameInput::from_actions(pilot(frame));
        if let Some(event) = game.update(&input) {
            log::info!("[frame {}] {:?}: {}", frame, event, game.message());
            match event {
                GameEvent::GameWon => break,
                // the pilot never waits at the pause screen
                GameEvent::RoundWon { .. } | GameEvent::PlayerDead => game.set_paused(false),
            }
        }

        if game.audio_active() {
            for beat in game.sequencer_mut().advance(FRAME_DT) {
                log::trace!("beat column {} -> {:?} Hz", beat.column, beat.frequencies);
                beats += 1;
            }
        }
    }

    let round = game.round();
    log::info!(
        "Finished on level {}/{} (generation {}, {} live cells, {} beats played)",
        game.level_index() + 1,
        game.level_count(),
        round.generation,
        round.count_alive(),
        beats
    );
    if game.is_finished() {
        log::info!("All levels cleared!");
    }
}
