//! Key code boundary
//!
//! Raw key codes come from whatever windowing layer hosts the game. They are
//! turned into a closed set of actions here; anything unknown is dropped.

use crate::sim::Control;

/// Arrow key codes as delivered by the host framework
pub mod keys {
    pub const LEFT: i32 = 57356;
    pub const UP: i32 = 57357;
    pub const RIGHT: i32 = 57358;
    pub const SPACE: i32 = b' ' as i32;
}

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Steer the player or fire the projectile
    Control(Control),
    /// Toggle pause (handled outside the simulation)
    Pause,
}

impl InputAction {
    /// Map a key code; unknown keys map to `None`
    pub fn from_key_code(code: i32) -> Option<Self> {
        let action = match code {
            keys::UP => InputAction::Control(Control::Forward),
            keys::LEFT => InputAction::Control(Control::TurnLeft),
            keys::RIGHT => InputAction::Control(Control::TurnRight),
            keys::SPACE => InputAction::Control(Control::Fire),
            c if c == 'w' as i32 => InputAction::Control(Control::Forward),
            c if c == 'a' as i32 => InputAction::Control(Control::TurnLeft),
            c if c == 'd' as i32 => InputAction::Control(Control::TurnRight),
            c if c == 'p' as i32 => InputAction::Pause,
            _ => return None,
        };
        Some(action)
    }

    /// Map a typed character
    pub fn from_char(c: char) -> Option<Self> {
        Self::from_key_code(c as i32)
    }
}
