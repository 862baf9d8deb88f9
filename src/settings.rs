//! Game settings and preferences
//!
//! Persisted as JSON next to the binary. Missing fields take their defaults,
//! so older settings files keep loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_FREQUENCY, BEATS_PER_SECOND, DEFAULT_DELAY, HARMONICS, MIN_DELAY};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// Start each game paused
    pub start_paused: bool,
    /// Feed the grid to the sequencer
    pub music_on: bool,

    // === Levels ===
    /// Levels file to load
    pub levels_path: String,
    /// Step interval for headers that don't parse
    pub default_delay: u32,

    // === Sequencer ===
    /// Columns played per second
    pub beats_per_second: u32,
    /// Frequency of the lowest key (Hz)
    pub base_frequency: f32,
    /// Distinct harmonics before the keyboard repeats
    pub harmonics: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_paused: true,
            music_on: true,

            levels_path: "levels.txt".to_string(),
            default_delay: DEFAULT_DELAY,

            beats_per_second: BEATS_PER_SECOND,
            base_frequency: BASE_FREQUENCY,
            harmonics: HARMONICS,
        }
    }
}

impl Settings {
    /// Default path for the settings file
    pub const FILE_NAME: &'static str = "settings.json";

    /// Clamp values into ranges the game can run with
    pub fn sanitized(mut self) -> Self {
        self.default_delay = self.default_delay.max(MIN_DELAY);
        self.beats_per_second = self.beats_per_second.max(1);
        self.harmonics = self.harmonics.max(1);
        if !(self.base_frequency.is_finite() && self.base_frequency > 0.0) {
            self.base_frequency = BASE_FREQUENCY;
        }
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.start_paused);
        assert!(settings.music_on);
        assert_eq!(settings.default_delay, 240);
        assert_eq!(settings.beats_per_second, 8);
        assert_eq!(settings.harmonics, 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "music_on": false }"#).unwrap();
        assert!(!settings.music_on);
        assert_eq!(settings.levels_path, "levels.txt");
    }

    #[test]
    fn test_sanitized() {
        let settings = Settings {
            default_delay: 5,
            beats_per_second: 0,
            harmonics: 0,
            base_frequency: -3.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.default_delay, MIN_DELAY);
        assert_eq!(settings.beats_per_second, 1);
        assert_eq!(settings.harmonics, 1);
        assert_eq!(settings.base_frequency, BASE_FREQUENCY);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("life_rocket_settings_{}.json", std::process::id()));
        let settings = Settings {
            music_on: false,
            beats_per_second: 4,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_or_invalid() {
        assert_eq!(Settings::load("/no/such/settings.json"), Settings::default());

        let path =
            std::env::temp_dir().join(format!("life_rocket_bad_{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = std::fs::remove_file(&path);
    }
}
