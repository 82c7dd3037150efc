//! Round tuning and presentation preferences
//!
//! Stored as JSON next to the binary; everything has a sane default so a
//! missing or partial file still produces a playable game.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to read or parse a settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Round ===
    /// Number of containers on the table
    pub container_count: usize,
    /// Horizontal gap between neighbouring containers
    pub container_spacing: f32,
    /// Swaps per round at the start of a run (restored on a loss)
    pub base_switch_count: u32,
    /// Every this many points the shuffle gets harder
    pub difficulty_threshold: u32,

    // === Motion ===
    /// Horizontal speed of a swapping container (units/sec)
    pub move_speed: f32,
    /// Peak height of the swap arc; negative dips below the line
    pub arc_height: f32,

    // === Reveal ===
    /// Fraction of the remaining distance a light covers each tick
    pub light_transition_speed: f32,
    /// Ambient light level when no chest is open
    pub scene_light_intensity: f32,
    /// Pause after the lucky chest closes before shuffling starts
    pub reveal_hold_secs: f32,
    /// Pause after the answer is shown before the table resets
    pub resolve_hold_secs: f32,

    // === Audio ===
    /// Music pitch never climbs past this
    pub max_music_pitch: f32,
    /// Pitch added by each difficulty step
    pub music_pitch_step: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            container_count: CONTAINER_COUNT,
            container_spacing: CONTAINER_SPACING,
            base_switch_count: 10,
            difficulty_threshold: 5,

            move_speed: 1.0,
            arc_height: 1.0,

            light_transition_speed: 0.1,
            scene_light_intensity: 1.0,
            reveal_hold_secs: 1.0,
            resolve_hold_secs: 1.0,

            max_music_pitch: 3.0,
            music_pitch_step: 0.1,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, clamping every field into its legal range
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.clamped())
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Copy with every field forced into its legal range
    pub fn clamped(&self) -> Self {
        Self {
            container_count: self.container_count,
            container_spacing: if self.container_spacing.is_finite() {
                self.container_spacing.max(0.0)
            } else {
                CONTAINER_SPACING
            },
            base_switch_count: self.base_switch_count.clamp(MIN_SWITCHES, MAX_SWITCHES),
            difficulty_threshold: self.difficulty_threshold.clamp(1, 10),
            move_speed: self.move_speed.clamp(MIN_MOVE_SPEED, MAX_MOVE_SPEED),
            arc_height: self.arc_height.clamp(-MAX_ARC_HEIGHT, MAX_ARC_HEIGHT),
            light_transition_speed: self.light_transition_speed.clamp(0.001, 1.0),
            scene_light_intensity: self.scene_light_intensity.max(0.0),
            reveal_hold_secs: self.reveal_hold_secs.max(0.0),
            resolve_hold_secs: self.resolve_hold_secs.max(0.0),
            max_music_pitch: self.max_music_pitch.max(1.0),
            music_pitch_step: self.music_pitch_step.max(0.0),
            sfx_volume: self.sfx_volume.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "base_switch_count": 4 }"#).unwrap();
        assert_eq!(settings.base_switch_count, 4);
        assert_eq!(settings.difficulty_threshold, 5);
        assert_eq!(settings.container_count, CONTAINER_COUNT);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let json = r#"{ "base_switch_count": 500, "arc_height": -99.0, "move_speed": 0.0, "difficulty_threshold": 0 }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.base_switch_count, MAX_SWITCHES);
        assert_eq!(settings.arc_height, -MAX_ARC_HEIGHT);
        assert_eq!(settings.move_speed, MIN_MOVE_SPEED);
        assert_eq!(settings.difficulty_threshold, 1);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.arc_height = -2.5;
        settings.reveal_hold_secs = 0.0;
        let restored = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_container_spacing_is_sanitized() {
        let settings = Settings {
            container_spacing: f32::NAN,
            ..Settings::default()
        };
        assert_eq!(settings.clamped().container_spacing, CONTAINER_SPACING);

        let settings = Settings {
            container_spacing: -4.0,
            ..Settings::default()
        };
        assert_eq!(settings.clamped().container_spacing, 0.0);

        let settings = Settings {
            container_spacing: f32::INFINITY,
            ..Settings::default()
        };
        assert_eq!(settings.clamped().container_spacing, CONTAINER_SPACING);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = Settings::load("/definitely/not/here/shell_game.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(
            Settings::load_or_default("/definitely/not/here/shell_game.json"),
            Settings::default()
        );
    }
}
