//! Shell Game - find the chest with the gold
//!
//! Core modules:
//! - `sim`: Deterministic simulation (round state machine, container motion, reveals)
//! - `audio`: Music/sound cue bookkeeping for the presentation layer
//! - `settings`: Tunable round parameters

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{Jukebox, SoundCue};
pub use settings::{ConfigError, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz, one step per physics tick)
    pub const SIM_DT: f32 = 1.0 / 50.0;

    /// Default table layout
    pub const CONTAINER_COUNT: usize = 3;
    pub const CONTAINER_SPACING: f32 = 3.0;

    /// Shuffle intensity bounds
    pub const MIN_SWITCHES: u32 = 1;
    pub const MAX_SWITCHES: u32 = 100;

    /// Container motion bounds
    pub const MIN_MOVE_SPEED: f32 = 1.0;
    pub const MAX_MOVE_SPEED: f32 = 100.0;
    pub const MAX_ARC_HEIGHT: f32 = 30.0;

    /// Random bump range applied per container on a difficulty step
    pub const DIFFICULTY_BUMP_MIN: f32 = 1.0;
    pub const DIFFICULTY_BUMP_MAX: f32 = 2.0;

    /// Spotlight intensity while a chest is open
    pub const SPOT_MAX_INTENSITY: f32 = 4.0;
    /// Light transitions count as finished inside this band
    pub const LIGHT_EPSILON: f32 = 0.1;
    /// Containers snap onto their target inside this distance
    pub const ARRIVAL_EPSILON: f32 = 1e-4;
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting
#[inline]
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Linear interpolation with `t` clamped to [0, 1]
#[inline]
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
