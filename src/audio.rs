//! Music and sound cue bookkeeping
//!
//! The simulation only emits cues; whatever actually plays audio reads the
//! jukebox to know what the music should be doing.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound cues emitted by the round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player found the gold
    Win,
    /// Player picked an empty chest
    Lose,
    /// Start the soundtrack over at normal pitch
    RestartMusic,
    /// Difficulty went up, play the soundtrack a little faster
    SpeedUpMusic,
}

/// What the background music is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicState {
    Playing,
    /// Ducked under a stinger, resumes afterwards
    Paused,
    /// Stopped after a loss until the next restart
    Stopped,
}

/// Tracks music pitch and playback state from the cue stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jukebox {
    pitch: f32,
    max_pitch: f32,
    pitch_step: f32,
    sfx_volume: f32,
    music: MusicState,
    /// Stinger currently sounding over the (paused) music
    stinger: Option<SoundCue>,
}

impl Default for Jukebox {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Jukebox {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pitch: 1.0,
            max_pitch: settings.max_music_pitch,
            pitch_step: settings.music_pitch_step,
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music: MusicState::Playing,
            stinger: None,
        }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn music(&self) -> MusicState {
        self.music
    }

    pub fn stinger(&self) -> Option<SoundCue> {
        self.stinger
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// React to a cue from the simulation
    pub fn play(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::Win | SoundCue::Lose => {
                self.music = MusicState::Paused;
                self.stinger = Some(cue);
                // Nothing audible to wait for
                if self.sfx_volume <= 0.0 {
                    self.stinger_finished();
                }
            }
            SoundCue::RestartMusic => {
                self.pitch = 1.0;
                self.stinger = None;
                self.music = MusicState::Playing;
            }
            SoundCue::SpeedUpMusic => {
                self.pitch = (self.pitch + self.pitch_step).min(self.max_pitch);
            }
        }
        log::debug!("audio cue {:?} -> {:?} @ pitch {:.1}", cue, self.music, self.pitch);
    }

    /// The current stinger has finished sounding
    pub fn stinger_finished(&mut self) {
        match self.stinger.take() {
            Some(SoundCue::Win) => self.music = MusicState::Playing,
            Some(SoundCue::Lose) => self.music = MusicState::Stopped,
            _ => {}
        }
    }
}
