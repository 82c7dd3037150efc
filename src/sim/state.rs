//! Game state and round bookkeeping
//!
//! Everything needed to reproduce a run lives here, RNG included.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::container::{ContainerId, Registry, SetupError};
use super::reveal::Lights;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start a run
    Beginning,
    /// Showing which chest holds the gold
    Show,
    /// Chests are being swapped
    Shuffling,
    /// Waiting for the player to pick a chest
    Selecting,
    /// Picked the lucky chest
    Win,
    /// Picked an empty chest
    Lose,
    /// Short pause between a win and the next round
    Loading,
}

impl GamePhase {
    /// Banner text for the HUD
    pub fn message(&self) -> &'static str {
        match self {
            GamePhase::Beginning => "Welcome to Shell Game!",
            GamePhase::Show => "Here's your target this round!",
            GamePhase::Shuffling => "Keep an eye on the prize!",
            GamePhase::Selecting => "Which one is the lucky object?",
            GamePhase::Win => "Correct choice!",
            GamePhase::Lose => "Too bad...",
            GamePhase::Loading => "Get ready...",
        }
    }

    /// Phases in which exactly one chest holds the gold
    pub fn has_lucky(&self) -> bool {
        !matches!(self, GamePhase::Beginning | GamePhase::Loading)
    }
}

/// Two distinct containers exchanging places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapEvent {
    pub a: ContainerId,
    pub b: ContainerId,
}

/// Signals for the presentation layer, produced by `tick`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { phase: GamePhase, score: u32 },
    Highlight { id: ContainerId, on: bool },
    OpenContainer(ContainerId),
    CloseContainer(ContainerId),
    Sound(SoundCue),
    Swapped(SwapEvent),
}

/// Stage of an open/close reveal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RevealStep {
    Opening,
    /// One idle tick between open and close
    Gap,
    Closing,
    /// Waiting before moving on (seconds left)
    Hold { remaining: f32 },
}

/// Multi-step sequence in progress, advanced once per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sequence {
    /// Nothing running; waiting on player input
    Idle,
    /// Showing the lucky chest before the shuffle
    Reveal { target: ContainerId, step: RevealStep },
    /// Swapping pairs one at a time
    Shuffle {
        remaining: u32,
        current: Option<SwapEvent>,
    },
    /// Showing where the gold was after a pick
    Resolve { target: ContainerId, step: RevealStep },
    /// Next round starts on the following tick
    Loading,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub sequence: Sequence,
    /// Consecutive correct picks
    pub score: u32,
    /// Swaps per shuffle this round
    pub switch_count: u32,
    /// Swaps per shuffle at the start of a run
    pub base_switch_count: u32,
    /// Difficulty rises every this many points
    pub difficulty_threshold: u32,
    pub lucky: Option<ContainerId>,
    pub registry: Registry,
    pub lights: Lights,
    pub reveal_hold_secs: f32,
    pub resolve_hold_secs: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a game with the default row of containers
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, SetupError> {
        let settings = settings.clamped();
        let registry = Registry::in_row(&settings)?;
        Ok(Self::with_registry(registry, &settings, seed))
    }

    /// Create a game around an already built table
    pub fn with_registry(registry: Registry, settings: &Settings, seed: u64) -> Self {
        let settings = settings.clamped();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Beginning,
            sequence: Sequence::Idle,
            score: 0,
            switch_count: settings.base_switch_count,
            base_switch_count: settings.base_switch_count,
            difficulty_threshold: settings.difficulty_threshold.max(1),
            lucky: None,
            registry,
            lights: Lights::new(settings.scene_light_intensity, settings.light_transition_speed),
            reveal_hold_secs: settings.reveal_hold_secs,
            resolve_hold_secs: settings.resolve_hold_secs,
            time_ticks: 0,
        }
    }

    /// Whether the next round start should raise the difficulty
    pub fn difficulty_due(&self) -> bool {
        self.score > 0 && self.score % self.difficulty_threshold == 0
    }

    /// Raise the shuffle count by one, within bounds
    pub fn bump_switch_count(&mut self) {
        self.switch_count = (self.switch_count + 1).clamp(MIN_SWITCHES, MAX_SWITCHES);
    }
}
