//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by container ID)
//! - No rendering, audio or platform dependencies

pub mod arc;
pub mod container;
pub mod reveal;
pub mod state;
pub mod tick;

pub use arc::ArcPath;
pub use container::{Container, ContainerId, Registry, SetupError};
pub use reveal::{Chest, Lights, RevealTick};
pub use state::{GameEvent, GamePhase, GameState, RevealStep, Sequence, SwapEvent};
pub use tick::{PointerEvent, TickInput, draw_swap, increase_difficulty, resolve, start_round, tick};
