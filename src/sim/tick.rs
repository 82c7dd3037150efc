//! Fixed timestep simulation tick
//!
//! Drives the round: start → show → shuffle → select → win/lose. Every
//! multi-step sequence advances exactly once per tick and polls container
//! state to decide when to move on.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::container::ContainerId;
use super::state::{GameEvent, GamePhase, GameState, RevealStep, Sequence, SwapEvent};
use crate::audio::SoundCue;

/// Pointer activity over a container (only honoured while selecting)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    Enter(ContainerId),
    Exit(ContainerId),
    Release(ContainerId),
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start button pressed
    pub start: bool,
    /// Pointer events in arrival order
    pub pointer: Vec<PointerEvent>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    if input.start {
        start_round(state, &mut events);
    }
    for &event in &input.pointer {
        handle_pointer(state, event, &mut events);
    }

    // Containers move first, then the running sequence polls them
    state.registry.integrate_motion(dt);

    let sequence = state.sequence;
    state.sequence = match sequence {
        Sequence::Idle => Sequence::Idle,
        Sequence::Reveal { target, step } => advance_reveal(state, target, step, dt, &mut events),
        Sequence::Shuffle { remaining, current } => shuffle_step(state, remaining, current, &mut events),
        Sequence::Resolve { target, step } => advance_resolve(state, target, step, dt, &mut events),
        Sequence::Loading => {
            // Seed the next round; start_round installs its own sequence
            start_round(state, &mut events);
            state.sequence
        }
    };

    events
}

fn set_phase(state: &mut GameState, phase: GamePhase, events: &mut Vec<GameEvent>) {
    log::info!("{:?} -> {:?} (score {})", state.phase, phase, state.score);
    state.phase = phase;
    events.push(GameEvent::PhaseChanged {
        phase,
        score: state.score,
    });
}

/// Begin a round: maybe raise the difficulty, hide the gold, start the reveal.
/// Ignored outside `Beginning`/`Loading`.
pub fn start_round(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !matches!(state.phase, GamePhase::Beginning | GamePhase::Loading) {
        return;
    }

    if state.difficulty_due() {
        increase_difficulty(state, events);
    }

    let index = state.rng.random_range(0..state.registry.len());
    let lucky = ContainerId(index);
    if let Some(container) = state.registry.get_mut(lucky) {
        container.mark_lucky();
    }
    state.lucky = Some(lucky);
    log::debug!("lucky container this round: {:?}", lucky);

    set_phase(state, GamePhase::Show, events);
    state.sequence = Sequence::Reveal {
        target: lucky,
        step: RevealStep::Opening,
    };
}

/// Faster chests, taller arcs, one more swap
pub fn increase_difficulty(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for container in state.registry.iter_mut() {
        container.bump_difficulty(&mut state.rng);
    }
    state.bump_switch_count();
    events.push(GameEvent::Sound(SoundCue::SpeedUpMusic));
    log::info!(
        "difficulty up at score {}: {} swaps per round",
        state.score,
        state.switch_count
    );
}

/// Pick two distinct containers uniformly from the whole table
pub fn draw_swap(rng: &mut impl Rng, count: usize) -> SwapEvent {
    debug_assert!(count >= 2, "need two containers to swap");
    let a = rng.random_range(0..count);
    let mut b = rng.random_range(0..count);
    while a == b {
        b = rng.random_range(0..count);
    }
    SwapEvent {
        a: ContainerId(a),
        b: ContainerId(b),
    }
}

/// One poll of the shuffle loop. Waits for the current pair to land, then
/// issues the next swap or hands over to selection.
fn shuffle_step(
    state: &mut GameState,
    mut remaining: u32,
    current: Option<SwapEvent>,
    events: &mut Vec<GameEvent>,
) -> Sequence {
    if let Some(swap) = current {
        if state.registry.any_moving(&[swap.a, swap.b]) {
            return Sequence::Shuffle { remaining, current };
        }
        remaining = remaining.saturating_sub(1);
    }

    if remaining == 0 {
        set_phase(state, GamePhase::Selecting, events);
        return Sequence::Idle;
    }

    let swap = draw_swap(&mut state.rng, state.registry.len());
    state.registry.swap(swap.a, swap.b);
    log::trace!("swap {:?} <-> {:?} ({} left)", swap.a, swap.b, remaining);
    events.push(GameEvent::Swapped(swap));

    Sequence::Shuffle {
        remaining,
        current: Some(swap),
    }
}

/// Run one tick of an open/close reveal on `target`. Returns the next step,
/// or `None` once the hold has elapsed.
fn reveal_step(
    state: &mut GameState,
    target: ContainerId,
    step: RevealStep,
    with_gap: bool,
    hold_secs: f32,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> Option<RevealStep> {
    let lights = &mut state.lights;
    let Some(container) = state.registry.get_mut(target) else {
        return None;
    };

    match step {
        RevealStep::Opening => {
            let t = container.animate_open(lights);
            if t.lid_moved {
                events.push(GameEvent::OpenContainer(target));
            }
            match (t.done, with_gap) {
                (false, _) => Some(RevealStep::Opening),
                (true, true) => Some(RevealStep::Gap),
                (true, false) => Some(RevealStep::Closing),
            }
        }
        RevealStep::Gap => Some(RevealStep::Closing),
        RevealStep::Closing => {
            let t = container.animate_close(lights);
            if t.lid_moved {
                events.push(GameEvent::CloseContainer(target));
            }
            if t.done {
                Some(RevealStep::Hold {
                    remaining: hold_secs,
                })
            } else {
                Some(RevealStep::Closing)
            }
        }
        RevealStep::Hold { remaining } => {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                None
            } else {
                Some(RevealStep::Hold { remaining })
            }
        }
    }
}

fn advance_reveal(
    state: &mut GameState,
    target: ContainerId,
    step: RevealStep,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> Sequence {
    let hold = state.reveal_hold_secs;
    match reveal_step(state, target, step, true, hold, dt, events) {
        Some(step) => Sequence::Reveal { target, step },
        None if state.phase == GamePhase::Show => {
            set_phase(state, GamePhase::Shuffling, events);
            let remaining = state.switch_count;
            shuffle_step(state, remaining, None, events)
        }
        None => Sequence::Idle,
    }
}

fn advance_resolve(
    state: &mut GameState,
    target: ContainerId,
    step: RevealStep,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> Sequence {
    let hold = state.resolve_hold_secs;
    let next = reveal_step(state, target, step, false, hold, dt, events);

    // The answer has been shown; a loss wipes the run before the pause
    let shown = step == RevealStep::Closing && matches!(next, Some(RevealStep::Hold { .. }));
    if shown && state.phase == GamePhase::Lose {
        state.score = 0;
        state.switch_count = state.base_switch_count;
        events.push(GameEvent::Sound(SoundCue::RestartMusic));
    }

    match next {
        Some(step) => Sequence::Resolve { target, step },
        None => finish_round(state, events),
    }
}

/// Clear the table and either wait for the player or roll into the next round
fn finish_round(state: &mut GameState, events: &mut Vec<GameEvent>) -> Sequence {
    let lost = state.phase == GamePhase::Lose;
    for id in state.registry.reset_all(lost) {
        events.push(GameEvent::Highlight { id, on: false });
    }
    state.lucky = None;

    match state.phase {
        GamePhase::Lose => {
            set_phase(state, GamePhase::Beginning, events);
            Sequence::Idle
        }
        GamePhase::Win => {
            set_phase(state, GamePhase::Loading, events);
            Sequence::Loading
        }
        _ => Sequence::Idle,
    }
}

/// Judge the player's pick. Ignored outside `Selecting`.
pub fn resolve(state: &mut GameState, selected: ContainerId, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Selecting {
        return;
    }
    let Some(container) = state.registry.get(selected) else {
        return;
    };

    let target = if container.is_lucky() {
        state.score += 1;
        set_phase(state, GamePhase::Win, events);
        events.push(GameEvent::Sound(SoundCue::Win));
        selected
    } else {
        set_phase(state, GamePhase::Lose, events);
        events.push(GameEvent::Sound(SoundCue::Lose));
        state.lucky.unwrap_or(selected)
    };

    state.sequence = Sequence::Resolve {
        target,
        step: RevealStep::Opening,
    };
}

fn handle_pointer(state: &mut GameState, event: PointerEvent, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Selecting {
        return;
    }
    match event {
        PointerEvent::Enter(id) => {
            if let Some(container) = state.registry.get_mut(id) {
                if !container.hovering {
                    container.hovering = true;
                    if container.highlight() {
                        events.push(GameEvent::Highlight { id, on: true });
                    }
                }
            }
        }
        PointerEvent::Exit(id) => {
            if let Some(container) = state.registry.get_mut(id) {
                if container.hovering {
                    container.hovering = false;
                    if container.dehighlight() {
                        events.push(GameEvent::Highlight { id, on: false });
                    }
                }
            }
        }
        PointerEvent::Release(id) => {
            if let Some(container) = state.registry.get_mut(id) {
                container.hovering = false;
                resolve(state, id, events);
            }
        }
    }
}
