//! Shell Game entry point
//!
//! Headless autoplay: a simulated player watches the shuffle and picks a
//! chest, the game loop runs at the fixed timestep and everything the
//! presentation layer would receive is logged.
//!
//! Usage: `shell-game [seed] [settings.json]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use shell_game::consts::*;
use shell_game::sim::{GameEvent, GamePhase, GameState, PointerEvent, TickInput, tick};
use shell_game::{Jukebox, Settings, SoundCue};

/// How often the simulated player follows the gold correctly
const PLAYER_ACCURACY: f64 = 0.8;
/// Stop after this many lost runs
const RUNS: u32 = 3;
/// Safety valve for the demo loop (about an hour of game time)
const MAX_TICKS: u64 = 50 * 60 * 60;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let mut state = match GameState::new(&settings, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!("Shell Game (headless) starting, seed {seed}");

    let mut jukebox = Jukebox::new(&settings);
    let mut player = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };
    let mut runs = 0;
    let mut best = 0;

    while runs < RUNS && state.time_ticks < MAX_TICKS {
        let events = tick(&mut state, &input, SIM_DT);
        input = TickInput::default();

        for event in events {
            match event {
                GameEvent::PhaseChanged { phase, score } => {
                    println!("[{:>6}] {:<32} score {}", state.time_ticks, phase.message(), score);
                    best = best.max(score);
                    match phase {
                        GamePhase::Selecting => {
                            input.pointer = pick(&state, &mut player);
                        }
                        GamePhase::Beginning => {
                            runs += 1;
                            jukebox.stinger_finished();
                            input.start = runs < RUNS;
                        }
                        GamePhase::Loading => jukebox.stinger_finished(),
                        _ => {}
                    }
                }
                GameEvent::Sound(cue) => {
                    jukebox.play(cue);
                    if cue == SoundCue::SpeedUpMusic {
                        log::info!("music pitch now {:.1}", jukebox.pitch());
                    }
                }
                other => log::debug!("{other:?}"),
            }
        }
    }

    println!("best streak: {best}");
}

/// Hover over a chest and click it
fn pick(state: &GameState, player: &mut Pcg32) -> Vec<PointerEvent> {
    let ids: Vec<_> = state.registry.ids().collect();
    let choice = match state.lucky {
        Some(lucky) if player.random_bool(PLAYER_ACCURACY) => lucky,
        _ => ids[player.random_range(0..ids.len())],
    };
    vec![PointerEvent::Enter(choice), PointerEvent::Release(choice)]
}
