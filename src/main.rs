//! Bow Duel entry point
//!
//! Runs headless AI-vs-AI matches and logs the results. Interactive hosts
//! drive the library directly with their own input and rendering.
//!
//! Usage: `bow-duel [settings.json] [matches]`

#[cfg(not(target_arch = "wasm32"))]
use bow_duel::Scoreboard;
#[cfg(not(target_arch = "wasm32"))]
use bow_duel::consts::TICK_RATE;
#[cfg(not(target_arch = "wasm32"))]
use bow_duel::input::InputSnapshot;
#[cfg(not(target_arch = "wasm32"))]
use bow_duel::settings::Settings;
#[cfg(not(target_arch = "wasm32"))]
use bow_duel::sim::{MatchPhase, MatchState, TickInput, tick};

/// Matches played when no count is given
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_MATCHES: u32 = 5;
/// A match still running after this long is abandoned
#[cfg(not(target_arch = "wasm32"))]
const MAX_MATCH_TICKS: u64 = TICK_RATE as u64 * 180;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bow Duel (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match load_settings(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::demo(),
    };
    let matches = match args.next().map(|s| s.parse::<u32>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid match count: {}", e);
            std::process::exit(2);
        }
        None => DEFAULT_MATCHES,
    };

    let mut state = MatchState::new(settings);
    let mut board = Scoreboard::new();
    let idle = TickInput::default();
    let reset = TickInput::from(InputSnapshot {
        reset: true,
        ..Default::default()
    });

    for round in 0..matches {
        if round > 0 {
            if state.phase == MatchPhase::Resolved {
                tick(&mut state, &reset);
            } else {
                state.reset();
            }
        }
        while state.phase != MatchPhase::Resolved && state.frame < MAX_MATCH_TICKS {
            tick(&mut state, &idle);
        }
        match state.outcome {
            Some(outcome) => {
                board.record(outcome, state.frame);
                log::info!(
                    "Match {}: {} after {:.1}s",
                    round + 1,
                    state.message.as_deref().unwrap_or("?"),
                    state.frame as f32 / TICK_RATE as f32
                );
            }
            None => log::warn!("Match {} abandoned after {} ticks", round + 1, state.frame),
        }
    }

    match serde_json::to_string_pretty(&board) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize scoreboard: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> Result<Settings, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(Settings::from_json(&json)?)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts link the library directly; there is no binary entry point
}
