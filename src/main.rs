//! Drain Climber entry point
//!
//! Headless native runner: plays a scripted session and logs what happened.
//!
//! Usage: `drain-climber [settings.json] [seed]`

use drain_climber::Settings;
use drain_climber::sim::{GameState, TickEvents, TickInput, Walk, tick};

/// One minute of play at the default frame rate
const SCRIPTED_FRAMES: u64 = 1800;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Drain Climber (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Seed must be an unsigned integer: {}", e);
            std::process::exit(1);
        }
        None => 0xC11B,
    };

    let mut state = GameState::new(settings, seed);
    let mut totals = TickEvents::default();
    let mut deaths = 0u32;
    let mut levels = 0u32;

    for frame in 0..SCRIPTED_FRAMES {
        let events = tick(&mut state, &scripted_input(frame));
        totals.blocks_broken += events.blocks_broken;
        totals.blobs_killed += events.blobs_killed;
        totals.blobs_gibbed += events.blobs_gibbed;
        totals.blobs_spawned += events.blobs_spawned;
        deaths += events.player_died as u32;
        levels += events.level_advanced as u32;
    }

    log::info!(
        "Ran {} frames (seed {}): level {:02}, timer {} ms",
        state.time_ticks,
        seed,
        state.level.value(),
        state.timer.elapsed_ms()
    );
    log::info!(
        "Blocks broken {}, blobs spawned {} / killed {} / drained {}, deaths {}, levels cleared {}",
        totals.blocks_broken,
        totals.blobs_spawned,
        totals.blobs_killed,
        totals.blobs_gibbed,
        deaths,
        levels
    );
    log::info!(
        "{} blobs in play, {} blocks left",
        state.enemies.len(),
        state.tilemap.block_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Pace back and forth across the shaft, jumping twice a second
fn scripted_input(frame: u64) -> TickInput {
    let walk = match (frame / 60) % 4 {
        0 => Walk::Left,
        1 | 3 => Walk::Stop,
        _ => Walk::Right,
    };
    TickInput {
        walk,
        jump: frame % 15 == 0 || frame % 15 == 5,
        ..Default::default()
    }
}
