//! Frame update
//!
//! One call to `tick` is one logical frame at `frames_per_second`.

use super::collision::Collision;
use super::mover::Mover;
use super::player::Walk;
use super::state::GameState;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Horizontal movement
    pub walk: Walk,
    /// Jump (or air jump) this frame
    pub jump: bool,
    /// Rebuild the current level
    pub reset: bool,
    /// Spawn a blob now instead of waiting for the spawn timer
    pub spawn_enemy: bool,
}

/// What happened during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub blocks_broken: usize,
    pub blobs_killed: usize,
    pub blobs_gibbed: usize,
    pub blobs_spawned: usize,
    pub player_died: bool,
    pub level_advanced: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickEvents {
    let mut events = TickEvents::default();

    if input.reset {
        state.reset();
    }
    if input.spawn_enemy && state.spawn_enemy() {
        events.blobs_spawned += 1;
    }
    state.player.set_walk(input.walk, &state.settings);
    if input.jump {
        state.player.request_jump(&state.settings);
    }

    let collision = state.player.update(&mut state.tilemap, &state.settings);

    // Blobs on top of a struck block are knocked out before they can fall
    // into the hole
    if let Collision::HeadBump { removed, .. } = &collision {
        events.blocks_broken = removed.len();
        for blob in state.enemies.iter_mut() {
            if removed.iter().any(|block| blob.is_standing_on(block)) {
                blob.kill(&state.settings);
                state.timer.apply_bonus(state.settings.blob_kill_bonus_ms);
                events.blobs_killed += 1;
            }
        }
        if events.blobs_killed > 0 {
            log::debug!("Head bump knocked out {} blob(s)", events.blobs_killed);
        }
    }

    for blob in state.enemies.iter_mut() {
        blob.update(&mut state.tilemap, &state.settings);
    }

    events.blobs_gibbed = state
        .tilemap
        .update(&mut state.enemies, &state.settings, &mut state.rng);

    events.player_died = state
        .player
        .check_contacts(&state.enemies, &state.tilemap, &state.settings);

    let settings = &state.settings;
    state.enemies.retain(|blob| !blob.is_gone(settings));

    state.player.finish_frame();
    for blob in state.enemies.iter_mut() {
        blob.finish_frame();
    }

    state.timer.tick(&state.settings);
    state.time_ticks += 1;

    state.spawn_counter += 1;
    if state.spawn_counter >= state.spawn_rate {
        state.spawn_counter = 0;
        if state.spawn_enemy() {
            events.blobs_spawned += 1;
        }
    }

    if state.player.level_complete() {
        state.advance_level();
        events.level_advanced = true;
    }

    events
}
