//! Session state
//!
//! Everything one run of the game needs: the seeded RNG, the map, the player,
//! the live blobs and the HUD counters. `tick` drives it frame by frame.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::blob::{Blob, Side};
use super::player::Player;
use super::tilemap::Tilemap;
use crate::hud::{LevelCounter, LevelTimer};
use crate::settings::Settings;

#[derive(Debug)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tilemap: Tilemap,
    pub player: Player,
    /// Live and dying blobs, in spawn order
    pub enemies: Vec<Blob>,
    pub level: LevelCounter,
    pub timer: LevelTimer,
    /// Frames since the last spawn
    pub spawn_counter: u32,
    /// Frames between spawns at the current level
    pub spawn_rate: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let tilemap = Tilemap::new(
            &settings,
            settings.map_number_floors,
            settings.map_number_subfloors,
            &mut rng,
        );
        let player = Player::new(&settings, &tilemap);
        let spawn_rate = settings.enemy_generation_base_rate;

        log::info!("New session with seed {}", seed);

        Self {
            settings,
            seed,
            rng,
            tilemap,
            player,
            enemies: Vec::new(),
            level: LevelCounter::new(),
            timer: LevelTimer::default(),
            spawn_counter: 0,
            spawn_rate,
            time_ticks: 0,
        }
    }

    /// Fresh map and player for the current level
    pub fn reset(&mut self) {
        let floors = self.settings.map_number_floors;
        let subfloors = self.settings.map_number_subfloors;
        self.tilemap
            .regenerate_map(&self.settings, floors, subfloors, &mut self.rng);
        self.enemies.clear();
        self.player.reset(&self.settings, &self.tilemap);
        self.tilemap.exit_zone_mut().stop_gibbing();
        self.timer.reset();
        self.spawn_counter = 0;
        log::info!("Level {:02} reset", self.level.value());
    }

    /// Next level: faster spawns, new map
    pub fn advance_level(&mut self) {
        self.level.increase();
        self.spawn_rate = self
            .spawn_rate
            .saturating_sub(self.settings.enemy_generation_level_rate)
            .max(self.settings.enemy_generation_min_rate);
        log::info!(
            "Advancing to level {:02}, spawn every {} frames",
            self.level.value(),
            self.spawn_rate
        );
        self.reset();
    }

    /// Send a blob out of a random pipe. Returns false when the map has no
    /// tier with pipes.
    pub fn spawn_enemy(&mut self) -> bool {
        let floors = self.tilemap.floor_count();
        if floors <= 1 {
            log::warn!("No pipe tiers on a {}-floor map, not spawning", floors);
            return false;
        }
        let tier = self.rng.random_range(0..floors - 1);
        let side = Side::random(&mut self.rng);
        self.enemies
            .push(Blob::spawn(&self.settings, &self.tilemap, tier, side));
        log::debug!("Spawned blob on tier {} from the {:?} pipe", tier, side);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mover::Mover;

    #[test]
    fn test_new_session() {
        let state = GameState::new(Settings::default(), 7);
        assert_eq!(state.level.value(), 1);
        assert_eq!(state.spawn_rate, 120);
        assert!(state.enemies.is_empty());
        assert_eq!(state.tilemap.rows().len(), 7);
        assert_eq!(
            state.player.rect().bottom(),
            state.tilemap.playable_bounds().bottom()
        );
    }

    #[test]
    fn test_spawn_enemy_uses_pipe_tiers() {
        let mut state = GameState::new(Settings::default(), 8);
        for _ in 0..50 {
            assert!(state.spawn_enemy());
        }
        let bounds = state.tilemap.playable_bounds();
        for blob in &state.enemies {
            let rect = blob.rect();
            assert!(rect.left == bounds.left || rect.right() == bounds.right());
            // Never on the landing floor
            assert!(rect.bottom() < bounds.bottom());
            assert!(blob.body().dx != 0.0);
        }
    }

    #[test]
    fn test_single_floor_map_cannot_spawn() {
        let settings = Settings {
            map_number_floors: 1,
            ..Settings::default()
        };
        let mut state = GameState::new(settings, 9);
        assert!(!state.spawn_enemy());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_spawn_rate_decays_to_minimum() {
        let mut state = GameState::new(Settings::default(), 10);
        state.advance_level();
        assert_eq!(state.level.value(), 2);
        assert_eq!(state.spawn_rate, 115);
        for _ in 0..40 {
            state.advance_level();
        }
        assert_eq!(state.spawn_rate, 30);
    }

    #[test]
    fn test_reset_clears_session() {
        let mut state = GameState::new(Settings::default(), 11);
        state.spawn_enemy();
        state.spawn_counter = 17;
        state.timer.tick(&state.settings);
        state.player.request_jump(&state.settings);
        state.reset();
        assert!(state.enemies.is_empty());
        assert_eq!(state.spawn_counter, 0);
        assert_eq!(state.timer.elapsed_ms(), 0);
        assert!(state.player.body().is_grounded());
        assert!(!state.tilemap.exit_zone().is_gibbing());
    }
}
