//! Game tunables
//!
//! One immutable `Settings` value is owned by the session and handed to every
//! component by reference. Values default to the tuned originals and can be
//! overridden from a JSON file (missing keys keep their defaults).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::FRAMES_PER_SECOND;
use crate::sim::tilemap::TEMPLATE_WIDTH;

/// RGB color
pub type Rgb = [u8; 3];

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Logical frames per second
    pub frames_per_second: u32,

    // === Tiles / map ===
    pub tile_width: f32,
    pub tile_height: f32,
    /// Columns in the tile grid
    pub map_width: usize,
    /// Columns the player and blocks may occupy
    pub map_playable_width: usize,
    pub map_number_floors: usize,
    pub map_number_subfloors: usize,

    // === Shared physics ===
    pub gravity: f32,
    pub terminal_velocity: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_jump_velocity: f32,
    pub player_air_jump_velocity: f32,
    pub player_max_air_jumps: u32,
    /// Walk speed (pixels per frame)
    pub player_dx: f32,
    /// Transparent pixels on each side of the player image
    pub player_sprite_horz_margin: f32,
    /// Transparent pixels above the player image
    pub player_sprite_top_margin: f32,
    /// Upward kick when the player touches a blob
    pub player_death_dy: f32,
    /// Frames spent idling at the top before the level advances
    pub idle_top_frames: u32,

    // === Blob enemies ===
    pub enemy_blob_width: f32,
    pub enemy_blob_height: f32,
    pub enemy_blob_dx: f32,
    /// Upward kick when a blob is killed by a block struck from below
    pub enemy_death_dy: f32,
    /// Frames between spawns on level 1
    pub enemy_generation_base_rate: u32,
    /// Spawn interval reduction per level
    pub enemy_generation_level_rate: u32,
    /// Shortest spawn interval
    pub enemy_generation_min_rate: u32,
    /// Timer reduction for each blob killed
    pub blob_kill_bonus_ms: u64,

    // === Particles ===
    pub particle_gen_color: Rgb,
    pub particle_gen_dx_range: (i32, i32),
    pub particle_gen_dy_range: (i32, i32),
    /// Frames the drain generator runs per gib
    pub particle_gen_max_frames: u32,
    pub particle_gen_per_frame: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            frames_per_second: FRAMES_PER_SECOND,

            tile_width: 24.0,
            tile_height: 24.0,
            map_width: 16,
            map_playable_width: 10,
            map_number_floors: 8,
            map_number_subfloors: 1,

            gravity: 1.4,
            terminal_velocity: 12.0,

            player_width: 24.0,
            player_height: 32.0,
            player_jump_velocity: -15.0,
            player_air_jump_velocity: -8.0,
            player_max_air_jumps: 1,
            player_dx: 2.0,
            player_sprite_horz_margin: 3.0,
            player_sprite_top_margin: 9.0,
            player_death_dy: -15.0,
            idle_top_frames: 90,

            enemy_blob_width: 16.0,
            enemy_blob_height: 16.0,
            enemy_blob_dx: 1.0,
            enemy_death_dy: -10.0,
            enemy_generation_base_rate: 120,
            enemy_generation_level_rate: 5,
            enemy_generation_min_rate: 30,
            blob_kill_bonus_ms: 2000,

            particle_gen_color: [255, 0, 0],
            particle_gen_dx_range: (-8, 8),
            particle_gen_dy_range: (5, 20),
            particle_gen_max_frames: 40,
            particle_gen_per_frame: 5,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling gaps with defaults, then validate
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tile_width <= 0.0 || self.tile_height <= 0.0 {
            return Err(SettingsError::Invalid("tile size must be positive".into()));
        }
        if self.map_width != TEMPLATE_WIDTH {
            return Err(SettingsError::Invalid(format!(
                "map_width {} does not match the {}-column tile templates",
                self.map_width, TEMPLATE_WIDTH
            )));
        }
        if self.map_playable_width > self.map_width {
            return Err(SettingsError::Invalid(format!(
                "map_playable_width {} exceeds map_width {}",
                self.map_playable_width, self.map_width
            )));
        }
        if self.map_number_floors == 0 {
            return Err(SettingsError::Invalid(
                "map_number_floors must be at least 1".into(),
            ));
        }
        if self.frames_per_second == 0 {
            return Err(SettingsError::Invalid(
                "frames_per_second must be non-zero".into(),
            ));
        }
        if self.terminal_velocity <= 0.0 {
            return Err(SettingsError::Invalid(
                "terminal_velocity must be positive".into(),
            ));
        }
        let (dx_a, dx_b) = self.particle_gen_dx_range;
        let (dy_a, dy_b) = self.particle_gen_dy_range;
        if dx_a > dx_b || dy_a > dy_b {
            return Err(SettingsError::Invalid(
                "particle ranges must be (min, max)".into(),
            ));
        }
        Ok(())
    }

    /// Width and height of one platform block (a quarter of a tile)
    pub fn block_size(&self) -> (f32, f32) {
        (self.tile_width / 2.0, self.tile_height / 2.0)
    }

    /// Milliseconds represented by one frame
    pub fn frame_ms(&self) -> u64 {
        1000 / self.frames_per_second as u64
    }
}
