//! Drain Climber - a single-screen platform climber
//!
//! Core modules:
//! - `sim`: Deterministic simulation (map generation, movers, collisions, session)
//! - `hud`: Level counter and run timer
//! - `settings`: Data-driven tunables

pub mod hud;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{GameState, TickEvents, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Logical frame rate the default tunables were balanced for
    pub const FRAMES_PER_SECOND: u32 = 30;
    /// Tile-rows spanned by one structural floor
    pub const TILE_ROWS_PER_FLOOR: usize = 3;
}
