//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed-length frame per `tick`
//! - Seeded RNG only
//! - Stable iteration order (rows top to bottom, blobs in spawn order)
//! - No rendering or platform dependencies

pub mod animation;
pub mod blob;
pub mod block;
pub mod collision;
pub mod exit;
pub mod mover;
pub mod particle;
pub mod platform;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;
pub mod tilemap;

pub use animation::{Animation, AnimationKey, Animator};
pub use blob::{Blob, Side};
pub use block::{Block, BlockRow, Quadrant};
pub use collision::{Collision, resolve_block_collisions};
pub use exit::ExitZone;
pub use mover::{Body, Margins, MotionState, Mover, StepReport};
pub use particle::{
    GibEmission, Particle, ParticleEmissionPolicy, ParticleGenerator, ParticleSeed,
    UniformEmission,
};
pub use platform::{PlatformLayout, generate};
pub use player::{Player, Walk};
pub use rect::Rect;
pub use state::GameState;
pub use tick::{TickEvents, TickInput, tick};
pub use tilemap::{TileGrid, Tilemap};
