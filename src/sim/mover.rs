//! Shared physics for everything that walks, jumps and falls
//!
//! `Body` carries the kinematic state; the `Mover` trait runs the per-frame
//! pipeline on it: gravity, ground clamp, horizontal containment, block
//! collision, then animation selection. Player and Blob plug in through the
//! trait and add their own rules around `step`.

use serde::{Deserialize, Serialize};

use super::animation::{AnimationKey, Animator};
use super::collision::{Collision, resolve_block_collisions};
use super::rect::Rect;
use super::tilemap::Tilemap;
use crate::settings::Settings;

/// Transparent padding around a sprite image, trimmed from its hitbox
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub horz: f32,
    pub top: f32,
}

/// Coarse motion state used to pick an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Idle,
    Walking,
    JumpingUp,
    JumpingDown,
}

/// Position, velocity and contact state of a mover
#[derive(Debug, Clone)]
pub struct Body {
    pub rect: Rect,
    pub dx: f32,
    pub dy: f32,
    pub facing_left: bool,
    pub falling: bool,
    /// Frames since the current fall began
    pub falling_frames: u32,
    pub air_jumps: u32,
    pub margins: Margins,
    pub animator: Animator,
}

impl Body {
    pub fn new(rect: Rect, margins: Margins, animator: Animator) -> Self {
        Self {
            rect,
            dx: 0.0,
            dy: 0.0,
            facing_left: true,
            falling: false,
            falling_frames: 0,
            air_jumps: 0,
            margins,
            animator,
        }
    }

    /// Collision box: margins trimmed, anchored at the sprite's feet
    pub fn hitbox(&self) -> Rect {
        let mut hitbox = Rect::new(
            0.0,
            0.0,
            self.rect.width - self.margins.horz * 2.0,
            self.rect.height - self.margins.top,
        );
        hitbox.set_mid_bottom(self.rect.mid_bottom());
        hitbox
    }

    pub fn is_airborne(&self, bounds: &Rect) -> bool {
        self.falling || self.rect.bottom() < bounds.bottom()
    }

    /// Resting on something this frame
    pub fn is_grounded(&self) -> bool {
        !self.falling && self.dy == 0.0
    }

    /// Accelerate downward (capped at terminal velocity) and move
    pub fn apply_gravity(&mut self, settings: &Settings) {
        self.dy = (self.dy + settings.gravity).min(settings.terminal_velocity);
        self.rect.translate(0.0, self.dy);
    }

    /// Gravity step followed by the ground clamp
    pub fn integrate(&mut self, settings: &Settings, bounds: &Rect) {
        if self.is_airborne(bounds) {
            self.falling = true;
            self.falling_frames += 1;
            self.apply_gravity(settings);
        }
        self.clamp_to_ground(bounds);
    }

    /// Stop on the playable floor; returns true if the body was snapped
    pub fn clamp_to_ground(&mut self, bounds: &Rect) -> bool {
        if self.rect.bottom() <= bounds.bottom() {
            return false;
        }
        self.rect.set_bottom(bounds.bottom());
        self.land();
        true
    }

    /// Come to rest on a surface
    pub fn land(&mut self) {
        self.dy = 0.0;
        self.falling = false;
        self.falling_frames = 1;
        self.air_jumps = 0;
    }

    /// Move by `dx` unless that would push a margin-adjusted edge out of
    /// `bounds`. Blocked moves are dropped, not clamped. Returns false when
    /// the move was suppressed.
    pub fn advance_horizontally(&mut self, bounds: &Rect) -> bool {
        if self.dx < 0.0 {
            self.facing_left = true;
        } else if self.dx > 0.0 {
            self.facing_left = false;
        } else {
            return true;
        }

        let mut moved = self.rect;
        moved.translate(self.dx, 0.0);
        if moved.left + self.margins.horz >= bounds.left
            && moved.right() - self.margins.horz <= bounds.right()
        {
            self.rect = moved;
            true
        } else {
            false
        }
    }

    pub fn motion_state(&self) -> MotionState {
        if self.dx == 0.0 && self.dy == 0.0 {
            MotionState::Idle
        } else if self.dy == 0.0 {
            MotionState::Walking
        } else if self.dy < 0.0 {
            MotionState::JumpingUp
        } else {
            MotionState::JumpingDown
        }
    }

    /// Animation for the motion state; walking follows `dx`, the rest follow
    /// the facing flag
    pub fn directional_animation(&self) -> AnimationKey {
        let left = self.facing_left;
        match self.motion_state() {
            MotionState::Idle if left => AnimationKey::IdleLeft,
            MotionState::Idle => AnimationKey::IdleRight,
            MotionState::Walking if self.dx < 0.0 => AnimationKey::WalkLeft,
            MotionState::Walking => AnimationKey::WalkRight,
            MotionState::JumpingUp if left => AnimationKey::JumpUpLeft,
            MotionState::JumpingUp => AnimationKey::JumpUpRight,
            MotionState::JumpingDown if left => AnimationKey::JumpDownLeft,
            MotionState::JumpingDown => AnimationKey::JumpDownRight,
        }
    }
}

/// Outcome of one `Mover::step`
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub collision: Collision,
    /// False when containment suppressed the horizontal move
    pub moved_horizontally: bool,
}

/// Per-frame physics shared by the player and enemies
pub trait Mover {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Animation for the current state
    fn select_animation(&self) -> AnimationKey {
        self.body().directional_animation()
    }

    /// Integrate, contain, collide, then pick the animation
    fn step(&mut self, tilemap: &mut Tilemap, settings: &Settings) -> StepReport {
        let bounds = tilemap.playable_bounds();
        let body = self.body_mut();
        body.integrate(settings, &bounds);
        let moved_horizontally = body.advance_horizontally(&bounds);
        let collision = resolve_block_collisions(body, tilemap.rows_mut());

        let key = self.select_animation();
        self.body_mut().animator.set_current(key);

        StepReport {
            collision,
            moved_horizontally,
        }
    }

    /// Advance the animation once; call after all of the frame's updates
    fn finish_frame(&mut self) {
        let key = self.select_animation();
        let animator = &mut self.body_mut().animator;
        animator.set_current(key);
        animator.animate();
    }
}
