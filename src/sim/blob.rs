//! Blob enemies
//!
//! Blobs come out of the pipes on either side of a tier, patrol back and
//! forth, drop through holes the player knocks in the platforms and end up
//! in the drain. A blob standing on a block that gets struck from below is
//! killed and flies off the bottom of the screen.

use rand::Rng;
use rand_pcg::Pcg32;

use super::animation::{Animation, AnimationKey, Animator};
use super::block::Block;
use super::collision::Collision;
use super::mover::{Body, Margins, Mover, StepReport};
use super::rect::Rect;
use super::tilemap::Tilemap;
use crate::settings::Settings;

/// Which pipe a blob enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn random(rng: &mut Pcg32) -> Self {
        if rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        }
    }
}

#[derive(Debug, Clone)]
pub struct Blob {
    body: Body,
    dying: bool,
}

impl Blob {
    /// Place a new blob at the pipe of `tier`, walking into the shaft
    pub fn spawn(settings: &Settings, tilemap: &Tilemap, tier: usize, side: Side) -> Self {
        let bounds = tilemap.playable_bounds();
        let mut rect = Rect::new(0.0, 0.0, settings.enemy_blob_width, settings.enemy_blob_height);
        rect.set_bottom(tilemap.tier_floor_y(tier, settings));

        let animator = Animator::new(AnimationKey::IdleLeft)
            .with(AnimationKey::IdleLeft, Animation::new(vec![0, 1], 6))
            .with(AnimationKey::IdleRight, Animation::new(vec![0, 1], 6))
            .with(AnimationKey::WalkLeft, Animation::new(vec![2, 3], 4))
            .with(AnimationKey::WalkRight, Animation::new(vec![4, 5], 4))
            .with(AnimationKey::JumpDownLeft, Animation::new(vec![6], 5))
            .with(AnimationKey::JumpDownRight, Animation::new(vec![6], 5))
            .with(AnimationKey::Dead, Animation::new(vec![7], 5));

        let mut body = Body::new(rect, Margins::default(), animator);
        match side {
            Side::Left => {
                body.rect.set_left(bounds.left);
                body.dx = settings.enemy_blob_dx;
                body.facing_left = false;
            }
            Side::Right => {
                body.rect.set_right(bounds.right());
                body.dx = -settings.enemy_blob_dx;
                body.facing_left = true;
            }
        }

        Self { body, dying: false }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    pub fn is_dying(&self) -> bool {
        self.dying
    }

    /// Fallen off the bottom of the screen after being killed
    pub fn is_gone(&self, settings: &Settings) -> bool {
        self.dying && self.body.rect.top > settings.screen_height
    }

    /// Knock the blob out of play
    pub fn kill(&mut self, settings: &Settings) {
        if self.dying {
            return;
        }
        self.dying = true;
        self.body.dy = settings.enemy_death_dy;
        self.body.dx = 0.0;
        self.body.falling = true;
        self.body.falling_frames = 1;
    }

    /// Resting on top of `block`
    pub fn is_standing_on(&self, block: &Block) -> bool {
        !self.dying
            && (self.body.rect.bottom() - block.rect.top).abs() < 1.0
            && self.body.rect.overlaps_horizontally(&block.rect)
    }

    pub fn update(&mut self, tilemap: &mut Tilemap, settings: &Settings) {
        if self.dying {
            self.body.apply_gravity(settings);
            self.body.falling_frames += 1;
            return;
        }

        let heading = self.body.dx;
        let StepReport {
            collision,
            moved_horizontally,
        } = self.step(tilemap, settings);

        // Patrol: turn around at walls and block sides
        let blocked = !moved_horizontally || matches!(collision, Collision::SideBlocked { .. });
        if blocked {
            self.body.dx = -heading;
        }
    }
}

impl Mover for Blob {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn select_animation(&self) -> AnimationKey {
        if self.dying {
            AnimationKey::Dead
        } else {
            self.body.directional_animation()
        }
    }
}
