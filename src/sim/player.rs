//! The player sprite
//!
//! Adds to the shared mover physics: jump and air-jump accounting, death on
//! touching a blob (followed by a respawn on the landing floor), and the
//! idle-at-top countdown that finishes a level.

use super::animation::{Animation, AnimationKey, Animator};
use super::blob::Blob;
use super::collision::Collision;
use super::mover::{Body, Margins, Mover};
use super::rect::Rect;
use super::tilemap::Tilemap;
use crate::settings::Settings;

/// Horizontal input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Walk {
    #[default]
    Stop,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Player {
    body: Body,
    dying: bool,
    idle_top: bool,
    idle_counter: u32,
    level_complete: bool,
}

impl Player {
    /// A player standing on the landing floor, centered on the screen
    pub fn new(settings: &Settings, tilemap: &Tilemap) -> Self {
        let rect = Rect::new(0.0, 0.0, settings.player_width, settings.player_height);
        let margins = Margins {
            horz: settings.player_sprite_horz_margin,
            top: settings.player_sprite_top_margin,
        };
        let animator = Animator::new(AnimationKey::IdleLeft)
            .with(AnimationKey::IdleLeft, Animation::new(vec![0, 1, 2, 3, 2, 1], 5))
            .with(AnimationKey::IdleRight, Animation::new(vec![5, 6, 7, 8, 7, 6], 5))
            .with(AnimationKey::WalkLeft, Animation::new(vec![0, 10, 11, 10], 2))
            .with(AnimationKey::WalkRight, Animation::new(vec![5, 12, 13, 12], 2))
            .with(AnimationKey::JumpUpLeft, Animation::new(vec![15], 5))
            .with(AnimationKey::JumpDownLeft, Animation::new(vec![16], 5))
            .with(AnimationKey::JumpUpRight, Animation::new(vec![17], 5))
            .with(AnimationKey::JumpDownRight, Animation::new(vec![18], 5))
            .with(AnimationKey::Dead, Animation::new(vec![4], 5));

        let mut player = Self {
            body: Body::new(rect, margins, animator),
            dying: false,
            idle_top: false,
            idle_counter: 0,
            level_complete: false,
        };
        player.reset(settings, tilemap);
        player
    }

    /// Back to the landing floor with all state cleared
    pub fn reset(&mut self, settings: &Settings, tilemap: &Tilemap) {
        let bounds = tilemap.playable_bounds();
        self.body.rect.set_left(settings.screen_width / 2.0);
        self.body.rect.set_bottom(bounds.bottom());
        self.body.dx = 0.0;
        self.body.land();
        self.body.facing_left = true;
        self.body.animator.set_current(AnimationKey::IdleLeft);
        self.dying = false;
        self.idle_top = false;
        self.idle_counter = 0;
        self.level_complete = false;
    }

    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    pub fn is_dying(&self) -> bool {
        self.dying
    }

    pub fn is_idle_at_top(&self) -> bool {
        self.idle_top
    }

    /// Set once the player has idled at the top long enough
    pub fn level_complete(&self) -> bool {
        self.level_complete
    }

    /// Input is ignored while dying or waiting at the top
    pub fn accepts_input(&self) -> bool {
        !self.dying && !self.idle_top
    }

    pub fn set_walk(&mut self, walk: Walk, settings: &Settings) {
        if !self.accepts_input() {
            return;
        }
        self.body.dx = match walk {
            Walk::Stop => 0.0,
            Walk::Left => -settings.player_dx,
            Walk::Right => settings.player_dx,
        };
    }

    /// Jump from the ground, or spend an air jump. Returns true if the jump
    /// happened.
    pub fn request_jump(&mut self, settings: &Settings) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if self.body.is_grounded() {
            self.body.dy = settings.player_jump_velocity;
        } else if self.body.air_jumps < settings.player_max_air_jumps {
            self.body.dy = settings.player_air_jump_velocity;
            self.body.air_jumps += 1;
        } else {
            return false;
        }
        self.body.falling = true;
        self.body.falling_frames = 1;
        true
    }

    /// Physics for this frame
    pub fn update(&mut self, tilemap: &mut Tilemap, settings: &Settings) -> Collision {
        if self.dying {
            self.update_dying(tilemap, settings);
            return Collision::None;
        }

        if self.idle_top {
            self.idle_counter += 1;
            if self.idle_counter > settings.idle_top_frames && !self.level_complete {
                log::info!("Player idled at the top for {} frames", self.idle_counter);
                self.level_complete = true;
            }
            return Collision::None;
        }

        self.step(tilemap, settings).collision
    }

    /// Free fall with no collisions until off screen, then respawn
    fn update_dying(&mut self, tilemap: &Tilemap, settings: &Settings) {
        if self.body.rect.top > settings.screen_height {
            self.body.rect.set_bottom(tilemap.playable_bounds().bottom());
            self.body.dx = 0.0;
            self.body.land();
            self.dying = false;
            log::debug!("Player respawned at x={}", self.body.rect.left);
        } else {
            self.body.apply_gravity(settings);
            self.body.falling_frames += 1;
        }
    }

    /// Blob contact and top-of-shaft detection, run after every mover has
    /// moved. Returns true if the player was killed.
    pub fn check_contacts(&mut self, enemies: &[Blob], tilemap: &Tilemap, settings: &Settings) -> bool {
        if !self.accepts_input() {
            return false;
        }

        let hitbox = self.body.hitbox();
        if enemies
            .iter()
            .any(|blob| !blob.is_dying() && hitbox.intersects(&blob.rect()))
        {
            self.die(settings);
            return true;
        }

        let key = self.body.animator.current_key();
        let near_top = self.body.rect.bottom()
            <= tilemap.playable_bounds().top + 2.0 * settings.tile_height;
        if near_top && (key.is_idle() || key.is_walking()) {
            log::debug!("Player reached the top of the shaft");
            self.idle_top = true;
            self.idle_counter = 0;
            self.body.dx = 0.0;
        }
        false
    }

    fn die(&mut self, settings: &Settings) {
        log::debug!("Player touched a blob");
        self.dying = true;
        self.body.dy = settings.player_death_dy;
        self.body.falling = true;
        self.body.falling_frames = 1;
    }
}

impl Mover for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn select_animation(&self) -> AnimationKey {
        if self.idle_top {
            AnimationKey::IdleLeft
        } else if self.dying {
            AnimationKey::Dead
        } else {
            self.body.directional_animation()
        }
    }
}
