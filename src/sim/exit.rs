//! The drain at the bottom of the shaft
//!
//! A thin trigger strip over the drain tile. Any live blob touching it is
//! removed from play on contact and the gib generator fires.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::animation::{Animation, AnimationKey, Animator};
use super::blob::Blob;
use super::particle::{GibEmission, Particle, ParticleGenerator};
use super::rect::Rect;
use super::tilemap::DRAIN_COLUMN;
use crate::settings::Settings;

#[derive(Debug)]
pub struct ExitZone {
    /// Trigger strip
    rect: Rect,
    /// Where the spinning blade sprite is drawn
    blade_rect: Rect,
    animator: Animator,
    generator: ParticleGenerator,
}

impl ExitZone {
    pub fn new(settings: &Settings, bounds: Rect, x_offset: f32) -> Self {
        let tw = settings.tile_width;
        let th = settings.tile_height;

        let drain_tile = Rect::new(tw * DRAIN_COLUMN as f32 + x_offset, bounds.bottom(), tw, th);
        let mut rect = drain_tile.inflate(tw * -0.99, th * -0.75);
        rect.translate(0.0, th * -0.5);

        let blade_rect = Rect::new(settings.screen_width / 2.0 - tw, bounds.bottom() + th, tw, th);
        let origin = Vec2::new(
            settings.screen_width / 2.0 - tw / 2.0,
            settings.screen_height - tw / 2.0,
        );

        Self {
            rect,
            blade_rect,
            animator: Animator::new(AnimationKey::Exit).with(AnimationKey::Exit, Animation::new(vec![0, 1], 1)),
            generator: ParticleGenerator::new(origin, Box::new(GibEmission)),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn blade_rect(&self) -> Rect {
        self.blade_rect
    }

    pub fn current_frame(&self) -> usize {
        self.animator.current_frame()
    }

    pub fn generator(&self) -> &ParticleGenerator {
        &self.generator
    }

    pub fn particles(&self) -> &[Particle] {
        self.generator.particles()
    }

    pub fn is_gibbing(&self) -> bool {
        self.generator.is_active()
    }

    /// Fire the gib generator for its configured frame budget
    pub fn start_gibbing(&mut self, settings: &Settings) {
        self.generator.start(settings.particle_gen_max_frames);
    }

    /// Stop emitting; particles in flight finish on their own
    pub fn stop_gibbing(&mut self) {
        self.generator.stop();
    }

    /// Advance the effect, then remove every live blob touching the drain.
    /// A fresh gib starts counting on the next update. Returns the number of
    /// blobs removed.
    pub fn update(&mut self, enemies: &mut Vec<Blob>, settings: &Settings, rng: &mut Pcg32) -> usize {
        self.generator.update(settings, rng);
        self.animator.animate();

        let trigger = self.rect;
        let before = enemies.len();
        enemies.retain(|blob| blob.is_dying() || !blob.rect().intersects(&trigger));
        let gibbed = before - enemies.len();

        if gibbed > 0 {
            log::debug!("Drain gibbed {} blob(s)", gibbed);
            self.start_gibbing(settings);
        }
        gibbed
    }
}
