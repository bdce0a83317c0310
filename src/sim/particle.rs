//! Ballistic particles and timed emitters
//!
//! A generator emits a batch of particles each active frame for a fixed
//! number of frames. Stopping it only halts emission: particles already in
//! flight keep falling until they leave the screen.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::settings::{Rgb, Settings};

/// Initial state of one emitted particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSeed {
    pub vel: Vec2,
    pub color: Rgb,
}

/// Decides what a generator emits on each active frame
pub trait ParticleEmissionPolicy: std::fmt::Debug {
    fn emit(&mut self, settings: &Settings, rng: &mut Pcg32) -> Vec<ParticleSeed>;
}

/// Default fountain: small sideways spread, random colors
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformEmission;

impl ParticleEmissionPolicy for UniformEmission {
    fn emit(&mut self, settings: &Settings, rng: &mut Pcg32) -> Vec<ParticleSeed> {
        (0..settings.particle_gen_per_frame)
            .map(|_| ParticleSeed {
                vel: Vec2::new(
                    rng.random_range(-2..=2) as f32,
                    -(rng.random_range(5..=20) as f32),
                ),
                color: [rng.random(), rng.random(), rng.random()],
            })
            .collect()
    }
}

/// Drain gibs: configured spread, single color
#[derive(Debug, Clone, Copy, Default)]
pub struct GibEmission;

impl ParticleEmissionPolicy for GibEmission {
    fn emit(&mut self, settings: &Settings, rng: &mut Pcg32) -> Vec<ParticleSeed> {
        let (dx_a, dx_b) = settings.particle_gen_dx_range;
        let (dy_a, dy_b) = settings.particle_gen_dy_range;
        (0..settings.particle_gen_per_frame)
            .map(|_| ParticleSeed {
                vel: Vec2::new(
                    rng.random_range(dx_a..=dx_b) as f32,
                    -(rng.random_range(dy_a..=dy_b) as f32),
                ),
                color: settings.particle_gen_color,
            })
            .collect()
    }
}

/// A square particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    pub fn update(&mut self, settings: &Settings) {
        self.pos.x += self.vel.x;
        self.vel.y = (self.vel.y + settings.gravity).min(settings.terminal_velocity);
        self.pos.y += self.vel.y;
    }

    /// Dead once it has dropped below the screen
    pub fn alive(&self, settings: &Settings) -> bool {
        self.pos.y <= settings.screen_height
    }
}

/// Timed particle emitter
#[derive(Debug)]
pub struct ParticleGenerator {
    pub origin: Vec2,
    active: bool,
    active_frames: u32,
    frames_to_generate: u32,
    particles: Vec<Particle>,
    policy: Box<dyn ParticleEmissionPolicy>,
}

impl ParticleGenerator {
    pub fn new(origin: Vec2, policy: Box<dyn ParticleEmissionPolicy>) -> Self {
        Self {
            origin,
            active: false,
            active_frames: 0,
            frames_to_generate: 0,
            particles: Vec::new(),
            policy,
        }
    }

    /// Generator using `UniformEmission`
    pub fn uniform(origin: Vec2) -> Self {
        Self::new(origin, Box::new(UniformEmission))
    }

    /// Begin emitting for `frames_to_generate` frames (restarts if running)
    pub fn start(&mut self, frames_to_generate: u32) {
        self.active = true;
        self.active_frames = 0;
        self.frames_to_generate = frames_to_generate;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.active_frames = 0;
        self.frames_to_generate = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn active_frames(&self) -> u32 {
        self.active_frames
    }

    pub fn frames_to_generate(&self) -> u32 {
        self.frames_to_generate
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Drop every particle, including ones in flight
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn update(&mut self, settings: &Settings, rng: &mut Pcg32) {
        if self.active {
            self.emit(settings, rng);
            self.active_frames += 1;
            if self.active_frames > self.frames_to_generate {
                self.stop();
            }
        }

        for particle in &mut self.particles {
            particle.update(settings);
        }
        self.particles.retain(|p| p.alive(settings));
    }

    fn emit(&mut self, settings: &Settings, rng: &mut Pcg32) {
        let seeds = self.policy.emit(settings, rng);
        self.particles.extend(seeds.into_iter().map(|seed| Particle {
            pos: self.origin,
            vel: seed.vel,
            size: rng.random_range(1..=4) as f32,
            color: seed.color,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_particle_falls_with_terminal_clamp() {
        let settings = Settings::default();
        let mut p = Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(1.0, 11.0),
            size: 2.0,
            color: [0, 0, 0],
        };
        p.update(&settings);
        assert_eq!(p.vel.y, settings.terminal_velocity);
        assert_eq!(p.pos, Vec2::new(101.0, 112.0));
    }

    #[test]
    fn test_generator_runs_for_budget_then_stops() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut generator = ParticleGenerator::new(Vec2::new(400.0, 590.0), Box::new(GibEmission));

        generator.start(3);
        assert!(generator.is_active());
        assert_eq!(generator.active_frames(), 0);

        for _ in 0..3 {
            generator.update(&settings, &mut rng);
            assert!(generator.is_active());
        }
        generator.update(&settings, &mut rng);
        assert!(!generator.is_active());
    }

    #[test]
    fn test_stopped_generator_lets_particles_finish() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut generator = ParticleGenerator::uniform(Vec2::new(400.0, 300.0));

        generator.start(10);
        generator.update(&settings, &mut rng);
        let emitted = generator.particles().len();
        assert_eq!(emitted, settings.particle_gen_per_frame);

        generator.stop();
        generator.update(&settings, &mut rng);
        assert_eq!(generator.particles().len(), emitted);

        // Eventually all fall off the bottom of the screen
        for _ in 0..200 {
            generator.update(&settings, &mut rng);
        }
        assert!(generator.particles().is_empty());
    }

    #[test]
    fn test_gib_policy_respects_ranges() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut policy = GibEmission;
        for _ in 0..50 {
            for seed in policy.emit(&settings, &mut rng) {
                assert!((-8.0..=8.0).contains(&seed.vel.x));
                assert!((-20.0..=-5.0).contains(&seed.vel.y));
                assert_eq!(seed.color, settings.particle_gen_color);
            }
        }
    }
}
