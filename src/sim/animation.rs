//! Frame sequencing for sprite animations
//!
//! An `Animation` is a list of image indices stepped with a fixed delay; the
//! renderer looks up the image for `current_frame()`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Named animation slots shared by every mover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationKey {
    IdleLeft,
    IdleRight,
    WalkLeft,
    WalkRight,
    JumpUpLeft,
    JumpUpRight,
    JumpDownLeft,
    JumpDownRight,
    Dead,
    Exit,
}

impl AnimationKey {
    pub fn is_idle(&self) -> bool {
        matches!(self, AnimationKey::IdleLeft | AnimationKey::IdleRight)
    }

    pub fn is_walking(&self) -> bool {
        matches!(self, AnimationKey::WalkLeft | AnimationKey::WalkRight)
    }
}

/// A cyclic frame sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animation {
    frames: Vec<usize>,
    /// Ticks to wait before advancing
    delay: u32,
    delayed: u32,
    index: usize,
}

impl Animation {
    pub fn new(frames: Vec<usize>, delay: u32) -> Self {
        debug_assert!(!frames.is_empty(), "animation needs at least one frame");
        Self {
            frames,
            delay,
            delayed: 0,
            index: 0,
        }
    }

    /// Image index to draw
    pub fn current_frame(&self) -> usize {
        self.frames.get(self.index).copied().unwrap_or_default()
    }

    /// Position within the sequence
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.delayed = 0;
    }

    /// Advance by one tick. The sequence steps once the delay counter has
    /// passed `delay`, so each frame is held for `delay + 2` ticks.
    pub fn animate(&mut self) {
        if self.delayed > self.delay {
            self.delayed = 0;
            self.index += 1;
            if self.index >= self.frames.len() {
                self.index = 0;
            }
        } else {
            self.delayed += 1;
        }
    }
}

/// Keyed set of animations with one active slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animator {
    animations: HashMap<AnimationKey, Animation>,
    current: AnimationKey,
}

impl Animator {
    pub fn new(initial: AnimationKey) -> Self {
        Self {
            animations: HashMap::new(),
            current: initial,
        }
    }

    /// Builder-style registration
    pub fn with(mut self, key: AnimationKey, animation: Animation) -> Self {
        self.animations.insert(key, animation);
        self
    }

    pub fn current_key(&self) -> AnimationKey {
        self.current
    }

    /// Switch animations; the new sequence restarts only when the key changes
    pub fn set_current(&mut self, key: AnimationKey) {
        if key == self.current {
            return;
        }
        self.current = key;
        if let Some(animation) = self.animations.get_mut(&key) {
            animation.reset();
        }
    }

    /// Tick the active animation
    pub fn animate(&mut self) {
        if let Some(animation) = self.animations.get_mut(&self.current) {
            animation.animate();
        }
    }

    /// Image index of the active animation (0 if the slot is unregistered)
    pub fn current_frame(&self) -> usize {
        self.animations
            .get(&self.current)
            .map(Animation::current_frame)
            .unwrap_or_default()
    }
}
