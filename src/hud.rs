//! HUD counters: the level number and the run timer
//!
//! Digits are range checked; anything outside 0..=9 is a bug in the caller
//! and is reported instead of being clamped.

use thiserror::Error;

use crate::settings::Settings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DigitError {
    #[error("digit value {0} is outside 0..=9")]
    OutOfRange(i32),
}

/// A single decimal digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: i32) -> Result<Self, DigitError> {
        let mut digit = Self::default();
        digit.set(value)?;
        Ok(digit)
    }

    pub fn set(&mut self, value: i32) -> Result<(), DigitError> {
        match u8::try_from(value) {
            Ok(v) if v <= 9 => {
                self.0 = v;
                Ok(())
            }
            _ => Err(DigitError::OutOfRange(value)),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Count up by one, wrapping 9 to 0. Returns true on carry.
    pub fn increase(&mut self) -> bool {
        if self.0 == 9 {
            self.0 = 0;
            true
        } else {
            self.0 += 1;
            false
        }
    }
}

/// Two-digit level display, starting at 01
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCounter {
    tens: Digit,
    ones: Digit,
}

impl Default for LevelCounter {
    fn default() -> Self {
        Self {
            tens: Digit(0),
            ones: Digit(1),
        }
    }
}

impl LevelCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next level; 99 wraps to 00
    pub fn increase(&mut self) {
        if self.ones.increase() {
            self.tens.increase();
        }
    }

    pub fn value(&self) -> u32 {
        self.tens.value() as u32 * 10 + self.ones.value() as u32
    }

    /// Digits for drawing, most significant first
    pub fn digits(&self) -> [u8; 2] {
        [self.tens.value(), self.ones.value()]
    }
}

/// Elapsed play time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelTimer {
    elapsed_ms: u64,
}

impl LevelTimer {
    pub fn tick(&mut self, settings: &Settings) {
        self.elapsed_ms += settings.frame_ms();
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Knock time off the clock, never below zero
    pub fn apply_bonus(&mut self, ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_sub(ms);
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_range_check() {
        assert_eq!(Digit::new(10), Err(DigitError::OutOfRange(10)));
        assert_eq!(Digit::new(-1), Err(DigitError::OutOfRange(-1)));
        assert_eq!(Digit::new(7).map(|d| d.value()), Ok(7));

        let mut digit = Digit::default();
        assert!(digit.set(12).is_err());
        assert_eq!(digit.value(), 0);
    }

    #[test]
    fn test_digit_carry() {
        let mut digit = Digit::new(8).unwrap();
        assert!(!digit.increase());
        assert!(digit.increase());
        assert_eq!(digit.value(), 0);
    }

    #[test]
    fn test_level_counter_carry_and_wrap() {
        let mut level = LevelCounter::new();
        assert_eq!(level.value(), 1);
        for _ in 0..8 {
            level.increase();
        }
        assert_eq!(level.digits(), [0, 9]);
        level.increase();
        assert_eq!(level.digits(), [1, 0]);

        for _ in 0..89 {
            level.increase();
        }
        assert_eq!(level.value(), 99);
        level.increase();
        assert_eq!(level.value(), 0);
    }

    #[test]
    fn test_timer_bonus_saturates() {
        let settings = Settings::default();
        let mut timer = LevelTimer::default();
        for _ in 0..30 {
            timer.tick(&settings);
        }
        assert_eq!(timer.elapsed_ms(), 30 * settings.frame_ms());
        timer.apply_bonus(settings.blob_kill_bonus_ms);
        assert_eq!(timer.elapsed_ms(), 0);
        timer.tick(&settings);
        timer.apply_bonus(5);
        assert_eq!(timer.elapsed_ms(), settings.frame_ms() - 5);
    }
}
