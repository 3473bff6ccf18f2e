//! Level and experience

use serde::{Deserialize, Serialize};

/// Experience needed per level: reaching level `n + 1` from `n` costs `n * 100`
pub const EXPERIENCE_PER_LEVEL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    level: u32,
    experience: u32,
}

impl LevelProgress {
    /// Level is floored at 1
    pub fn new(level: u32) -> Self {
        Self {
            level: level.max(1),
            experience: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Experience accumulated toward the next level
    pub fn experience(&self) -> u32 {
        self.experience
    }

    /// Experience needed to leave the current level
    pub fn threshold(&self) -> u32 {
        self.level.saturating_mul(EXPERIENCE_PER_LEVEL)
    }

    /// Add experience, levelling up as many times as it pays for.
    /// Surplus carries into the next level. Returns levels gained.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        while self.experience >= self.threshold() {
            self.experience -= self.threshold();
            self.level += 1;
            gained += 1;
        }
        gained
    }
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self::new(1)
    }
}
