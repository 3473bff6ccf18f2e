//! Training points
//!
//! Each stat holds at most `MAX_PER_STAT` points and all four together hold
//! at most `MAX_TOTAL`. Every write re-clamps the written field against the
//! other three, so whichever field is written last gives way.

use super::StatKind;
use serde::{Deserialize, Serialize};

pub const MAX_PER_STAT: u32 = 252;
pub const MAX_TOTAL: u32 = 510;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPoints {
    hp: u32,
    attack: u32,
    defense: u32,
    speed: u32,
}

impl TrainingPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from four values, applied in HP, Attack, Defense, Speed order
    pub fn from_values(hp: u32, attack: u32, defense: u32, speed: u32) -> Self {
        let mut points = Self::new();
        points.set(StatKind::Hp, hp);
        points.set(StatKind::Attack, attack);
        points.set(StatKind::Defense, defense);
        points.set(StatKind::Speed, speed);
        points
    }

    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn total(&self) -> u32 {
        self.hp + self.attack + self.defense + self.speed
    }

    /// Set one stat, clamped per-stat and against the running total.
    /// Returns the value actually stored.
    pub fn set(&mut self, kind: StatKind, value: u32) -> u32 {
        let others = self.total() - self.get(kind);
        let clamped = value.min(MAX_PER_STAT).min(MAX_TOTAL.saturating_sub(others));
        *self.field_mut(kind) = clamped;
        clamped
    }

    /// Train one stat by `amount`. Returns the points actually gained.
    pub fn add(&mut self, kind: StatKind, amount: u32) -> u32 {
        let before = self.get(kind);
        self.set(kind, before.saturating_add(amount)) - before
    }

    fn field_mut(&mut self, kind: StatKind) -> &mut u32 {
        match kind {
            StatKind::Hp => &mut self.hp,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
        }
    }
}
