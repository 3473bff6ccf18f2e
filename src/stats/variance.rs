//! Individual variance (innate talent)

use super::StatKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Highest talent value for a single stat
pub const MAX_IV: u32 = 31;

/// Per-stat innate talent, fixed for an individual's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualVariance {
    hp: u32,
    attack: u32,
    defense: u32,
    speed: u32,
}

impl IndividualVariance {
    /// Out-of-range values are clamped to `MAX_IV`
    pub fn new(hp: u32, attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            hp: hp.min(MAX_IV),
            attack: attack.min(MAX_IV),
            defense: defense.min(MAX_IV),
            speed: speed.min(MAX_IV),
        }
    }

    /// Perfect talent in every stat
    pub fn perfect() -> Self {
        Self::new(MAX_IV, MAX_IV, MAX_IV, MAX_IV)
    }

    /// Draw every stat uniformly from `0..=MAX_IV`
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.gen_range(0..=MAX_IV),
            rng.gen_range(0..=MAX_IV),
            rng.gen_range(0..=MAX_IV),
            rng.gen_range(0..=MAX_IV),
        )
    }

    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
        }
    }
}
