//! Derived stat formulas
//!
//! Integer floor division throughout:
//!
//! ```text
//! MaxHP = ((Base*2 + IV + EV/4) * Level) / 100 + Level + 10
//! Stat  = ((Base*2 + IV + EV/4) * Level) / 100 + 5
//! ```

use super::{BaseStats, IndividualVariance, StatKind, TrainingPoints};
use serde::{Deserialize, Serialize};

/// Effective stats computed from a combatant's inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl DerivedStats {
    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Hp => self.max_hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
        }
    }
}

/// Widened to u64; callers clamp back to u32
fn scaled(base: u32, iv: u32, ev: u32, level: u32) -> u64 {
    let (base, iv, ev, level) = (
        u64::from(base),
        u64::from(iv),
        u64::from(ev),
        u64::from(level),
    );
    ((base * 2 + iv + ev / 4) * level) / 100
}

fn clamp_u32(value: u64) -> u32 {
    value.min(u64::from(u32::MAX)) as u32
}

pub fn max_hp(base: u32, iv: u32, ev: u32, level: u32) -> u32 {
    clamp_u32(scaled(base, iv, ev, level) + u64::from(level) + 10)
}

pub fn battle_stat(base: u32, iv: u32, ev: u32, level: u32) -> u32 {
    clamp_u32(scaled(base, iv, ev, level) + 5)
}

pub fn derive_stats(
    base: &BaseStats,
    iv: &IndividualVariance,
    ev: &TrainingPoints,
    level: u32,
) -> DerivedStats {
    let stat = |kind| battle_stat(base.get(kind), iv.get(kind), ev.get(kind), level);
    DerivedStats {
        max_hp: max_hp(
            base.get(StatKind::Hp),
            iv.get(StatKind::Hp),
            ev.get(StatKind::Hp),
            level,
        ),
        attack: stat(StatKind::Attack),
        defense: stat(StatKind::Defense),
        speed: stat(StatKind::Speed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_hp_reference_value() {
        // (200 + 31 + 63) * 50 / 100 = 147, + 50 + 10
        assert_eq!(max_hp(100, 31, 252, 50), 207);
    }

    #[test]
    fn test_battle_stat_floors() {
        // (2*55 + 0 + 0) * 7 / 100 = 7.7 -> 7, + 5
        assert_eq!(battle_stat(55, 0, 0, 7), 12);
    }

    #[test]
    fn test_ev_quartered_before_scaling() {
        // 3 EV contributes nothing, 4 EV contributes one point
        assert_eq!(battle_stat(50, 0, 3, 100), battle_stat(50, 0, 0, 100));
        assert_eq!(battle_stat(50, 0, 4, 100), battle_stat(50, 0, 0, 100) + 1);
    }

    #[test]
    fn test_extreme_inputs_clamp_instead_of_overflowing() {
        // Intermediate products exceed u32 but the results fit
        assert_eq!(max_hp(3_000_000_000, 0, 0, 50), 3_000_000_060);
        assert_eq!(battle_stat(3_000_000_000, 0, 0, 50), 3_000_000_005);
        assert_eq!(max_hp(255, 31, 252, 10_000_000), 70_400_010);
        assert_eq!(battle_stat(255, 31, 252, 10_000_000), 60_400_005);
        // Results past u32 clamp
        assert_eq!(max_hp(3_000_000_000, 0, 0, 100), u32::MAX);
        assert_eq!(battle_stat(u32::MAX, 31, 252, u32::MAX), u32::MAX);
    }

    #[test]
    fn test_derive_stats_uses_every_input() {
        let base = BaseStats::new("Knight", 100, 80, 60, 40);
        let iv = IndividualVariance::perfect();
        let ev = TrainingPoints::from_values(252, 0, 0, 0);
        let stats = derive_stats(&base, &iv, &ev, 50);

        assert_eq!(stats.max_hp, 207);
        assert_eq!(stats.attack, (160 + 31) * 50 / 100 + 5);
        assert_eq!(stats.defense, (120 + 31) * 50 / 100 + 5);
        assert_eq!(stats.speed, (80 + 31) * 50 / 100 + 5);
    }
}
