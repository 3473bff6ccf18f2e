//! Combatant - a roster member with runtime battle state

use crate::abilities::{Ability, StatModifier};
use crate::stats::{
    derive_stats, BaseStats, DerivedStats, IndividualVariance, LevelProgress, StatKind,
    TrainingPoints,
};
use serde::{Deserialize, Serialize};

/// In-battle stat shifts from stat-modifying abilities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleModifiers {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl BattleModifiers {
    fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Hp => 0,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
        }
    }
}

fn shifted(value: u32, delta: i32) -> u32 {
    (i64::from(value) + i64::from(delta)).clamp(0, i64::from(u32::MAX)) as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    base: BaseStats,
    iv: IndividualVariance,
    training: TrainingPoints,
    progress: LevelProgress,
    abilities: Vec<Ability>,
    /// One counter per equipped ability, same index
    cooldowns: Vec<u32>,
    current_hp: u32,
    modifiers: BattleModifiers,
}

impl Combatant {
    /// A fresh combatant at full health with nothing equipped
    pub fn new(
        base: BaseStats,
        iv: IndividualVariance,
        training: TrainingPoints,
        level: u32,
    ) -> Self {
        let mut combatant = Self {
            base,
            iv,
            training,
            progress: LevelProgress::new(level),
            abilities: Vec::new(),
            cooldowns: Vec::new(),
            current_hp: 0,
            modifiers: BattleModifiers::default(),
        };
        combatant.current_hp = combatant.max_hp();
        combatant
    }

    pub fn with_abilities(mut self, abilities: Vec<Ability>) -> Self {
        for ability in abilities {
            self.equip(ability);
        }
        self
    }

    pub fn equip(&mut self, ability: Ability) {
        self.abilities.push(ability);
        self.cooldowns.push(0);
    }

    pub fn name(&self) -> &str {
        &self.base.name
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    pub fn variance(&self) -> &IndividualVariance {
        &self.iv
    }

    pub fn training(&self) -> &TrainingPoints {
        &self.training
    }

    pub fn progress(&self) -> &LevelProgress {
        &self.progress
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    /// Stats from the template, talent, training and level. No battle shifts.
    pub fn derived(&self) -> DerivedStats {
        derive_stats(&self.base, &self.iv, &self.training, self.progress.level())
    }

    /// Derived stats with in-battle shifts applied, floored at zero
    pub fn battle_stats(&self) -> DerivedStats {
        let derived = self.derived();
        let stat = |kind| shifted(derived.get(kind), self.modifiers.get(kind));
        DerivedStats {
            max_hp: derived.max_hp,
            attack: stat(StatKind::Attack),
            defense: stat(StatKind::Defense),
            speed: stat(StatKind::Speed),
        }
    }

    pub fn max_hp(&self) -> u32 {
        self.derived().max_hp
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hp == 0
    }

    pub fn modifiers(&self) -> BattleModifiers {
        self.modifiers
    }

    /// Full health, cooldowns cleared, battle shifts dropped
    pub fn reset_for_battle(&mut self) {
        self.current_hp = self.max_hp();
        self.cooldowns.iter_mut().for_each(|c| *c = 0);
        self.modifiers = BattleModifiers::default();
    }

    /// Returns the HP actually removed
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Returns the HP actually restored
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp().saturating_sub(self.current_hp));
        self.current_hp += healed;
        healed
    }

    /// Apply a stat-modifying ability to self.
    ///
    /// Attack, Defense and Speed shifts last for the battle. An HP shift heals
    /// or drains current HP within `0..=max_hp`.
    pub fn apply_modifier(&mut self, modifier: StatModifier) {
        match modifier.stat {
            StatKind::Hp => {
                if modifier.delta >= 0 {
                    self.heal(modifier.delta.unsigned_abs());
                } else {
                    self.take_damage(modifier.delta.unsigned_abs());
                }
            }
            StatKind::Attack => self.modifiers.attack += modifier.delta,
            StatKind::Defense => self.modifiers.defense += modifier.delta,
            StatKind::Speed => self.modifiers.speed += modifier.delta,
        }
    }

    /// Set training points for one stat. Returns the value stored.
    pub fn set_training(&mut self, kind: StatKind, value: u32) -> u32 {
        let old_max = self.max_hp();
        let stored = self.training.set(kind, value);
        self.refit_hp(old_max);
        stored
    }

    /// Train one stat. Returns the points actually gained.
    pub fn train(&mut self, kind: StatKind, amount: u32) -> u32 {
        let old_max = self.max_hp();
        let gained = self.training.add(kind, amount);
        self.refit_hp(old_max);
        gained
    }

    /// Returns levels gained
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        let old_max = self.max_hp();
        let levels = self.progress.add_experience(amount);
        self.refit_hp(old_max);
        levels
    }

    /// Carry a MaxHP change over to current HP
    fn refit_hp(&mut self, old_max: u32) {
        let new_max = self.max_hp();
        if new_max > old_max {
            self.current_hp = self.current_hp.saturating_add(new_max - old_max);
        }
        self.current_hp = self.current_hp.min(new_max);
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn ability(&self, slot: usize) -> Option<&Ability> {
        self.abilities.get(slot)
    }

    pub fn cooldown(&self, slot: usize) -> Option<u32> {
        self.cooldowns.get(slot).copied()
    }

    /// Lock an equipped ability for `turns`. Returns false for an empty slot.
    pub fn set_cooldown(&mut self, slot: usize, turns: u32) -> bool {
        match self.cooldowns.get_mut(slot) {
            Some(counter) => {
                *counter = turns;
                true
            }
            None => false,
        }
    }

    /// Count every cooldown down by one turn
    pub fn tick_cooldowns(&mut self) {
        self.cooldowns
            .iter_mut()
            .for_each(|c| *c = c.saturating_sub(1));
    }

    /// First equipped ability that is off cooldown, in equip order
    pub fn ready_ability(&self) -> Option<usize> {
        self.cooldowns.iter().position(|&c| c == 0)
    }
}
